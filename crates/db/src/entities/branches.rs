//! `SeaORM` Entity for the branches table.

use ledgerline_core::registry::BranchProfile;
use ledgerline_shared::types::{BranchId, CurrencyId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub currency_id: Uuid,
    pub is_head_office: bool,
    pub is_system_generated: bool,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::CurrencyId",
        to = "super::currencies::Column::Id"
    )]
    Currencies,
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
    #[sea_orm(has_many = "super::journal_vouchers::Entity")]
    JournalVouchers,
    #[sea_orm(has_many = "super::invoices::Entity")]
    Invoices,
}

impl Related<super::currencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currencies.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BranchProfile {
    fn from(model: Model) -> Self {
        Self {
            id: BranchId::from_uuid(model.id),
            code: model.code,
            name: model.name,
            currency_id: Some(CurrencyId::from_uuid(model.currency_id)),
            is_head_office: model.is_head_office,
            active: model.active,
        }
    }
}
