//! `SeaORM` Entity for the accounts table (chart of accounts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub branch_id: Uuid,
    pub account_type_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub code: String,
    pub name: String,
    pub is_group: bool,
    pub is_system_generated: bool,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::BranchId",
        to = "super::branches::Column::Id"
    )]
    Branches,
    #[sea_orm(
        belongs_to = "super::account_types::Entity",
        from = "Column::AccountTypeId",
        to = "super::account_types::Column::Id"
    )]
    AccountTypes,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::journal_voucher_lines::Entity")]
    JournalVoucherLines,
    #[sea_orm(has_many = "super::opening_balances::Entity")]
    OpeningBalances,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branches.def()
    }
}

impl Related<super::account_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountTypes.def()
    }
}

impl Related<super::journal_voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalVoucherLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
