//! `SeaORM` Entity for the journal_vouchers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DocumentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub branch_id: Uuid,
    pub voucher_no: String,
    pub voucher_date: Date,
    pub narration: Option<String>,
    pub status: DocumentStatus,
    pub total: Decimal,
    pub lock_version: i32,
    pub created_by: Option<Uuid>,
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
    #[sea_orm(has_many = "super::journal_voucher_lines::Entity")]
    JournalVoucherLines,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branches.def()
    }
}

impl Related<super::journal_voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalVoucherLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
