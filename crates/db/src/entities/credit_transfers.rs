//! `SeaORM` Entity for credit_transfers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CreditTransferStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub debit_from_id: Uuid,
    pub credit_to_id: Uuid,
    pub status: CreditTransferStatus,
    pub create_user: String,
    pub update_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credit_transfer_content::Entity")]
    CreditTransferContent,
}

impl Related<super::credit_transfer_content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditTransferContent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
