//! `SeaORM` Entity for sales_submission_credit_transactions link table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_submission_credit_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sales_submission_id: Uuid,
    #[sea_orm(unique)]
    pub credit_transaction_id: Uuid,
    pub create_user: String,
    pub update_user: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_transactions::Entity",
        from = "Column::CreditTransactionId",
        to = "super::credit_transactions::Column::Id"
    )]
    CreditTransactions,
}

impl Related<super::credit_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
