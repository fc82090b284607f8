//! `SeaORM` Entity for credit_transactions table.
//!
//! Append-only ledger. Issuance rows carry only `credit_to_id`, reduction
//! rows only `debit_from_id`, transfer rows both.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub credit_to_id: Option<Uuid>,
    pub debit_from_id: Option<Uuid>,
    pub credit_class_id: i32,
    pub weight_class_id: i32,
    pub model_year_id: i32,
    pub number_of_credits: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub credit_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_value: Decimal,
    pub transaction_type_id: i32,
    pub transaction_timestamp: DateTimeWithTimeZone,
    pub create_user: String,
    pub update_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_transaction_types::Entity",
        from = "Column::TransactionTypeId",
        to = "super::credit_transaction_types::Column::Id"
    )]
    CreditTransactionTypes,
    #[sea_orm(
        belongs_to = "super::credit_classes::Entity",
        from = "Column::CreditClassId",
        to = "super::credit_classes::Column::Id"
    )]
    CreditClasses,
    #[sea_orm(
        belongs_to = "super::model_years::Entity",
        from = "Column::ModelYearId",
        to = "super::model_years::Column::Id"
    )]
    ModelYears,
}

impl Related<super::credit_transaction_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditTransactionTypes.def()
    }
}

impl Related<super::credit_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditClasses.def()
    }
}

impl Related<super::model_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModelYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
