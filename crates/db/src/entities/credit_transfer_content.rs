//! `SeaORM` Entity for credit_transfer_content table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_transfer_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub credit_transfer_id: Uuid,
    pub model_year_id: i32,
    pub credit_class_id: i32,
    pub weight_class_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub credit_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub dollar_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_transfers::Entity",
        from = "Column::CreditTransferId",
        to = "super::credit_transfers::Column::Id"
    )]
    CreditTransfers,
}

impl Related<super::credit_transfers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditTransfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
