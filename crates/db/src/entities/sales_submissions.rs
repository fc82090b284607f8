//! `SeaORM` Entity for sales_submissions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub part_of_model_year_report: bool,
    pub create_user: String,
    pub update_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::records_of_sale::Entity")]
    RecordsOfSale,
}

impl Related<super::records_of_sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecordsOfSale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
