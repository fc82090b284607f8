//! `SeaORM` Entity for vehicles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VehicleZevType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub make: String,
    pub model_name: String,
    pub model_year_id: i32,
    pub vehicle_zev_type: VehicleZevType,
    /// Electric range in km.
    pub range: i32,
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
