//! `SeaORM` Entity for records_of_sale table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RecordOfSaleStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "records_of_sale")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub submission_id: Uuid,
    pub vehicle_id: Uuid,
    pub vin: String,
    pub validation_status: RecordOfSaleStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::sales_submissions::Column::Id"
    )]
    SalesSubmissions,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicles,
}

impl Related<super::sales_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesSubmissions.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
