//! `SeaORM` Entity for model_year_reports table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ModelYearReportStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "model_year_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub model_year_id: i32,
    pub credit_reduction_selection: Option<String>,
    pub validation_status: ModelYearReportStatus,
    pub create_user: String,
    pub update_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::model_years::Entity",
        from = "Column::ModelYearId",
        to = "super::model_years::Column::Id"
    )]
    ModelYears,
}

impl Related<super::model_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModelYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
