//! `SeaORM` Entity for organization_deficits table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organization_deficits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub credit_class_id: i32,
    pub model_year_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub credit_value: Decimal,
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
