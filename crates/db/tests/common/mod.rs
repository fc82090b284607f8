//! Shared fixtures for the repository integration tests.
//!
//! Every test gets its own in-memory SQLite database with the full schema
//! and the seeded reference rows. The pool holds a single connection so the
//! database lives as long as the test.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use creditledger_core::ledger::{CreditTransactionType, ReferenceData};
use creditledger_db::{
    ReferenceRepository,
    entities::{
        credit_transactions, credit_transfer_content, credit_transfers, model_year_reports,
        model_years, organization_deficits, organizations, records_of_sale, sales_submissions,
        sea_orm_active_enums::{
            CreditTransferStatus, ModelYearReportStatus, RecordOfSaleStatus, VehicleZevType,
        },
        vehicles,
    },
    migration::Migrator,
};
use creditledger_shared::types::{
    CreditTransferId, DeficitId, ModelYearReportId, OrganizationId, SalesSubmissionId, VehicleId,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Set,
};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

pub const CLASS_A: i32 = 1;
pub const CLASS_B: i32 = 2;
pub const LDV: i32 = 1;
pub const MY_2022: i32 = 4;
pub const MY_2023: i32 = 5;

pub const ANALYST: &str = "analyst@gov";

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 30, 0).unwrap()
}

pub async fn setup() -> (DatabaseConnection, Arc<ReferenceData>) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let reference = ReferenceRepository::new(db.clone())
        .load()
        .await
        .expect("Failed to load reference data");

    (db, Arc::new(reference))
}

pub async fn create_org(db: &DatabaseConnection, name: &str) -> OrganizationId {
    let now = Utc::now();
    let id = OrganizationId::new();
    organizations::ActiveModel {
        id: Set(id.into_inner()),
        name: Set(name.to_string()),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create organization");
    id
}

pub async fn create_vehicle(
    db: &DatabaseConnection,
    org: OrganizationId,
    zev_type: VehicleZevType,
    range: i32,
) -> VehicleId {
    let now = Utc::now();
    let id = VehicleId::new();
    vehicles::ActiveModel {
        id: Set(id.into_inner()),
        organization_id: Set(org.into_inner()),
        make: Set("Volta".to_string()),
        model_name: Set(format!("Model {range}")),
        model_year_id: Set(MY_2023),
        vehicle_zev_type: Set(zev_type),
        range: Set(range),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create vehicle");
    id
}

pub async fn create_submission(
    db: &DatabaseConnection,
    org: OrganizationId,
    part_of_model_year_report: bool,
) -> SalesSubmissionId {
    let now = Utc::now();
    let id = SalesSubmissionId::new();
    sales_submissions::ActiveModel {
        id: Set(id.into_inner()),
        organization_id: Set(org.into_inner()),
        part_of_model_year_report: Set(part_of_model_year_report),
        create_user: Set("supplier@volta".to_string()),
        update_user: Set(ANALYST.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create submission");
    id
}

pub async fn add_sales(
    db: &DatabaseConnection,
    submission: SalesSubmissionId,
    vehicle: VehicleId,
    count: usize,
    status: RecordOfSaleStatus,
) {
    for n in 0..count {
        records_of_sale::ActiveModel {
            id: Set(Uuid::now_v7()),
            submission_id: Set(submission.into_inner()),
            vehicle_id: Set(vehicle.into_inner()),
            vin: Set(format!("VIN{n:014}")),
            validation_status: Set(status),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("Failed to add record of sale");
    }
}

/// Writes a Validation entry directly, bypassing the award flow.
pub async fn issue(
    db: &DatabaseConnection,
    reference: &ReferenceData,
    org: OrganizationId,
    model_year_id: i32,
    credit_class_id: i32,
    value: Decimal,
) {
    let now = Utc::now();
    credit_transactions::ActiveModel {
        id: Set(Uuid::now_v7()),
        credit_to_id: Set(Some(org.into_inner())),
        debit_from_id: Set(None),
        credit_class_id: Set(credit_class_id),
        weight_class_id: Set(LDV),
        model_year_id: Set(model_year_id),
        number_of_credits: Set(1),
        credit_value: Set(value),
        total_value: Set(value),
        transaction_type_id: Set(reference.transaction_type_id(CreditTransactionType::Validation)),
        transaction_timestamp: Set(now.into()),
        create_user: Set(ANALYST.to_string()),
        update_user: Set(ANALYST.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to issue credits");
}

pub async fn create_transfer(
    db: &DatabaseConnection,
    from: OrganizationId,
    to: OrganizationId,
    status: CreditTransferStatus,
    lines: &[(i32, i32, Decimal)],
) -> CreditTransferId {
    let now = Utc::now();
    let id = CreditTransferId::new();
    credit_transfers::ActiveModel {
        id: Set(id.into_inner()),
        debit_from_id: Set(from.into_inner()),
        credit_to_id: Set(to.into_inner()),
        status: Set(status),
        create_user: Set("seller@volta".to_string()),
        update_user: Set(ANALYST.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create transfer");

    for &(model_year_id, credit_class_id, credit_value) in lines {
        credit_transfer_content::ActiveModel {
            id: Set(Uuid::now_v7()),
            credit_transfer_id: Set(id.into_inner()),
            model_year_id: Set(model_year_id),
            credit_class_id: Set(credit_class_id),
            weight_class_id: Set(LDV),
            credit_value: Set(credit_value),
            dollar_value: Set(Decimal::ZERO),
            created_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to add transfer content");
    }
    id
}

pub async fn create_report(
    db: &DatabaseConnection,
    org: OrganizationId,
    model_year_id: i32,
    selection: Option<&str>,
    status: ModelYearReportStatus,
) -> ModelYearReportId {
    create_report_at(db, org, model_year_id, selection, status, Utc::now()).await
}

pub async fn create_report_at(
    db: &DatabaseConnection,
    org: OrganizationId,
    model_year_id: i32,
    selection: Option<&str>,
    status: ModelYearReportStatus,
    now: DateTime<Utc>,
) -> ModelYearReportId {
    let id = ModelYearReportId::new();
    model_year_reports::ActiveModel {
        id: Set(id.into_inner()),
        organization_id: Set(org.into_inner()),
        model_year_id: Set(model_year_id),
        credit_reduction_selection: Set(selection.map(ToString::to_string)),
        validation_status: Set(status),
        create_user: Set(ANALYST.to_string()),
        update_user: Set(ANALYST.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create report");
    id
}

pub async fn create_deficit(
    db: &DatabaseConnection,
    org: OrganizationId,
    credit_class_id: i32,
    model_year_id: i32,
    value: Decimal,
) -> DeficitId {
    let now = Utc::now();
    let id = DeficitId::new();
    organization_deficits::ActiveModel {
        id: Set(id.into_inner()),
        organization_id: Set(org.into_inner()),
        credit_class_id: Set(credit_class_id),
        model_year_id: Set(model_year_id),
        credit_value: Set(value),
        create_user: Set(ANALYST.to_string()),
        update_user: Set(ANALYST.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to create deficit");
    id
}

pub async fn deficit_value(db: &DatabaseConnection, id: DeficitId) -> Decimal {
    organization_deficits::Entity::find_by_id(id.into_inner())
        .one(db)
        .await
        .expect("Failed to load deficit")
        .expect("Deficit missing")
        .credit_value
}

/// Adds a model year after the reference data was loaded.
pub async fn add_model_year(db: &DatabaseConnection, id: i32, name: &str) {
    model_years::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to add model year");
}

pub async fn ledger_row_count(db: &DatabaseConnection) -> u64 {
    credit_transactions::Entity::find()
        .count(db)
        .await
        .expect("Failed to count ledger rows")
}
