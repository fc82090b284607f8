//! Sales submission repository.
//!
//! Awards credits for the validated records of sale in a submission.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use creditledger_core::ledger::{
    BalanceKey, CreditError, CreditTransactionType, IssuanceLine, ReductionPlan, ReferenceData,
    VehicleSales, count_sales_by_vehicle, fiscal_cutoff_timestamp, plan_issuance,
};
use creditledger_core::vehicle::VehicleAttributes;
use creditledger_shared::types::{OrganizationId, SalesSubmissionId, VehicleId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::deficit::adjust_deficits;
use super::ledger::{NewEntry, db_err, insert_entry};
use crate::entities::{
    credit_transactions, records_of_sale, sales_submission_credit_transactions, sales_submissions,
    sea_orm_active_enums::RecordOfSaleStatus, vehicles,
};

/// Result of awarding a submission.
#[derive(Debug, Clone)]
pub struct AwardOutcome {
    /// Validation entries written, one per qualifying vehicle.
    pub transactions: Vec<credit_transactions::Model>,
    /// Deficit reductions applied afterwards, `None` without an assessed
    /// report or when nothing was issued.
    pub reduction: Option<ReductionPlan>,
}

/// Sales submission repository.
#[derive(Debug, Clone)]
pub struct SalesSubmissionRepository {
    db: DatabaseConnection,
    reference: Arc<ReferenceData>,
}

impl SalesSubmissionRepository {
    /// Creates a new sales submission repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, reference: Arc<ReferenceData>) -> Self {
        Self { db, reference }
    }

    /// Awards credits for a submission in its own database transaction.
    ///
    /// # Errors
    ///
    /// See [`Self::award_credits_in`].
    pub async fn award_credits(
        &self,
        submission_id: SalesSubmissionId,
    ) -> Result<AwardOutcome, CreditError> {
        self.award_credits_at(submission_id, Utc::now()).await
    }

    /// Awards credits as of `now`, in its own database transaction.
    ///
    /// # Errors
    ///
    /// See [`Self::award_credits_in`].
    pub async fn award_credits_at(
        &self,
        submission_id: SalesSubmissionId,
        now: DateTime<Utc>,
    ) -> Result<AwardOutcome, CreditError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let outcome = self.award_credits_in(&txn, submission_id, now).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(outcome)
    }

    /// Awards credits on the caller's connection.
    ///
    /// One Validation entry per vehicle with validated sales in class A or
    /// B, credited to the submission's organization. Entries of a
    /// submission that is part of a model-year report are dated to the
    /// compliance-year cutoff instead of `now`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::SubmissionNotFound` or
    /// `CreditError::VehicleNotFound` for dangling ids,
    /// `CreditError::MissingReferenceData` for an unknown credit class,
    /// `CreditError::Database` if a query fails.
    pub async fn award_credits_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        submission_id: SalesSubmissionId,
        now: DateTime<Utc>,
    ) -> Result<AwardOutcome, CreditError> {
        let submission = sales_submissions::Entity::find_by_id(submission_id.into_inner())
            .one(conn)
            .await
            .map_err(db_err)?
            .ok_or(CreditError::SubmissionNotFound(submission_id.into_inner()))?;
        let organization = OrganizationId::from_uuid(submission.organization_id);

        let records = records_of_sale::Entity::find()
            .filter(records_of_sale::Column::SubmissionId.eq(submission.id))
            .filter(records_of_sale::Column::ValidationStatus.eq(RecordOfSaleStatus::Validated))
            .all(conn)
            .await
            .map_err(db_err)?;
        let counts =
            count_sales_by_vehicle(records.iter().map(|r| VehicleId::from_uuid(r.vehicle_id)));

        let vehicles: HashMap<Uuid, vehicles::Model> = vehicles::Entity::find()
            .filter(vehicles::Column::Id.is_in(counts.keys().map(|id| id.into_inner())))
            .all(conn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        let mut sales = Vec::with_capacity(counts.len());
        for (vehicle_id, validated_count) in counts {
            let vehicle = vehicles
                .get(&vehicle_id.into_inner())
                .ok_or(CreditError::VehicleNotFound(vehicle_id.into_inner()))?;
            let attributes = VehicleAttributes {
                zev_type: vehicle.vehicle_zev_type.into(),
                range_km: u32::try_from(vehicle.range).unwrap_or_default(),
            };
            sales.push(VehicleSales {
                vehicle_id,
                model_year_id: vehicle.model_year_id,
                credit_class: attributes.credit_class(),
                credit_value: attributes.credit_value(),
                validated_count,
            });
        }

        let lines = plan_issuance(&sales);
        let timestamp = if submission.part_of_model_year_report {
            fiscal_cutoff_timestamp(now)
        } else {
            now
        };

        let mut transactions = Vec::with_capacity(lines.len());
        for line in &lines {
            let entry = self
                .insert_issuance(conn, &submission, organization, line, timestamp, now)
                .await?;
            transactions.push(entry);
        }

        debug!(
            submission_id = %submission_id,
            vehicles = sales.len(),
            issued = transactions.len(),
            "Planned issuance"
        );

        let reduction = if transactions.is_empty() {
            None
        } else {
            adjust_deficits(conn, &self.reference, organization, now).await?
        };

        info!(
            submission_id = %submission_id,
            organization_id = %organization,
            entries = transactions.len(),
            "Credits awarded"
        );

        Ok(AwardOutcome {
            transactions,
            reduction,
        })
    }

    async fn insert_issuance<C: ConnectionTrait>(
        &self,
        conn: &C,
        submission: &sales_submissions::Model,
        organization: OrganizationId,
        line: &IssuanceLine,
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<credit_transactions::Model, CreditError> {
        let credit_class_id = self.reference.credit_class_id(line.credit_class.as_str())?;

        let entry = insert_entry(
            conn,
            NewEntry {
                credit_to: Some(organization),
                debit_from: None,
                key: BalanceKey::new(
                    line.model_year_id,
                    credit_class_id,
                    self.reference.ldv_weight_class_id(),
                ),
                number_of_credits: i64::from(line.number_of_credits),
                credit_value: line.credit_value,
                total_value: line.total_value,
                transaction_type_id: self
                    .reference
                    .transaction_type_id(CreditTransactionType::Validation),
                transaction_timestamp: timestamp,
                user: submission.update_user.clone(),
            },
            now,
        )
        .await?;

        sales_submission_credit_transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            sales_submission_id: Set(submission.id),
            credit_transaction_id: Set(entry.id),
            create_user: Set(submission.update_user.clone()),
            update_user: Set(submission.update_user.clone()),
            created_at: Set(now.into()),
        }
        .insert(conn)
        .await
        .map_err(db_err)?;

        Ok(entry)
    }
}
