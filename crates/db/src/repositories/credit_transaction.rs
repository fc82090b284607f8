//! Credit transaction repository.
//!
//! Read-only projections over the ledger: bucket balances, balances net of
//! pending transfers, per-submission detail and a free-form row map.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use creditledger_core::ledger::{
    CreditBalance, CreditError, DetailLinks, DetailedEntry, ReferenceData,
    SubmissionTransactionSummary, aggregate_by_submission, apply_pending_balances,
};
use creditledger_shared::types::{
    CreditAgreementId, CreditTransferId, ModelYearReportId, OrganizationId, SalesSubmissionId,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, warn};
use uuid::Uuid;

use super::credit_transfer::load_pending_balances;
use super::ledger::{db_err, find_touching, load_credit_balances};
use crate::entities::{
    credit_agreement_credit_transactions, credit_agreements, credit_transactions,
    credit_transfer_credit_transactions, model_year_report_credit_transactions,
    sales_submission_credit_transactions,
};

/// Credit transaction repository.
#[derive(Debug, Clone)]
pub struct CreditTransactionRepository {
    db: DatabaseConnection,
    reference: Arc<ReferenceData>,
}

impl CreditTransactionRepository {
    /// Creates a new credit transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, reference: Arc<ReferenceData>) -> Self {
        Self { db, reference }
    }

    /// Issued balance of `organization` per (model year, credit class,
    /// weight class) bucket.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Database` if the query fails.
    pub async fn aggregate_credit_balance_details(
        &self,
        organization: OrganizationId,
    ) -> Result<Vec<CreditBalance>, CreditError> {
        load_credit_balances(&self.db, organization).await
    }

    /// Issued balances reduced by `organization`'s in-flight outgoing
    /// transfers. A negative `total_value` marks an over-committed bucket.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Database` if a query fails.
    pub async fn calculate_insufficient_credits(
        &self,
        organization: OrganizationId,
    ) -> Result<Vec<CreditBalance>, CreditError> {
        let issued = load_credit_balances(&self.db, organization).await?;
        let pending = load_pending_balances(&self.db, organization).await?;

        debug!(
            organization_id = %organization,
            buckets = issued.len(),
            pending = pending.len(),
            "Merging pending transfers"
        );

        Ok(apply_pending_balances(issued, &pending))
    }

    /// Ledger rows touching `organization`, grouped by the submission,
    /// transfer, agreement or report that explains them.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Database` if a query fails.
    pub async fn aggregate_transactions_by_submission(
        &self,
        organization: OrganizationId,
    ) -> Result<Vec<SubmissionTransactionSummary>, CreditError> {
        let rows = find_touching(&self.db, organization).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut links = self.load_links(rows.iter().map(|r| r.id).collect()).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(transaction_type) = self.reference.transaction_type(row.transaction_type_id)
            else {
                warn!(
                    transaction_id = %row.id,
                    transaction_type_id = row.transaction_type_id,
                    "Skipping ledger row with unknown transaction type"
                );
                continue;
            };
            entries.push(DetailedEntry {
                credit_to: row.credit_to_id.map(OrganizationId::from_uuid),
                debit_from: row.debit_from_id.map(OrganizationId::from_uuid),
                credit_class_id: row.credit_class_id,
                model_year_id: row.model_year_id,
                transaction_type,
                total_value: row.total_value,
                transaction_timestamp: row.transaction_timestamp.to_utc(),
                links: links.remove(&row.id).unwrap_or_default(),
            });
        }

        Ok(aggregate_by_submission(organization, &entries))
    }

    /// Builds a map over every ledger row from caller-supplied projections.
    /// Later rows overwrite earlier ones on key collision.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Database` if the query fails.
    pub async fn credit_transaction_map<K, V, FK, FV>(
        &self,
        key_fn: FK,
        value_fn: FV,
    ) -> Result<HashMap<K, V>, CreditError>
    where
        K: Eq + Hash,
        FK: Fn(&credit_transactions::Model) -> K,
        FV: Fn(&credit_transactions::Model) -> V,
    {
        let rows = credit_transactions::Entity::find()
            .order_by_asc(credit_transactions::Column::TransactionTimestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.iter().map(|row| (key_fn(row), value_fn(row))).collect())
    }

    /// Resolves the four link tables for `transaction_ids`.
    async fn load_links(
        &self,
        transaction_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, DetailLinks>, CreditError> {
        let mut links: HashMap<Uuid, DetailLinks> = HashMap::new();

        let submissions = sales_submission_credit_transactions::Entity::find()
            .filter(
                sales_submission_credit_transactions::Column::CreditTransactionId
                    .is_in(transaction_ids.clone()),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for link in submissions {
            links.entry(link.credit_transaction_id).or_default().sales_submission =
                Some(SalesSubmissionId::from_uuid(link.sales_submission_id));
        }

        let transfers = credit_transfer_credit_transactions::Entity::find()
            .filter(
                credit_transfer_credit_transactions::Column::CreditTransactionId
                    .is_in(transaction_ids.clone()),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for link in transfers {
            links.entry(link.credit_transaction_id).or_default().credit_transfer =
                Some(CreditTransferId::from_uuid(link.credit_transfer_id));
        }

        let reports = model_year_report_credit_transactions::Entity::find()
            .filter(
                model_year_report_credit_transactions::Column::CreditTransactionId
                    .is_in(transaction_ids.clone()),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for link in reports {
            links.entry(link.credit_transaction_id).or_default().model_year_report =
                Some(ModelYearReportId::from_uuid(link.model_year_report_id));
        }

        let agreement_links = credit_agreement_credit_transactions::Entity::find()
            .filter(
                credit_agreement_credit_transactions::Column::CreditTransactionId
                    .is_in(transaction_ids),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;
        if !agreement_links.is_empty() {
            let labels: HashMap<Uuid, String> = credit_agreements::Entity::find()
                .filter(
                    credit_agreements::Column::Id
                        .is_in(agreement_links.iter().map(|l| l.credit_agreement_id)),
                )
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|a| (a.id, a.transaction_type))
                .collect();

            for link in agreement_links {
                let label = labels
                    .get(&link.credit_agreement_id)
                    .cloned()
                    .unwrap_or_default();
                links.entry(link.credit_transaction_id).or_default().credit_agreement = Some((
                    CreditAgreementId::from_uuid(link.credit_agreement_id),
                    label,
                ));
            }
        }

        Ok(links)
    }
}
