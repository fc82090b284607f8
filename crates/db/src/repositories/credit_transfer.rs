//! Credit transfer repository.
//!
//! Executes a transfer between two suppliers: checks the initiator can cover
//! every content line, writes one Credit Transfer entry per (model year,
//! credit class) and lets the receiver's deficits absorb the new credits.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use creditledger_core::ledger::{
    BalanceKey, CreditError, CreditTransactionType, PendingBalance, PendingTransferLine,
    ReductionPlan, ReferenceData, TransferLine, TransferTotals, aggregate_pending_transfers,
    plan_transfer,
};
use creditledger_shared::types::{CreditTransferId, OrganizationId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::deficit::adjust_deficits;
use super::ledger::{NewEntry, db_err, insert_entry, load_credit_balances};
use crate::entities::{
    credit_transactions, credit_transfer_content, credit_transfer_credit_transactions,
    credit_transfers, sea_orm_active_enums::CreditTransferStatus,
};

/// Result of executing a transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Ledger rows written for the transfer, by model year then credit class.
    pub transactions: Vec<credit_transactions::Model>,
    /// Content totals by (model year, credit class) and by credit class.
    pub totals: TransferTotals,
    /// Deficit reductions applied to the receiver, `None` without an
    /// assessed report or when nothing was written.
    pub reduction: Option<ReductionPlan>,
}

/// Credit transfer repository.
#[derive(Debug, Clone)]
pub struct CreditTransferRepository {
    db: DatabaseConnection,
    reference: Arc<ReferenceData>,
}

impl CreditTransferRepository {
    /// Creates a new credit transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, reference: Arc<ReferenceData>) -> Self {
        Self { db, reference }
    }

    // ========================================================================
    // Pending transfers
    // ========================================================================

    /// Negated per-bucket sums of `organization`'s outgoing transfers that
    /// are submitted, recommended or approved but not yet on the ledger.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Database` if a query fails.
    pub async fn aggregate_credit_transfer_details(
        &self,
        organization: OrganizationId,
    ) -> Result<Vec<PendingBalance>, CreditError> {
        load_pending_balances(&self.db, organization).await
    }

    // ========================================================================
    // Transfer execution
    // ========================================================================

    /// Validates and executes a transfer in its own database transaction.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InsufficientCredits` if any content line cannot
    /// be covered; nothing is written then. See [`Self::validate_transfer_in`].
    pub async fn validate_transfer(
        &self,
        transfer_id: CreditTransferId,
    ) -> Result<TransferOutcome, CreditError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let outcome = self.validate_transfer_in(&txn, transfer_id, Utc::now()).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(outcome)
    }

    /// Validates and executes a transfer on the caller's connection.
    ///
    /// The caller owns atomicity: on error, partial writes must be rolled
    /// back by dropping the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::TransferNotFound` for an unknown id,
    /// `CreditError::InsufficientCredits` if a line cannot be covered,
    /// `CreditError::Database` if a query fails.
    pub async fn validate_transfer_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        transfer_id: CreditTransferId,
        now: DateTime<Utc>,
    ) -> Result<TransferOutcome, CreditError> {
        let transfer = credit_transfers::Entity::find_by_id(transfer_id.into_inner())
            .one(conn)
            .await
            .map_err(db_err)?
            .ok_or(CreditError::TransferNotFound(transfer_id.into_inner()))?;

        let initiator = OrganizationId::from_uuid(transfer.debit_from_id);
        let receiver = OrganizationId::from_uuid(transfer.credit_to_id);

        let content = credit_transfer_content::Entity::find()
            .filter(credit_transfer_content::Column::CreditTransferId.eq(transfer.id))
            .order_by_asc(credit_transfer_content::Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        let lines: Vec<TransferLine> = content
            .iter()
            .map(|c| TransferLine {
                key: BalanceKey::new(c.model_year_id, c.credit_class_id, c.weight_class_id),
                credit_value: c.credit_value,
            })
            .collect();

        let balances = load_credit_balances(conn, initiator).await?;
        let totals = plan_transfer(&balances, &lines).inspect_err(|e| {
            warn!(
                transfer_id = %transfer_id,
                organization_id = %initiator,
                error = %e,
                "Transfer rejected"
            );
        })?;

        let transfer_type_id = self
            .reference
            .transaction_type_id(CreditTransactionType::CreditTransfer);
        let weight_class_id = self.reference.ldv_weight_class_id();

        let mut transactions = Vec::with_capacity(totals.by_year_and_class.len());
        for (key, value) in &totals.by_year_and_class {
            let entry = insert_entry(
                conn,
                NewEntry {
                    credit_to: Some(receiver),
                    debit_from: Some(initiator),
                    key: BalanceKey::new(key.model_year_id, key.credit_class_id, weight_class_id),
                    number_of_credits: 1,
                    credit_value: *value,
                    total_value: *value,
                    transaction_type_id: transfer_type_id,
                    transaction_timestamp: now,
                    user: transfer.update_user.clone(),
                },
                now,
            )
            .await?;

            credit_transfer_credit_transactions::ActiveModel {
                id: Set(Uuid::now_v7()),
                credit_transfer_id: Set(transfer.id),
                credit_transaction_id: Set(entry.id),
                create_user: Set(transfer.update_user.clone()),
                update_user: Set(transfer.update_user.clone()),
                created_at: Set(now.into()),
            }
            .insert(conn)
            .await
            .map_err(db_err)?;

            transactions.push(entry);
        }

        let reduction = if transactions.is_empty() {
            None
        } else {
            adjust_deficits(conn, &self.reference, receiver, now).await?
        };

        info!(
            transfer_id = %transfer_id,
            from = %initiator,
            to = %receiver,
            entries = transactions.len(),
            "Transfer recorded"
        );

        Ok(TransferOutcome {
            transactions,
            totals,
            reduction,
        })
    }
}

/// Pending balances of `organization` from its in-flight outgoing transfers.
///
/// # Errors
///
/// Returns `CreditError::Database` if a query fails.
pub async fn load_pending_balances<C: ConnectionTrait>(
    conn: &C,
    organization: OrganizationId,
) -> Result<Vec<PendingBalance>, CreditError> {
    let transfer_ids: Vec<Uuid> = credit_transfers::Entity::find()
        .filter(credit_transfers::Column::DebitFromId.eq(organization.into_inner()))
        .filter(credit_transfers::Column::Status.is_in(CreditTransferStatus::PENDING))
        .all(conn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|t| t.id)
        .collect();

    if transfer_ids.is_empty() {
        return Ok(Vec::new());
    }

    let lines: Vec<PendingTransferLine> = credit_transfer_content::Entity::find()
        .filter(credit_transfer_content::Column::CreditTransferId.is_in(transfer_ids))
        .all(conn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|c| PendingTransferLine {
            key: BalanceKey::new(c.model_year_id, c.credit_class_id, c.weight_class_id),
            credit_value: c.credit_value,
        })
        .collect();

    Ok(aggregate_pending_transfers(&lines))
}
