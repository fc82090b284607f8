//! Ledger row access shared by every repository.
//!
//! All helpers are generic over `ConnectionTrait` so they run unchanged on a
//! pooled connection or inside a caller's transaction.

use chrono::{DateTime, Utc};
use creditledger_core::ledger::{
    BalanceKey, CreditBalance, CreditError, LedgerMovement, aggregate_credit_balances,
};
use creditledger_shared::types::{CreditTransactionId, OrganizationId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::credit_transactions;

/// Maps a storage error into the ledger error type.
pub(crate) fn db_err(e: DbErr) -> CreditError {
    CreditError::Database(e.to_string())
}

/// Every ledger row where `organization` is on either side.
pub(crate) async fn find_touching<C: ConnectionTrait>(
    conn: &C,
    organization: OrganizationId,
) -> Result<Vec<credit_transactions::Model>, CreditError> {
    let id = organization.into_inner();
    credit_transactions::Entity::find()
        .filter(
            Condition::any()
                .add(credit_transactions::Column::CreditToId.eq(id))
                .add(credit_transactions::Column::DebitFromId.eq(id)),
        )
        .order_by_asc(credit_transactions::Column::TransactionTimestamp)
        .all(conn)
        .await
        .map_err(db_err)
}

/// The balance-moving part of a ledger row.
pub(crate) fn movement(row: &credit_transactions::Model) -> LedgerMovement {
    LedgerMovement {
        credit_to: row.credit_to_id.map(OrganizationId::from_uuid),
        debit_from: row.debit_from_id.map(OrganizationId::from_uuid),
        key: BalanceKey::new(row.model_year_id, row.credit_class_id, row.weight_class_id),
        total_value: row.total_value,
    }
}

/// Bucket balances of `organization`, computed from its ledger rows.
///
/// # Errors
///
/// Returns `CreditError::Database` if the query fails.
pub async fn load_credit_balances<C: ConnectionTrait>(
    conn: &C,
    organization: OrganizationId,
) -> Result<Vec<CreditBalance>, CreditError> {
    let rows = find_touching(conn, organization).await?;
    let movements: Vec<LedgerMovement> = rows.iter().map(movement).collect();
    Ok(aggregate_credit_balances(organization, &movements))
}

/// A ledger row to append.
#[derive(Debug, Clone)]
pub(crate) struct NewEntry {
    pub credit_to: Option<OrganizationId>,
    pub debit_from: Option<OrganizationId>,
    pub key: BalanceKey,
    pub number_of_credits: i64,
    pub credit_value: Decimal,
    pub total_value: Decimal,
    pub transaction_type_id: i32,
    pub transaction_timestamp: DateTime<Utc>,
    pub user: String,
}

/// Appends one ledger row.
pub(crate) async fn insert_entry<C: ConnectionTrait>(
    conn: &C,
    entry: NewEntry,
    now: DateTime<Utc>,
) -> Result<credit_transactions::Model, CreditError> {
    let row = credit_transactions::ActiveModel {
        id: Set(CreditTransactionId::new().into_inner()),
        credit_to_id: Set(entry.credit_to.map(OrganizationId::into_inner)),
        debit_from_id: Set(entry.debit_from.map(OrganizationId::into_inner)),
        credit_class_id: Set(entry.key.credit_class_id),
        weight_class_id: Set(entry.key.weight_class_id),
        model_year_id: Set(entry.key.model_year_id),
        number_of_credits: Set(entry.number_of_credits),
        credit_value: Set(entry.credit_value),
        total_value: Set(entry.total_value),
        transaction_type_id: Set(entry.transaction_type_id),
        transaction_timestamp: Set(entry.transaction_timestamp.into()),
        create_user: Set(entry.user.clone()),
        update_user: Set(entry.user),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    row.insert(conn).await.map_err(db_err)
}
