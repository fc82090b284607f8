//! Emissions credit ledger logic.
//!
//! This module implements the pure side of the ledger:
//! - Per-bucket balance aggregation and pending transfer merging
//! - Deficit reduction planning
//! - Transfer validation against a working balance copy
//! - Issuance planning for validated sales
//! - Compliance-year cutoff dates
//! - By-submission reporting
//! - Reference data and error types

pub mod balance;
pub mod deficit;
pub mod error;
pub mod fiscal;
pub mod issuance;
pub mod pending;
pub mod reference;
pub mod report;
pub mod transfer;
pub mod types;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod deficit_props;
#[cfg(test)]
mod transfer_props;

pub use balance::{CreditBalance, LedgerMovement, aggregate_credit_balances, net_total};
pub use deficit::{
    DeficitReduction, OutstandingDeficit, ReductionPlan, ReportSummary, plan_deficit_reductions,
    select_governing_report,
};
pub use error::CreditError;
pub use fiscal::{fiscal_cutoff_date, fiscal_cutoff_timestamp};
pub use issuance::{IssuanceLine, VehicleSales, count_sales_by_vehicle, plan_issuance};
pub use pending::{
    PendingBalance, PendingTransferLine, aggregate_pending_transfers, apply_pending_balances,
};
pub use reference::ReferenceData;
pub use report::{DetailLinks, DetailedEntry, SubmissionTransactionSummary, aggregate_by_submission};
pub use transfer::{BalanceLedger, TransferLine, TransferTotals, plan_transfer};
pub use types::{
    BalanceKey, CreditClassCode, CreditTransactionType, DetailSource, LDV_WEIGHT_CLASS,
    SYSTEM_USER, YearClassKey,
};
