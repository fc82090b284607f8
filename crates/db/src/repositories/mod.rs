//! Repository abstractions for data access.
//!
//! Repositories load ledger rows through `SeaORM`, hand them to the pure
//! planners in `creditledger-core` and persist the results.

pub mod credit_transaction;
pub mod credit_transfer;
pub mod deficit;
pub mod ledger;
pub mod reference;
pub mod sales_submission;

pub use credit_transaction::CreditTransactionRepository;
pub use credit_transfer::{CreditTransferRepository, TransferOutcome, load_pending_balances};
pub use deficit::adjust_deficits;
pub use ledger::load_credit_balances;
pub use reference::ReferenceRepository;
pub use sales_submission::{AwardOutcome, SalesSubmissionRepository};
