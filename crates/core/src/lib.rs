//! Core business logic for the emissions credit ledger.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! Repositories load ledger rows, hand them to the planners here, and
//! persist what comes back.
//!
//! # Modules
//!
//! - `ledger` - Balances, deficits, transfers, issuance and reporting
//! - `vehicle` - Credit class and value of a vehicle

pub mod ledger;
pub mod vehicle;
