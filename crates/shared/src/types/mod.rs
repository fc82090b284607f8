//! Common types used across the ledger.

pub mod id;

pub use id::*;

#[cfg(test)]
mod id_tests;
