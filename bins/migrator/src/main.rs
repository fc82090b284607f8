//! Schema migration runner for the credit ledger.
//!
//! Usage:
//!   migrator up      - Create the ledger tables and seed reference rows
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The target database is read from `DATABASE_URL`.

use creditledger_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
