//! Reference data repository.

use creditledger_core::ledger::{CreditError, ReferenceData};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

use super::ledger::db_err;
use crate::entities::{credit_classes, credit_transaction_types, model_years, weight_classes};

/// Loads the fixed reference rows once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: DatabaseConnection,
}

impl ReferenceRepository {
    /// Creates a new reference repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads the four reference tables into a lookup table.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::MissingReferenceData` if a transaction type or
    /// the LDV weight class is absent, `CreditError::Database` if a query
    /// fails.
    pub async fn load(&self) -> Result<ReferenceData, CreditError> {
        let transaction_types = credit_transaction_types::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let weight_classes = weight_classes::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let credit_classes = credit_classes::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let model_years = model_years::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        info!(
            transaction_types = transaction_types.len(),
            credit_classes = credit_classes.len(),
            model_years = model_years.len(),
            "Loaded reference data"
        );

        ReferenceData::new(
            transaction_types
                .into_iter()
                .map(|t| (t.id, t.transaction_type)),
            weight_classes
                .into_iter()
                .map(|w| (w.id, w.weight_class_code)),
            credit_classes.into_iter().map(|c| (c.id, c.credit_class)),
            model_years.into_iter().map(|y| (y.id, y.name)),
        )
    }
}
