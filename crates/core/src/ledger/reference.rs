//! Fixed reference rows resolved once at startup.
//!
//! Transaction types, the LDV weight class, credit classes and model years
//! are seed data the ledger assumes always exist. They are read once into a
//! `ReferenceData` table instead of being re-queried on every operation.

use std::collections::{BTreeMap, HashMap};

use super::error::CreditError;
use super::types::{CreditTransactionType, LDV_WEIGHT_CLASS};

/// Immutable lookup table over the reference rows.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    transaction_type_ids: BTreeMap<CreditTransactionType, i32>,
    transaction_types: HashMap<i32, CreditTransactionType>,
    ldv_weight_class_id: i32,
    credit_class_ids: HashMap<String, i32>,
    credit_class_codes: HashMap<i32, String>,
    model_year_names: HashMap<i32, String>,
}

impl ReferenceData {
    /// Builds the table from `(id, name)` rows of each reference table.
    ///
    /// Unknown transaction type names are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::MissingReferenceData` if any of the five
    /// transaction types or the LDV weight class is absent.
    pub fn new<T, W, C, Y>(
        transaction_types: T,
        weight_classes: W,
        credit_classes: C,
        model_years: Y,
    ) -> Result<Self, CreditError>
    where
        T: IntoIterator<Item = (i32, String)>,
        W: IntoIterator<Item = (i32, String)>,
        C: IntoIterator<Item = (i32, String)>,
        Y: IntoIterator<Item = (i32, String)>,
    {
        let mut transaction_type_ids = BTreeMap::new();
        let mut by_id = HashMap::new();
        for (id, name) in transaction_types {
            if let Some(tt) = CreditTransactionType::from_name(&name) {
                transaction_type_ids.insert(tt, id);
                by_id.insert(id, tt);
            }
        }

        if let Some(missing) = CreditTransactionType::ALL
            .into_iter()
            .find(|tt| !transaction_type_ids.contains_key(tt))
        {
            return Err(CreditError::MissingReferenceData(format!(
                "credit transaction type {missing}"
            )));
        }

        let ldv_weight_class_id = weight_classes
            .into_iter()
            .find(|(_, code)| code == LDV_WEIGHT_CLASS)
            .map(|(id, _)| id)
            .ok_or_else(|| {
                CreditError::MissingReferenceData(format!("weight class {LDV_WEIGHT_CLASS}"))
            })?;

        let mut credit_class_ids = HashMap::new();
        let mut credit_class_codes = HashMap::new();
        for (id, code) in credit_classes {
            credit_class_ids.insert(code.clone(), id);
            credit_class_codes.insert(id, code);
        }

        Ok(Self {
            transaction_type_ids,
            transaction_types: by_id,
            ldv_weight_class_id,
            credit_class_ids,
            credit_class_codes,
            model_year_names: model_years.into_iter().collect(),
        })
    }

    /// Reference id of a transaction type.
    #[must_use]
    pub fn transaction_type_id(&self, transaction_type: CreditTransactionType) -> i32 {
        // Every variant is checked present in `new`.
        self.transaction_type_ids[&transaction_type]
    }

    /// Transaction type for a reference id, if it is one of the five.
    #[must_use]
    pub fn transaction_type(&self, id: i32) -> Option<CreditTransactionType> {
        self.transaction_types.get(&id).copied()
    }

    /// Reference id of the LDV weight class.
    #[must_use]
    pub const fn ldv_weight_class_id(&self) -> i32 {
        self.ldv_weight_class_id
    }

    /// Resolves a credit class code ("A", "B") to its reference id.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::MissingReferenceData` for unknown codes.
    pub fn credit_class_id(&self, code: &str) -> Result<i32, CreditError> {
        self.credit_class_ids
            .get(code)
            .copied()
            .ok_or_else(|| CreditError::MissingReferenceData(format!("credit class {code}")))
    }

    /// Code of a credit class reference id.
    #[must_use]
    pub fn credit_class_code(&self, id: i32) -> Option<&str> {
        self.credit_class_codes.get(&id).map(String::as_str)
    }

    /// Name of a model year reference id ("2023").
    #[must_use]
    pub fn model_year_name(&self, id: i32) -> Option<&str> {
        self.model_year_names.get(&id).map(String::as_str)
    }
}
