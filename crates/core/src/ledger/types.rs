//! Credit ledger domain types.
//!
//! Keys, the fixed transaction-type vocabulary, and credit class codes used
//! by every aggregation in this crate.

use serde::{Deserialize, Serialize};

/// Audit user recorded on entries the ledger creates on its own.
pub const SYSTEM_USER: &str = "SYSTEM";

/// The only weight class this program issues or transfers credits in.
pub const LDV_WEIGHT_CLASS: &str = "LDV";

/// Kind of credit movement recorded by a ledger entry.
///
/// The declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditTransactionType {
    /// Issuance from validated vehicle sales.
    Validation,
    /// Deficit paid down from a positive balance.
    Reduction,
    /// Movement between two suppliers.
    CreditTransfer,
    /// Credits granted by a credit agreement.
    CreditAdjustmentValidation,
    /// Credits removed by a credit agreement.
    CreditAdjustmentReduction,
}

impl CreditTransactionType {
    /// Every transaction type, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Validation,
        Self::Reduction,
        Self::CreditTransfer,
        Self::CreditAdjustmentValidation,
        Self::CreditAdjustmentReduction,
    ];

    /// The name stored in the transaction type reference table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Reduction => "Reduction",
            Self::CreditTransfer => "Credit Transfer",
            Self::CreditAdjustmentValidation => "Credit Adjustment Validation",
            Self::CreditAdjustmentReduction => "Credit Adjustment Reduction",
        }
    }

    /// Parses a reference table name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Which business event table explains an entry of this type.
    #[must_use]
    pub const fn detail_source(self) -> DetailSource {
        match self {
            Self::Validation => DetailSource::SalesSubmission,
            Self::Reduction => DetailSource::ModelYearReport,
            Self::CreditTransfer => DetailSource::CreditTransfer,
            Self::CreditAdjustmentValidation | Self::CreditAdjustmentReduction => {
                DetailSource::CreditAgreement
            }
        }
    }
}

impl std::fmt::Display for CreditTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Link table a ledger entry is dereferenced through for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailSource {
    /// `sales_submission_credit_transactions`.
    SalesSubmission,
    /// `credit_transfer_credit_transactions`.
    CreditTransfer,
    /// `credit_agreement_credit_transactions`.
    CreditAgreement,
    /// `model_year_report_credit_transactions`.
    ModelYearReport,
}

/// Balance bucket: the grouping key of every balance aggregation.
///
/// Field order is the sort order (model year, credit class, weight class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BalanceKey {
    /// Model year reference id.
    pub model_year_id: i32,
    /// Credit class reference id.
    pub credit_class_id: i32,
    /// Weight class reference id.
    pub weight_class_id: i32,
}

impl BalanceKey {
    /// Creates a bucket key.
    #[must_use]
    pub const fn new(model_year_id: i32, credit_class_id: i32, weight_class_id: i32) -> Self {
        Self {
            model_year_id,
            credit_class_id,
            weight_class_id,
        }
    }
}

/// Transfer accumulation key: model year then credit class, weight class ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearClassKey {
    /// Model year reference id.
    pub model_year_id: i32,
    /// Credit class reference id.
    pub credit_class_id: i32,
}

/// Credit class a vehicle earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditClassCode {
    /// Long-range zero-emission vehicles.
    A,
    /// Plug-in hybrids and short-range extended-range vehicles.
    B,
    /// Everything else; never issued.
    C,
}

impl CreditClassCode {
    /// The code stored in the credit class reference table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Only A and B credits are issued on sales.
    #[must_use]
    pub const fn is_issuable(self) -> bool {
        matches!(self, Self::A | Self::B)
    }
}

impl std::fmt::Display for CreditClassCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
