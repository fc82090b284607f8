//! Credit ledger error types.
//!
//! Three kinds of failure cross this boundary: business-rule violations
//! raised to the end user verbatim, missing reference data (a fatal
//! configuration problem), and storage faults.

use creditledger_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Message shown to the user when a transfer cannot be covered.
pub const INSUFFICIENT_CREDITS_MESSAGE: &str =
    "Supplier has insufficient credits to fulfil this transfer.";

/// Errors that can occur during credit ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditError {
    // ========== Business Rule Errors ==========
    /// The initiating supplier cannot cover a transfer line.
    #[error("Supplier has insufficient credits to fulfil this transfer.")]
    InsufficientCredits,

    // ========== Reference Data Errors ==========
    /// A fixed reference row (transaction type, weight class, credit class)
    /// is absent from the store.
    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    // ========== Lookup Errors ==========
    /// Sales submission not found.
    #[error("Sales submission not found: {0}")]
    SubmissionNotFound(Uuid),

    /// Credit transfer not found.
    #[error("Credit transfer not found: {0}")]
    TransferNotFound(Uuid),

    /// Vehicle referenced by a record of sale not found.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(Uuid),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CreditError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",
            Self::MissingReferenceData(_) => "MISSING_REFERENCE_DATA",
            Self::SubmissionNotFound(_) => "SUBMISSION_NOT_FOUND",
            Self::TransferNotFound(_) => "TRANSFER_NOT_FOUND",
            Self::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientCredits => 422,
            Self::SubmissionNotFound(_) | Self::TransferNotFound(_) | Self::VehicleNotFound(_) => {
                404
            }
            Self::MissingReferenceData(_) | Self::Database(_) => 500,
        }
    }

    /// Returns true for violations the end user can act on.
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::InsufficientCredits)
    }
}

impl From<CreditError> for AppError {
    fn from(err: CreditError) -> Self {
        match err {
            CreditError::InsufficientCredits => Self::BusinessRule(err.to_string()),
            CreditError::MissingReferenceData(what) => Self::Configuration(what),
            CreditError::SubmissionNotFound(_)
            | CreditError::TransferNotFound(_)
            | CreditError::VehicleNotFound(_) => Self::NotFound(err.to_string()),
            CreditError::Database(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_error_codes() {
        assert_eq!(CreditError::InsufficientCredits.error_code(), "INSUFFICIENT_CREDITS");
        assert_eq!(
            CreditError::MissingReferenceData("LDV".into()).error_code(),
            "MISSING_REFERENCE_DATA"
        );
        assert_eq!(
            CreditError::TransferNotFound(Uuid::nil()).error_code(),
            "TRANSFER_NOT_FOUND"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(CreditError::InsufficientCredits.http_status_code(), 422);
        assert_eq!(CreditError::SubmissionNotFound(Uuid::nil()).http_status_code(), 404);
        assert_eq!(
            CreditError::MissingReferenceData("x".into()).http_status_code(),
            500
        );
        assert_eq!(CreditError::Database("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_insufficient_credits_message_is_verbatim() {
        assert_eq!(
            CreditError::InsufficientCredits.to_string(),
            INSUFFICIENT_CREDITS_MESSAGE
        );
        assert!(CreditError::InsufficientCredits.is_business_rule());
        assert!(!CreditError::Database("x".into()).is_business_rule());
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = CreditError::InsufficientCredits.into();
        assert_eq!(app.status_code(), 422);
        assert_eq!(
            app.to_string(),
            format!("Business rule violation: {INSUFFICIENT_CREDITS_MESSAGE}")
        );

        let app: AppError = CreditError::MissingReferenceData("weight class LDV".into()).into();
        assert_eq!(app.error_code(), "CONFIGURATION_ERROR");

        let app: AppError = CreditError::VehicleNotFound(Uuid::nil()).into();
        assert_eq!(app.status_code(), 404);
    }

    #[rstest]
    #[case::insufficient(CreditError::InsufficientCredits)]
    #[case::missing_reference(CreditError::MissingReferenceData("LDV".into()))]
    #[case::submission(CreditError::SubmissionNotFound(Uuid::nil()))]
    #[case::transfer(CreditError::TransferNotFound(Uuid::nil()))]
    #[case::vehicle(CreditError::VehicleNotFound(Uuid::nil()))]
    #[case::database(CreditError::Database("x".into()))]
    fn test_status_code_survives_into_app_error(#[case] err: CreditError) {
        let status = err.http_status_code();
        let app: AppError = err.into();
        assert_eq!(app.status_code(), status);
    }
}
