//! `SeaORM` entities for the credit ledger schema.

pub mod credit_agreement_credit_transactions;
pub mod credit_agreements;
pub mod credit_classes;
pub mod credit_transaction_types;
pub mod credit_transactions;
pub mod credit_transfer_content;
pub mod credit_transfer_credit_transactions;
pub mod credit_transfers;
pub mod model_year_report_credit_transactions;
pub mod model_year_reports;
pub mod model_years;
pub mod organization_deficits;
pub mod organizations;
pub mod records_of_sale;
pub mod sales_submission_credit_transactions;
pub mod sales_submissions;
pub mod sea_orm_active_enums;
pub mod vehicles;
pub mod weight_classes;
