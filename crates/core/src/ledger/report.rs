//! Per-submission transaction detail for reporting.
//!
//! Every ledger entry is explained by exactly one business event: a sales
//! submission, a credit transfer, a credit agreement or a model-year report.
//! The fold groups entries by that event so a supplier can see which
//! submission produced which credits.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use creditledger_shared::types::{
    CreditAgreementId, CreditTransferId, ModelYearReportId, OrganizationId, SalesSubmissionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{CreditTransactionType, DetailSource};

/// Link-table rows found for one ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLinks {
    /// Linked sales submission.
    pub sales_submission: Option<SalesSubmissionId>,
    /// Linked credit transfer.
    pub credit_transfer: Option<CreditTransferId>,
    /// Linked credit agreement and its transaction type label.
    pub credit_agreement: Option<(CreditAgreementId, String)>,
    /// Linked model-year report.
    pub model_year_report: Option<ModelYearReportId>,
}

impl DetailLinks {
    /// Id of the event that explains an entry of `transaction_type`.
    #[must_use]
    pub fn foreign_key(&self, transaction_type: CreditTransactionType) -> Option<Uuid> {
        match transaction_type.detail_source() {
            DetailSource::SalesSubmission => self.sales_submission.map(SalesSubmissionId::into_inner),
            DetailSource::CreditTransfer => self.credit_transfer.map(CreditTransferId::into_inner),
            DetailSource::CreditAgreement => {
                self.credit_agreement.as_ref().map(|(id, _)| id.into_inner())
            }
            DetailSource::ModelYearReport => {
                self.model_year_report.map(ModelYearReportId::into_inner)
            }
        }
    }

    /// Agreement label for credit adjustments, `None` otherwise.
    #[must_use]
    pub fn detail_transaction_type(&self, transaction_type: CreditTransactionType) -> Option<String> {
        match transaction_type.detail_source() {
            DetailSource::CreditAgreement => {
                self.credit_agreement.as_ref().map(|(_, label)| label.clone())
            }
            _ => None,
        }
    }
}

/// A ledger entry with its detail links resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedEntry {
    /// Receiving organization.
    pub credit_to: Option<OrganizationId>,
    /// Paying organization.
    pub debit_from: Option<OrganizationId>,
    /// Credit class reference id.
    pub credit_class_id: i32,
    /// Model year reference id.
    pub model_year_id: i32,
    /// Entry type.
    pub transaction_type: CreditTransactionType,
    /// Entry value.
    pub total_value: Decimal,
    /// Effective date of the entry.
    pub transaction_timestamp: DateTime<Utc>,
    /// Link-table rows.
    pub links: DetailLinks,
}

/// One row of the by-submission report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTransactionSummary {
    /// Credit class reference id.
    pub credit_class_id: i32,
    /// Entry type.
    pub transaction_type: CreditTransactionType,
    /// Model year reference id.
    pub model_year_id: i32,
    /// Id of the explaining submission, transfer, agreement or report.
    pub foreign_key: Option<Uuid>,
    /// Agreement label for credit adjustments.
    pub detail_transaction_type: Option<String>,
    /// Sum credited to the organization.
    pub credit: Decimal,
    /// Sum debited from the organization.
    pub debit: Decimal,
    /// `credit - debit`.
    pub total_value: Decimal,
    /// Latest entry timestamp in the group.
    pub transaction_timestamp: DateTime<Utc>,
}

type GroupKey = (i32, CreditTransactionType, i32, Option<Uuid>, Option<String>);

/// Groups entries touching `organization` by credit class, transaction type,
/// model year and explaining event.
///
/// Rows are ordered by credit class, then transaction type in reporting
/// order, then model year and event id.
#[must_use]
pub fn aggregate_by_submission<'a, I>(
    organization: OrganizationId,
    entries: I,
) -> Vec<SubmissionTransactionSummary>
where
    I: IntoIterator<Item = &'a DetailedEntry>,
{
    let mut groups: BTreeMap<GroupKey, SubmissionTransactionSummary> = BTreeMap::new();

    for entry in entries {
        let credited = entry.credit_to == Some(organization);
        let debited = entry.debit_from == Some(organization);
        if !credited && !debited {
            continue;
        }

        let foreign_key = entry.links.foreign_key(entry.transaction_type);
        let detail_transaction_type = entry.links.detail_transaction_type(entry.transaction_type);
        let key = (
            entry.credit_class_id,
            entry.transaction_type,
            entry.model_year_id,
            foreign_key,
            detail_transaction_type.clone(),
        );

        let row = groups
            .entry(key)
            .or_insert_with(|| SubmissionTransactionSummary {
                credit_class_id: entry.credit_class_id,
                transaction_type: entry.transaction_type,
                model_year_id: entry.model_year_id,
                foreign_key,
                detail_transaction_type,
                credit: Decimal::ZERO,
                debit: Decimal::ZERO,
                total_value: Decimal::ZERO,
                transaction_timestamp: entry.transaction_timestamp,
            });

        if credited {
            row.credit += entry.total_value;
        }
        if debited {
            row.debit += entry.total_value;
        }
        row.total_value = row.credit - row.debit;
        row.transaction_timestamp = row.transaction_timestamp.max(entry.transaction_timestamp);
    }

    groups.into_values().collect()
}
