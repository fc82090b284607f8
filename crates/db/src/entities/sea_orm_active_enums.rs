//! String-backed enums stored in status columns.

use creditledger_core::vehicle::ZevType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a model-year report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ModelYearReportStatus {
    /// Being prepared by the supplier.
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Sent to the government.
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    /// Recommended by an analyst.
    #[sea_orm(string_value = "RECOMMENDED")]
    Recommended,
    /// Final assessment issued.
    #[sea_orm(string_value = "ASSESSED")]
    Assessed,
    /// Returned to the supplier.
    #[sea_orm(string_value = "RETURNED")]
    Returned,
    /// Withdrawn.
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

/// Validation outcome of a record of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RecordOfSaleStatus {
    /// Not yet checked.
    #[sea_orm(string_value = "UNCHECKED")]
    Unchecked,
    /// Eligible for credits.
    #[sea_orm(string_value = "VALIDATED")]
    Validated,
    /// Not eligible.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Lifecycle of a credit transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum CreditTransferStatus {
    /// Being prepared by the initiator.
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Sent to the receiving supplier.
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    /// Analyst recommends approval.
    #[sea_orm(string_value = "RECOMMEND_APPROVAL")]
    RecommendApproval,
    /// Analyst recommends rejection.
    #[sea_orm(string_value = "RECOMMEND_REJECTION")]
    RecommendRejection,
    /// Accepted by the receiving supplier.
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Declined by the receiving supplier.
    #[sea_orm(string_value = "DISAPPROVED")]
    Disapproved,
    /// Executed on the ledger.
    #[sea_orm(string_value = "VALIDATED")]
    Validated,
    /// Rejected by the government.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// Withdrawn by the initiator.
    #[sea_orm(string_value = "RESCINDED")]
    Rescinded,
    /// Discarded draft.
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

impl CreditTransferStatus {
    /// Statuses whose content still counts against the initiator's balance.
    pub const PENDING: [Self; 4] = [
        Self::Submitted,
        Self::RecommendApproval,
        Self::RecommendRejection,
        Self::Approved,
    ];
}

/// Vehicle technology column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum VehicleZevType {
    /// Battery electric.
    #[sea_orm(string_value = "BEV")]
    Bev,
    /// Hydrogen fuel cell.
    #[sea_orm(string_value = "FCEV")]
    Fcev,
    /// Extended-range electric.
    #[sea_orm(string_value = "EREV")]
    Erev,
    /// Plug-in hybrid.
    #[sea_orm(string_value = "PHEV")]
    Phev,
}

impl From<VehicleZevType> for ZevType {
    fn from(value: VehicleZevType) -> Self {
        match value {
            VehicleZevType::Bev => Self::Bev,
            VehicleZevType::Fcev => Self::Fcev,
            VehicleZevType::Erev => Self::Erev,
            VehicleZevType::Phev => Self::Phev,
        }
    }
}
