//! Issuance planning for validated sales.

use std::collections::BTreeMap;

use creditledger_shared::types::VehicleId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::CreditClassCode;

/// Validated sales of one vehicle model, with its assessed credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSales {
    /// Vehicle sold.
    pub vehicle_id: VehicleId,
    /// Vehicle's model year reference id.
    pub model_year_id: i32,
    /// Credit class the vehicle earns.
    pub credit_class: CreditClassCode,
    /// Credits per unit.
    pub credit_value: Decimal,
    /// Number of validated records of sale.
    pub validated_count: u32,
}

/// One Validation entry to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceLine {
    /// Vehicle the credits are issued for.
    pub vehicle_id: VehicleId,
    /// Model year reference id.
    pub model_year_id: i32,
    /// Issued credit class, A or B.
    pub credit_class: CreditClassCode,
    /// Validated sales count.
    pub number_of_credits: u32,
    /// Credits per unit.
    pub credit_value: Decimal,
    /// `number_of_credits × credit_value`.
    pub total_value: Decimal,
}

/// Counts records of sale per vehicle, ordered by vehicle id.
#[must_use]
pub fn count_sales_by_vehicle<I>(vehicle_ids: I) -> BTreeMap<VehicleId, u32>
where
    I: IntoIterator<Item = VehicleId>,
{
    let mut counts = BTreeMap::new();
    for id in vehicle_ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Turns per-vehicle sales into issuance lines.
///
/// Vehicles outside classes A and B and vehicles with no validated sales
/// produce nothing. Output follows input order.
#[must_use]
pub fn plan_issuance(sales: &[VehicleSales]) -> Vec<IssuanceLine> {
    sales
        .iter()
        .filter(|s| s.credit_class.is_issuable() && s.validated_count > 0)
        .map(|s| IssuanceLine {
            vehicle_id: s.vehicle_id,
            model_year_id: s.model_year_id,
            credit_class: s.credit_class,
            number_of_credits: s.validated_count,
            credit_value: s.credit_value,
            total_value: Decimal::from(s.validated_count) * s.credit_value,
        })
        .collect()
}
