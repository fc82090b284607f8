//! Credit class and per-unit value of a zero-emission vehicle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::types::CreditClassCode;

/// Electric range at or above which an EREV earns class A credits.
pub const EREV_CLASS_A_MIN_RANGE_KM: u32 = 121;

/// Electric range at or above which a PHEV or EREV earns class B credits.
pub const CLASS_B_MIN_RANGE_KM: u32 = 16;

/// Base credit per vehicle.
const BASE_CREDIT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Credit per km of electric range.
const CREDIT_PER_KM: Decimal = Decimal::from_parts(6, 0, 0, false, 3);

/// Upper bound of the per-unit credit.
const MAX_CREDIT: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Zero-emission vehicle technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZevType {
    /// Battery electric.
    Bev,
    /// Hydrogen fuel cell.
    Fcev,
    /// Extended-range electric.
    Erev,
    /// Plug-in hybrid.
    Phev,
}

impl ZevType {
    /// Stored code ("BEV").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bev => "BEV",
            Self::Fcev => "FCEV",
            Self::Erev => "EREV",
            Self::Phev => "PHEV",
        }
    }
}

/// The attributes credit assessment reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    /// Technology.
    pub zev_type: ZevType,
    /// Electric range in km.
    pub range_km: u32,
}

impl VehicleAttributes {
    /// Credit class earned by one sale.
    #[must_use]
    pub const fn credit_class(&self) -> CreditClassCode {
        match self.zev_type {
            ZevType::Bev | ZevType::Fcev => CreditClassCode::A,
            ZevType::Erev if self.range_km >= EREV_CLASS_A_MIN_RANGE_KM => CreditClassCode::A,
            ZevType::Erev | ZevType::Phev if self.range_km >= CLASS_B_MIN_RANGE_KM => {
                CreditClassCode::B
            }
            _ => CreditClassCode::C,
        }
    }

    /// Credits earned by one sale, capped at 4 and rounded to 2 places.
    #[must_use]
    pub fn credit_value(&self) -> Decimal {
        let raw = BASE_CREDIT + CREDIT_PER_KM * Decimal::from(self.range_km);
        raw.min(MAX_CREDIT).round_dp(2)
    }
}

/// Class and per-unit value of a vehicle.
#[must_use]
pub fn assess_vehicle_credit(attributes: &VehicleAttributes) -> (CreditClassCode, Decimal) {
    (attributes.credit_class(), attributes.credit_value())
}
