//! Vehicle credit assessment.

pub mod credit;

pub use credit::{VehicleAttributes, ZevType, assess_vehicle_credit};
