//! Shared domain enums

use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// VehicleCategory
// ---------------------------------------------------------------------------

/// Kind of vehicle a parking spot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Car,
    Bike,
}

impl VehicleCategory {
    /// Every category the facility knows about, in spot-numbering order
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Car, VehicleCategory::Bike];

    /// Storage representation (`parking.type` column)
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Car => "CAR",
            VehicleCategory::Bike => "BIKE",
        }
    }

    /// Operator menu code: 1 = car, 2 = bike
    pub fn from_selection(code: i32) -> Option<Self> {
        match code {
            1 => Some(VehicleCategory::Car),
            2 => Some(VehicleCategory::Bike),
            _ => None,
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleCategory::Car),
            "BIKE" => Ok(VehicleCategory::Bike),
            _ => Err(AppError::UnsupportedCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
