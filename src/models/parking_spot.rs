//! Parking spot model

use super::enums::VehicleCategory;

/// A physical spot in the facility. The pool is fixed at initialization;
/// only `is_available` changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    pub id: i32,
    pub category: VehicleCategory,
    pub is_available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, category: VehicleCategory, is_available: bool) -> Self {
        Self {
            id,
            category,
            is_available,
        }
    }
}
