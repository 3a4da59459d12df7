//! Parking spot allocation

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ParkingSpot, VehicleCategory},
    repository::ParkingStore,
};

#[derive(Clone)]
pub struct SpotAllocator {
    store: Arc<dyn ParkingStore>,
}

impl SpotAllocator {
    pub fn new(store: Arc<dyn ParkingStore>) -> Self {
        Self { store }
    }

    /// Category picked in the operator menu. Unknown codes give `None` so
    /// the operator can simply try again.
    pub fn category_for_selection(&self, selection: i32) -> Option<VehicleCategory> {
        let category = VehicleCategory::from_selection(selection);
        if category.is_none() {
            tracing::debug!("Ignoring invalid vehicle type selection {}", selection);
        }
        category
    }

    /// Lowest-numbered free spot of `category`, still marked available.
    /// `None` means the facility is full for that category.
    pub async fn next_available_spot(&self, category: VehicleCategory) -> AppResult<Option<ParkingSpot>> {
        let spot = self
            .store
            .get_next_available_slot(category)
            .await?
            .filter(|id| *id > 0)
            .map(|id| ParkingSpot::new(id, category, true));

        match &spot {
            Some(spot) => tracing::debug!("Next available {} spot is {}", category, spot.id),
            None => tracing::debug!("No {} spot available", category),
        }
        Ok(spot)
    }
}
