//! Business logic services

pub mod allocator;
pub mod fare;
pub mod parking;

use std::sync::Arc;

use crate::{config::FareConfig, repository::ParkingStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub parking: parking::ParkingService,
    pub fares: fare::FareCalculator,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn ParkingStore>, fare_config: FareConfig) -> Self {
        let fares = fare::FareCalculator::new(fare_config);
        Self {
            parking: parking::ParkingService::new(store, fares.clone()),
            fares,
        }
    }
}
