//! Ticket store: the persistence boundary of the parking services

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    error::AppResult,
    models::{ParkingSpot, Ticket, VehicleCategory},
};

pub use memory::MemoryParkingStore;
pub use postgres::PgParkingStore;

/// Capabilities the parking services need from storage.
///
/// Write operations report `Ok(false)` when the store did not confirm the
/// write; `Err` is reserved for the store itself failing.
#[automock]
#[async_trait]
pub trait ParkingStore: Send + Sync {
    /// Lowest-numbered available spot of `category`, if any
    async fn get_next_available_slot(&self, category: VehicleCategory) -> AppResult<Option<i32>>;

    /// Persist the availability of a spot
    async fn update_parking_spot(&self, spot: &ParkingSpot) -> AppResult<bool>;

    /// Insert a new ticket
    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool>;

    /// Most recent open ticket of a vehicle
    async fn get_ticket(&self, vehicle_registration_number: &str) -> AppResult<Option<Ticket>>;

    /// Persist out time and price of an existing ticket
    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool>;

    /// Number of tickets ever issued to a vehicle, open ones included
    async fn get_ticket_count(&self, vehicle_registration_number: &str) -> AppResult<i64>;
}
