//! In-process ticket store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ParkingStore;
use crate::{
    config::FacilityConfig,
    error::AppResult,
    models::{ParkingSpot, Ticket, VehicleCategory},
};

#[derive(Debug, Default)]
struct State {
    spots: BTreeMap<i32, ParkingSpot>,
    tickets: Vec<Ticket>,
}

/// Keeps spots and tickets in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryParkingStore {
    state: Mutex<State>,
}

impl MemoryParkingStore {
    /// Store holding the given spots and no tickets
    pub fn with_spots(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let spots = spots.into_iter().map(|spot| (spot.id, spot)).collect();
        Self {
            state: Mutex::new(State {
                spots,
                tickets: Vec::new(),
            }),
        }
    }

    /// Store with every spot of the facility available
    pub fn for_facility(facility: &FacilityConfig) -> Self {
        Self::with_spots(
            facility
                .layout()
                .into_iter()
                .map(|(id, category)| ParkingSpot::new(id, category, true)),
        )
    }

    pub async fn get_parking_spot(&self, id: i32) -> Option<ParkingSpot> {
        self.state.lock().await.spots.get(&id).cloned()
    }

    /// Every ticket ever saved, oldest first
    pub async fn tickets(&self) -> Vec<Ticket> {
        self.state.lock().await.tickets.clone()
    }
}

#[async_trait]
impl ParkingStore for MemoryParkingStore {
    async fn get_next_available_slot(&self, category: VehicleCategory) -> AppResult<Option<i32>> {
        let state = self.state.lock().await;
        Ok(state
            .spots
            .values()
            .find(|spot| spot.is_available && spot.category == category)
            .map(|spot| spot.id))
    }

    async fn update_parking_spot(&self, spot: &ParkingSpot) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.spots.get_mut(&spot.id) {
            Some(stored) => {
                stored.is_available = spot.is_available;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if !state.spots.contains_key(&ticket.spot.id) {
            return Ok(false);
        }

        let id = i32::try_from(state.tickets.len() + 1).unwrap_or(i32::MAX);
        let mut ticket = ticket.clone();
        ticket.id = Some(id);
        state.tickets.push(ticket);
        Ok(true)
    }

    async fn get_ticket(&self, vehicle_registration_number: &str) -> AppResult<Option<Ticket>> {
        let state = self.state.lock().await;
        let ticket = state
            .tickets
            .iter()
            .filter(|t| t.vehicle_registration_number == vehicle_registration_number && t.is_open())
            .max_by_key(|t| (t.in_time, t.id))
            .cloned()
            .map(|mut ticket| {
                if let Some(spot) = state.spots.get(&ticket.spot.id) {
                    ticket.spot.is_available = spot.is_available;
                }
                ticket
            });
        Ok(ticket)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let stored = ticket
            .id
            .and_then(|id| state.tickets.iter_mut().find(|t| t.id == Some(id)));

        match stored {
            Some(stored) => {
                stored.out_time = ticket.out_time;
                stored.price = ticket.price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_ticket_count(&self, vehicle_registration_number: &str) -> AppResult<i64> {
        let state = self.state.lock().await;
        let count = state
            .tickets
            .iter()
            .filter(|t| t.vehicle_registration_number == vehicle_registration_number)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
