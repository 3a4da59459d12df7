//! Vehicle entry and exit workflows

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{EntryReceipt, ExitReceipt, Ticket},
    operator::OperatorInput,
    repository::ParkingStore,
};

use super::{allocator::SpotAllocator, fare::FareCalculator};

/// Tickets a vehicle must already hold to get the loyalty discount on exit
/// (the ticket being closed counts)
const LOYALTY_TICKET_THRESHOLD: i64 = 1;

#[derive(Clone)]
pub struct ParkingService {
    store: Arc<dyn ParkingStore>,
    allocator: SpotAllocator,
    fares: FareCalculator,
}

impl ParkingService {
    pub fn new(store: Arc<dyn ParkingStore>, fares: FareCalculator) -> Self {
        Self {
            allocator: SpotAllocator::new(store.clone()),
            store,
            fares,
        }
    }

    /// Park an incoming vehicle.
    ///
    /// Returns `Ok(None)` when the operator picked no valid vehicle type.
    /// A vehicle that already has an open ticket is not refused.
    pub async fn process_incoming_vehicle(
        &self,
        operator: &mut dyn OperatorInput,
    ) -> AppResult<Option<EntryReceipt>> {
        let Some(category) = self.allocator.category_for_selection(operator.read_selection()) else {
            return Ok(None);
        };

        let mut spot = self
            .allocator
            .next_available_spot(category)
            .await?
            .ok_or(AppError::CapacityExhausted(category))?;

        let registration = operator.read_vehicle_registration_number()?;
        let returning_customer = self.store.get_ticket_count(&registration).await? > 0;

        spot.is_available = false;
        if !self.store.update_parking_spot(&spot).await? {
            tracing::error!("Unable to reserve spot {} for {}", spot.id, registration);
            return Err(AppError::Persistence(format!("spot {} was not reserved", spot.id)));
        }

        let ticket = Ticket::open(registration, spot, Utc::now());
        let saved = self.store.save_ticket(&ticket).await;
        if !matches!(saved, Ok(true)) {
            tracing::error!(
                "Unable to save ticket of {}, spot {} stays reserved",
                ticket.vehicle_registration_number,
                ticket.spot.id
            );
            saved?;
            return Err(AppError::Persistence(format!(
                "ticket of {} was not saved",
                ticket.vehicle_registration_number
            )));
        }

        tracing::info!(
            registration = %ticket.vehicle_registration_number,
            spot = ticket.spot.id,
            returning_customer,
            "Vehicle parked"
        );

        Ok(Some(EntryReceipt {
            ticket,
            returning_customer,
        }))
    }

    /// Bill and release an exiting vehicle.
    ///
    /// The spot is only released once the billed ticket is stored.
    pub async fn process_exiting_vehicle(&self, operator: &mut dyn OperatorInput) -> AppResult<ExitReceipt> {
        let registration = operator.read_vehicle_registration_number()?;

        let mut ticket = self
            .store
            .get_ticket(&registration)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no open ticket for {}", registration)))?;

        let discount_applied = self.store.get_ticket_count(&registration).await? > LOYALTY_TICKET_THRESHOLD;

        ticket.out_time = Some(Utc::now());
        self.fares.calculate_fare(&mut ticket, discount_applied)?;

        if !self.store.update_ticket(&ticket).await? {
            tracing::error!(
                "Unable to update ticket of {}, spot {} is not released",
                registration,
                ticket.spot.id
            );
            return Err(AppError::Persistence(format!(
                "ticket of {} was not updated",
                registration
            )));
        }

        ticket.spot.is_available = true;
        if !self.store.update_parking_spot(&ticket.spot).await? {
            tracing::error!("Ticket of {} is billed but spot {} was not released", registration, ticket.spot.id);
            return Err(AppError::Persistence(format!("spot {} was not released", ticket.spot.id)));
        }

        tracing::info!(
            registration = %registration,
            spot = ticket.spot.id,
            price = %ticket.price,
            discount_applied,
            "Vehicle exited"
        );

        Ok(ExitReceipt {
            ticket,
            discount_applied,
        })
    }
}
