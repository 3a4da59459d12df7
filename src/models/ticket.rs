//! Ticket model and workflow receipts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::parking_spot::ParkingSpot;

/// A single visit of a vehicle. Created on entry, completed on exit and
/// kept afterwards as history for loyalty lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Assigned by the store when the ticket is saved
    pub id: Option<i32>,
    pub vehicle_registration_number: String,
    pub spot: ParkingSpot,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub price: Decimal,
}

impl Ticket {
    /// Open a new ticket for a vehicle parked on `spot` at `in_time`
    pub fn open(vehicle_registration_number: impl Into<String>, spot: ParkingSpot, in_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            vehicle_registration_number: vehicle_registration_number.into(),
            spot,
            in_time,
            out_time: None,
            price: Decimal::ZERO,
        }
    }

    /// A ticket is open while the vehicle is still parked
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }
}

/// Ticket joined with its parking spot, as read from the database
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: i32,
    pub parking_number: i32,
    pub vehicle_reg_number: String,
    pub price: Decimal,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub available: bool,
    #[sqlx(rename = "type")]
    pub spot_type: String,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = crate::error::AppError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: Some(row.id),
            vehicle_registration_number: row.vehicle_reg_number,
            spot: ParkingSpot {
                id: row.parking_number,
                category: row.spot_type.parse()?,
                is_available: row.available,
            },
            in_time: row.in_time,
            out_time: row.out_time,
            price: row.price,
        })
    }
}

/// Result of a successful vehicle entry
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub ticket: Ticket,
    /// The vehicle already has tickets on record
    pub returning_customer: bool,
}

/// Result of a successful vehicle exit
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub discount_applied: bool,
}
