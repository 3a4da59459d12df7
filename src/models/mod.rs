//! Data models for Parkit

pub mod enums;
pub mod parking_spot;
pub mod ticket;

// Re-export commonly used types
pub use enums::VehicleCategory;
pub use parking_spot::ParkingSpot;
pub use ticket::{EntryReceipt, ExitReceipt, Ticket};
