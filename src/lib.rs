//! Parkit Parking Facility Management System
//!
//! Allocates parking spots to incoming vehicles, records entry and exit
//! times, and bills stays on exit with a loyalty discount for returning
//! vehicles. An operator drives everything from a console menu.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod operator;
pub mod repository;
pub mod services;
pub mod shell;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
