//! Parkit Server - Parking Facility Management System
//!
//! Operator console for a single parking facility.

use std::io::{self, BufReader};
use std::sync::Arc;

use parkit_server::{
    config::{AppConfig, StoreBackend},
    logging,
    operator::ConsoleOperator,
    repository::{MemoryParkingStore, ParkingStore, PgParkingStore},
    services::Services,
    shell,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let _log_guard = logging::init(&config.logging);

    tracing::info!("Starting Parkit Server v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ParkingStore> = match config.database.backend {
        StoreBackend::Postgres => {
            let store = PgParkingStore::connect(&config.database).await?;
            store.seed_facility(&config.facility).await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, tickets are lost on shutdown");
            Arc::new(MemoryParkingStore::for_facility(&config.facility))
        }
    };

    let services = Services::new(store, config.fares.clone());

    let mut operator = ConsoleOperator::new(BufReader::new(io::stdin()), io::stdout());
    shell::run(&services, &mut operator).await?;

    tracing::info!("Parkit Server stopped");

    Ok(())
}
