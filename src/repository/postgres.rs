//! PostgreSQL ticket store

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use super::ParkingStore;
use crate::{
    config::{DatabaseConfig, FacilityConfig},
    error::AppResult,
    models::{ticket::TicketRow, ParkingSpot, Ticket, VehicleCategory},
};

#[derive(Clone)]
pub struct PgParkingStore {
    pool: Pool<Postgres>,
}

impl PgParkingStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Connect using the database settings and run pending migrations
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Create the spots of the facility. Existing spots keep their availability.
    pub async fn seed_facility(&self, facility: &FacilityConfig) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        for (id, category) in facility.layout() {
            sqlx::query(
                r#"
                INSERT INTO parking (parking_number, available, type)
                VALUES ($1, TRUE, $2)
                ON CONFLICT (parking_number) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(category.as_str())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!("Facility seeded with {} spots", facility.total_spots());
        Ok(())
    }
}

#[async_trait]
impl ParkingStore for PgParkingStore {
    async fn get_next_available_slot(&self, category: VehicleCategory) -> AppResult<Option<i32>> {
        // MIN over no rows is NULL
        let id = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MIN(parking_number) FROM parking WHERE available = TRUE AND type = $1",
        )
        .bind(category.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_parking_spot(&self, spot: &ParkingSpot) -> AppResult<bool> {
        let result = sqlx::query("UPDATE parking SET available = $1 WHERE parking_number = $2")
            .bind(spot.is_available)
            .bind(spot.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO ticket (parking_number, vehicle_reg_number, price, in_time, out_time)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(ticket.spot.id)
        .bind(&ticket.vehicle_registration_number)
        .bind(ticket.price)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn get_ticket(&self, vehicle_registration_number: &str) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT t.id, t.parking_number, t.vehicle_reg_number, t.price, t.in_time, t.out_time,
                   p.available, p.type
            FROM ticket t
            JOIN parking p ON p.parking_number = t.parking_number
            WHERE t.vehicle_reg_number = $1 AND t.out_time IS NULL
            ORDER BY t.in_time DESC, t.id DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_registration_number)
        .fetch_optional(&self.pool)
        .await?
        .map(Ticket::try_from)
        .transpose()
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let Some(id) = ticket.id else {
            tracing::warn!(
                "Cannot update unsaved ticket of {}",
                ticket.vehicle_registration_number
            );
            return Ok(false);
        };

        let result = sqlx::query("UPDATE ticket SET price = $1, out_time = $2 WHERE id = $3")
            .bind(ticket.price)
            .bind(ticket.out_time)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn get_ticket_count(&self, vehicle_registration_number: &str) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ticket WHERE vehicle_reg_number = $1",
        )
        .bind(vehicle_registration_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
