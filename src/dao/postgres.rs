use sqlx::PgPool;
use tracing::{debug, warn};

use super::{ParkingSpotRepository, TicketRepository};
use crate::models::{ParkingSpot, ParkingType, Ticket, TicketRow};
use crate::utils::error::AppResult;

#[derive(Debug, Clone)]
pub struct ParkingSpotDao {
    pool: PgPool,
}

impl ParkingSpotDao {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ParkingSpotRepository for ParkingSpotDao {
    async fn get_next_available_slot(&self, parking_type: ParkingType) -> AppResult<i32> {
        let slot: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MIN(parking_number)
            FROM parking
            WHERE type = $1 AND available = TRUE
            "#,
        )
        .bind(parking_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(slot.unwrap_or(0))
    }

    async fn update_parking(&self, parking_spot: &ParkingSpot) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE parking
            SET available = $1
            WHERE parking_number = $2
            "#,
        )
        .bind(parking_spot.is_available)
        .bind(parking_spot.id)
        .execute(&self.pool)
        .await?;

        debug!(
            parking_number = parking_spot.id,
            available = parking_spot.is_available,
            rows = result.rows_affected(),
            "Updated parking spot"
        );
        Ok(result.rows_affected() == 1)
    }
}

#[derive(Debug, Clone)]
pub struct TicketDao {
    pool: PgPool,
}

impl TicketDao {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TicketRepository for TicketDao {
    async fn get_ticket(&self, vehicle_reg_number: &str) -> AppResult<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.parking_number, t.vehicle_reg_number, t.price,
                   t.in_time, t.out_time, p.type AS parking_type, p.available
            FROM ticket t
            JOIN parking p ON p.parking_number = t.parking_number
            WHERE t.vehicle_reg_number = $1 AND t.out_time IS NULL
            ORDER BY t.in_time DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_reg_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Ticket::try_from).transpose()
    }

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO ticket (parking_number, vehicle_reg_number, price, in_time, out_time)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(ticket.parking_spot.id)
        .bind(&ticket.vehicle_reg_number)
        .bind(ticket.price)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let Some(id) = ticket.id else {
            warn!(vehicle = %ticket.vehicle_reg_number, "Update requested for an unsaved ticket");
            return Ok(false);
        };

        let result = sqlx::query(
            r#"
            UPDATE ticket
            SET price = $1, in_time = $2, out_time = $3
            WHERE id = $4
            "#,
        )
        .bind(ticket.price)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM ticket
            WHERE vehicle_reg_number = $1 AND out_time IS NOT NULL
            "#,
        )
        .bind(vehicle_reg_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
