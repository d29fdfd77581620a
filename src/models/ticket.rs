use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ParkingSpot, ParkingType};
use crate::utils::error::AppError;

/// One parking session of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Assigned by the store when the ticket is saved.
    pub id: Option<i32>,
    pub vehicle_reg_number: String,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub parking_spot: ParkingSpot,
    pub price: Decimal,
}

impl Ticket {
    /// Opens a ticket for a vehicle that just entered on `parking_spot`.
    pub fn open(
        vehicle_reg_number: impl Into<String>,
        parking_spot: ParkingSpot,
        in_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            vehicle_reg_number: vehicle_reg_number.into(),
            in_time,
            out_time: None,
            parking_spot,
            price: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }
}

/// Row shape of `ticket` joined with its `parking` spot.
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: i32,
    pub parking_number: i32,
    pub vehicle_reg_number: String,
    pub price: Decimal,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub parking_type: String,
    pub available: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let parking_type: ParkingType = row.parking_type.parse()?;
        Ok(Ticket {
            id: Some(row.id),
            vehicle_reg_number: row.vehicle_reg_number,
            in_time: row.in_time,
            out_time: row.out_time,
            parking_spot: ParkingSpot::new(row.parking_number, parking_type, row.available),
            price: row.price,
        })
    }
}
