//! Persistence capabilities consumed by the parking service.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{ParkingSpotDao, TicketDao};

use crate::models::{ParkingSpot, ParkingType, Ticket};
use crate::utils::error::AppResult;

#[allow(async_fn_in_trait)]
pub trait ParkingSpotRepository {
    /// Lowest free spot number for `parking_type`, or `0` when the type is full.
    async fn get_next_available_slot(&self, parking_type: ParkingType) -> AppResult<i32>;

    /// Stores the spot's availability. `false` means no spot was updated.
    async fn update_parking(&self, parking_spot: &ParkingSpot) -> AppResult<bool>;
}

#[allow(async_fn_in_trait)]
pub trait TicketRepository {
    /// The vehicle's open ticket, latest in-time first.
    async fn get_ticket(&self, vehicle_reg_number: &str) -> AppResult<Option<Ticket>>;

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool>;

    /// Writes the in-time, out-time and price of a saved ticket.
    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool>;

    /// Number of completed tickets recorded for the vehicle.
    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> AppResult<i64>;
}
