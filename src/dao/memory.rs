use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ParkingSpotRepository, TicketRepository};
use crate::models::{ParkingSpot, ParkingType, Ticket};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct State {
    spots: BTreeMap<i32, ParkingSpot>,
    tickets: Vec<Ticket>,
    next_ticket_id: i32,
}

/// Spots and tickets held in process memory.
///
/// Clones share the same state, so one store can back both repository
/// handles of a [`crate::services::ParkingService`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let spots = spots.into_iter().map(|spot| (spot.id, spot)).collect();
        Self {
            state: Arc::new(Mutex::new(State {
                spots,
                tickets: Vec::new(),
                next_ticket_id: 1,
            })),
        }
    }

    /// Same layout as the database seed: spots 1-3 for cars, 4-5 for bikes.
    pub fn with_default_layout() -> Self {
        Self::new([
            ParkingSpot::new(1, ParkingType::Car, true),
            ParkingSpot::new(2, ParkingType::Car, true),
            ParkingSpot::new(3, ParkingType::Car, true),
            ParkingSpot::new(4, ParkingType::Bike, true),
            ParkingSpot::new(5, ParkingType::Bike, true),
        ])
    }

    pub fn spot(&self, id: i32) -> AppResult<Option<ParkingSpot>> {
        Ok(self.lock()?.spots.get(&id).cloned())
    }

    /// Every ticket recorded for the vehicle, in save order.
    pub fn tickets_for(&self, vehicle_reg_number: &str) -> AppResult<Vec<Ticket>> {
        Ok(self
            .lock()?
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .cloned()
            .collect())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::PersistenceFailure("in-memory store lock poisoned".to_string()))
    }
}

impl ParkingSpotRepository for InMemoryStore {
    async fn get_next_available_slot(&self, parking_type: ParkingType) -> AppResult<i32> {
        Ok(self
            .lock()?
            .spots
            .values()
            .find(|spot| spot.parking_type == parking_type && spot.is_available)
            .map(|spot| spot.id)
            .unwrap_or(0))
    }

    async fn update_parking(&self, parking_spot: &ParkingSpot) -> AppResult<bool> {
        let mut state = self.lock()?;
        match state.spots.get_mut(&parking_spot.id) {
            Some(spot) => {
                spot.is_available = parking_spot.is_available;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl TicketRepository for InMemoryStore {
    async fn get_ticket(&self, vehicle_reg_number: &str) -> AppResult<Option<Ticket>> {
        let state = self.lock()?;
        let ticket = state
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number && t.is_open())
            .max_by_key(|t| t.in_time)
            .cloned();

        Ok(ticket.map(|mut ticket| {
            if let Some(spot) = state.spots.get(&ticket.parking_spot.id) {
                ticket.parking_spot = spot.clone();
            }
            ticket
        }))
    }

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let mut state = self.lock()?;
        if !state.spots.contains_key(&ticket.parking_spot.id) {
            return Ok(false);
        }

        let mut saved = ticket.clone();
        saved.id = Some(state.next_ticket_id);
        state.next_ticket_id += 1;
        state.tickets.push(saved);
        Ok(true)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<bool> {
        let mut state = self.lock()?;
        let Some(id) = ticket.id else {
            return Ok(false);
        };

        match state.tickets.iter_mut().find(|t| t.id == Some(id)) {
            Some(stored) => {
                stored.in_time = ticket.in_time;
                stored.out_time = ticket.out_time;
                stored.price = ticket.price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> AppResult<i64> {
        let count = self
            .lock()?
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number && !t.is_open())
            .count();
        Ok(count as i64)
    }
}
