use chrono::Utc;
use tracing::{info, warn};

use crate::dao::{ParkingSpotRepository, TicketRepository};
use crate::models::{ParkingSpot, ParkingType, Ticket};
use crate::services::fare_calculator::{calculate_fare, FareOptions};
use crate::utils::error::{AppError, AppResult};
use crate::utils::input_reader::InputReader;

/// Completed visits needed before a vehicle gets the recurring discount.
pub const DEFAULT_RECURRING_THRESHOLD: i64 = 1;

/// Entry and exit flows of the parking facility.
pub struct ParkingService<I, S, T> {
    input: I,
    spots: S,
    tickets: T,
    recurring_threshold: i64,
}

impl<I, S, T> ParkingService<I, S, T>
where
    I: InputReader,
    S: ParkingSpotRepository,
    T: TicketRepository,
{
    pub fn new(input: I, spots: S, tickets: T) -> Self {
        Self {
            input,
            spots,
            tickets,
            recurring_threshold: DEFAULT_RECURRING_THRESHOLD,
        }
    }

    pub fn with_recurring_threshold(mut self, threshold: i64) -> Self {
        self.recurring_threshold = threshold;
        self
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Parks a new vehicle and returns its open ticket, or `None` when no spot
    /// matches the operator's selection.
    pub async fn process_incoming_vehicle(&self) -> AppResult<Option<Ticket>> {
        println!("Please select vehicle type from menu");
        println!("1 CAR");
        println!("2 BIKE");
        let selection = self.input.read_selection();

        let Some(mut parking_spot) = self.get_next_parking_number_if_available(selection).await?
        else {
            return Ok(None);
        };

        println!("Please type the vehicle registration number and press enter key");
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;

        // every read happens before the spot is taken
        let recurring = self.is_recurring(&vehicle_reg_number).await?;

        parking_spot.is_available = false;
        if !self.spots.update_parking(&parking_spot).await? {
            return Err(AppError::PersistenceFailure(format!(
                "Unable to allocate parking spot {}",
                parking_spot.id
            )));
        }

        let ticket = Ticket::open(vehicle_reg_number, parking_spot, Utc::now());
        if !self.tickets.save_ticket(&ticket).await? {
            return Err(AppError::PersistenceFailure(format!(
                "Unable to save ticket for vehicle {}",
                ticket.vehicle_reg_number
            )));
        }

        info!(
            vehicle = %ticket.vehicle_reg_number,
            parking_number = ticket.parking_spot.id,
            parking_type = %ticket.parking_spot.parking_type,
            "Generated ticket and saved in DB"
        );
        if recurring {
            println!(
                "Welcome back! As a recurring user of our parking lot, you'll benefit from a 5% discount."
            );
        }
        println!(
            "Please park your vehicle in spot number: {}",
            ticket.parking_spot.id
        );
        println!(
            "Recorded in-time for vehicle number: {} is: {}",
            ticket.vehicle_reg_number, ticket.in_time
        );

        Ok(Some(ticket))
    }

    /// Looks up the next free spot for a vehicle type selection code.
    ///
    /// Unknown codes and full parkings are reported to the operator and yield
    /// `None`; only repository failures are errors.
    pub async fn get_next_parking_number_if_available(
        &self,
        selection: i32,
    ) -> AppResult<Option<ParkingSpot>> {
        let Some(parking_type) = ParkingType::from_selection(selection) else {
            warn!(selection, "Incorrect parking type selection");
            println!("Incorrect input provided");
            return Ok(None);
        };

        let parking_number = self.spots.get_next_available_slot(parking_type).await?;
        if parking_number <= 0 {
            warn!(%parking_type, "No parking slot available");
            println!("Error fetching parking number from DB. Parking slots might be full");
            return Ok(None);
        }

        Ok(Some(ParkingSpot::new(parking_number, parking_type, true)))
    }

    /// Closes the vehicle's open ticket, prices it and frees its spot.
    pub async fn process_exiting_vehicle(&self) -> AppResult<Ticket> {
        println!("Please type the vehicle registration number and press enter key");
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;

        let mut ticket = self
            .tickets
            .get_ticket(&vehicle_reg_number)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No open ticket for vehicle {vehicle_reg_number}"))
            })?;

        ticket.out_time = Some(Utc::now());
        let discount = self.is_recurring(&vehicle_reg_number).await?;
        calculate_fare(&mut ticket, FareOptions::with_discount(discount))?;

        if !self.tickets.update_ticket(&ticket).await? {
            return Err(AppError::PersistenceFailure(format!(
                "Unable to update ticket information for vehicle {vehicle_reg_number}"
            )));
        }

        ticket.parking_spot.is_available = true;
        if !self.spots.update_parking(&ticket.parking_spot).await? {
            return Err(AppError::PersistenceFailure(format!(
                "Unable to release parking spot {}",
                ticket.parking_spot.id
            )));
        }

        info!(
            vehicle = %vehicle_reg_number,
            parking_number = ticket.parking_spot.id,
            price = %ticket.price,
            discount,
            "Vehicle exited"
        );
        println!("Please pay the parking fare: {}", ticket.price.round_dp(2));
        if let Some(out_time) = ticket.out_time {
            println!("Recorded out-time for vehicle number: {vehicle_reg_number} is: {out_time}");
        }

        Ok(ticket)
    }

    async fn is_recurring(&self, vehicle_reg_number: &str) -> AppResult<bool> {
        let visits = self.tickets.get_nb_ticket(vehicle_reg_number).await?;
        Ok(visits >= self.recurring_threshold)
    }
}
