pub mod fare_calculator;
pub mod parking_service;

pub use fare_calculator::{calculate_fare, FareOptions};
pub use parking_service::ParkingService;
