pub mod parking_spot;
pub mod parking_type;
pub mod ticket;

pub use parking_spot::ParkingSpot;
pub use parking_type::ParkingType;
pub use ticket::{Ticket, TicketRow};
