use tracing::{info, warn};

use crate::dao::{ParkingSpotRepository, TicketRepository};
use crate::services::ParkingService;
use crate::utils::input_reader::{InputReader, INVALID_SELECTION};

/// Operator menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    IncomingVehicle,
    ExitingVehicle,
    Shutdown,
}

impl MenuOption {
    pub fn from_selection(selection: i32) -> Option<Self> {
        match selection {
            1 => Some(MenuOption::IncomingVehicle),
            2 => Some(MenuOption::ExitingVehicle),
            3 => Some(MenuOption::Shutdown),
            _ => None,
        }
    }
}

fn print_menu() {
    println!("Please select an option. Simply enter the number to choose an action");
    println!("1 New Vehicle Entering - Allocate Parking Space");
    println!("2 Vehicle Exiting - Generate Ticket Price");
    println!("3 Shutdown System");
}

/// Runs the operator menu until shutdown is selected or input ends.
///
/// Failed flows are logged and reported, then the menu is shown again.
pub async fn run<I, S, T>(service: &ParkingService<I, S, T>)
where
    I: InputReader,
    S: ParkingSpotRepository,
    T: TicketRepository,
{
    info!("App initialized");
    println!("Welcome to Parking System!");

    loop {
        print_menu();
        let selection = service.input().read_selection();
        if selection == INVALID_SELECTION && service.input().at_end_of_input() {
            warn!("Input closed, shutting down");
            break;
        }

        match MenuOption::from_selection(selection) {
            Some(MenuOption::IncomingVehicle) => {
                if let Err(e) = service.process_incoming_vehicle().await {
                    e.log();
                    println!("Unable to process incoming vehicle: {e}");
                }
            }
            Some(MenuOption::ExitingVehicle) => {
                if let Err(e) = service.process_exiting_vehicle().await {
                    e.log();
                    println!("Unable to process exiting vehicle: {e}");
                }
            }
            Some(MenuOption::Shutdown) => {
                println!("Exiting from the system!");
                break;
            }
            None => {
                println!("Unsupported option. Please enter a number corresponding to the provided menu");
            }
        }
    }

    info!("Shell stopped");
}
