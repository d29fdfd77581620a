use serde::{Deserialize, Serialize};

use super::ParkingType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: i32,
    pub parking_type: ParkingType,
    pub is_available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, parking_type: ParkingType, is_available: bool) -> Self {
        Self {
            id,
            parking_type,
            is_available,
        }
    }
}
