use rust_decimal::Decimal;

use crate::constants::fare::{
    BIKE_RATE_PER_HOUR, CAR_RATE_PER_HOUR, FREE_PERIOD_HOURS, MILLIS_PER_HOUR,
    RECURRING_DISCOUNT_FACTOR,
};
use crate::models::{ParkingType, Ticket};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FareOptions {
    /// Take 5% off for a recurring customer.
    pub discount: bool,
}

impl FareOptions {
    pub fn with_discount(discount: bool) -> Self {
        Self { discount }
    }
}

pub fn rate_per_hour(parking_type: ParkingType) -> Decimal {
    match parking_type {
        ParkingType::Car => CAR_RATE_PER_HOUR,
        ParkingType::Bike => BIKE_RATE_PER_HOUR,
    }
}

/// Prices a closed ticket in place.
///
/// The ticket must carry an out-time no earlier than its in-time. Stays under
/// half an hour cost nothing; longer stays are billed on fractional hours at
/// the spot type's rate, then discounted when `options.discount` is set.
pub fn calculate_fare(ticket: &mut Ticket, options: FareOptions) -> AppResult<()> {
    let out_time = match ticket.out_time {
        Some(out_time) if out_time >= ticket.in_time => out_time,
        out_time => {
            return Err(AppError::InvalidTimeRange {
                in_time: ticket.in_time,
                out_time,
            })
        }
    };

    let duration_millis = (out_time - ticket.in_time).num_milliseconds();
    let duration_hours = Decimal::from(duration_millis) / Decimal::from(MILLIS_PER_HOUR);

    if duration_hours < FREE_PERIOD_HOURS {
        ticket.price = Decimal::ZERO;
        return Ok(());
    }

    let mut price = duration_hours * rate_per_hour(ticket.parking_spot.parking_type);
    if options.discount {
        price *= RECURRING_DISCOUNT_FACTOR;
    }
    ticket.price = price;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParkingSpot;
    use chrono::{Duration, Utc};

    fn ticket_for(parking_type: ParkingType, minutes: i64) -> Ticket {
        let out_time = Utc::now();
        let mut ticket = Ticket::open(
            "ABCDEF",
            ParkingSpot::new(1, parking_type, false),
            out_time - Duration::minutes(minutes),
        );
        ticket.out_time = Some(out_time);
        ticket
    }

    #[test]
    fn test_calculate_fare_car() {
        let mut ticket = ticket_for(ParkingType::Car, 60);
        calculate_fare(&mut ticket, FareOptions::default()).unwrap();
        assert_eq!(ticket.price, CAR_RATE_PER_HOUR);
    }

    #[test]
    fn test_calculate_fare_bike() {
        let mut ticket = ticket_for(ParkingType::Bike, 60);
        calculate_fare(&mut ticket, FareOptions::default()).unwrap();
        assert_eq!(ticket.price, BIKE_RATE_PER_HOUR);
    }

    #[test]
    fn test_calculate_fare_car_with_discount() {
        let mut ticket = ticket_for(ParkingType::Car, 60);
        calculate_fare(&mut ticket, FareOptions::with_discount(true)).unwrap();
        assert_eq!(ticket.price, CAR_RATE_PER_HOUR * RECURRING_DISCOUNT_FACTOR);
        assert_eq!(ticket.price, Decimal::new(1425, 3));
    }

    #[test]
    fn test_calculate_fare_bike_with_discount() {
        let mut ticket = ticket_for(ParkingType::Bike, 60);
        calculate_fare(&mut ticket, FareOptions::with_discount(true)).unwrap();
        assert_eq!(ticket.price, Decimal::new(95, 2));
    }

    #[test]
    fn test_calculate_fare_keeps_fractional_hours() {
        // 45 minutes is three quarters of the hourly rate
        let mut car = ticket_for(ParkingType::Car, 45);
        calculate_fare(&mut car, FareOptions::default()).unwrap();
        assert_eq!(car.price, Decimal::new(1125, 3));

        let mut bike = ticket_for(ParkingType::Bike, 45);
        calculate_fare(&mut bike, FareOptions::default()).unwrap();
        assert_eq!(bike.price, Decimal::new(75, 2));
    }

    #[test]
    fn test_calculate_fare_car_for_a_day() {
        let mut ticket = ticket_for(ParkingType::Car, 24 * 60);
        calculate_fare(&mut ticket, FareOptions::default()).unwrap();
        assert_eq!(ticket.price, Decimal::from(24) * CAR_RATE_PER_HOUR);
    }

    #[test]
    fn test_stays_under_thirty_minutes_are_free() {
        for parking_type in [ParkingType::Car, ParkingType::Bike] {
            for minutes in [0, 1, 15, 29] {
                for discount in [false, true] {
                    let mut ticket = ticket_for(parking_type, minutes);
                    ticket.price = Decimal::ONE;
                    calculate_fare(&mut ticket, FareOptions::with_discount(discount)).unwrap();
                    assert_eq!(ticket.price, Decimal::ZERO, "{parking_type} {minutes}min");
                }
            }
        }
    }

    #[test]
    fn test_thirty_minutes_is_billed() {
        let mut ticket = ticket_for(ParkingType::Car, 30);
        calculate_fare(&mut ticket, FareOptions::default()).unwrap();
        assert_eq!(ticket.price, Decimal::new(75, 2));
    }

    #[test]
    fn test_calculate_fare_without_out_time_fails() {
        let mut ticket = ticket_for(ParkingType::Car, 60);
        ticket.out_time = None;
        let err = calculate_fare(&mut ticket, FareOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTimeRange { out_time: None, .. }
        ));
    }

    #[test]
    fn test_calculate_fare_with_future_in_time_fails() {
        for parking_type in [ParkingType::Car, ParkingType::Bike] {
            for minutes in [1, 60, 24 * 60] {
                let mut ticket = ticket_for(parking_type, 0);
                ticket.in_time += Duration::minutes(minutes);
                let err = calculate_fare(&mut ticket, FareOptions::default()).unwrap_err();
                assert!(matches!(err, AppError::InvalidTimeRange { .. }));
                assert_eq!(ticket.price, Decimal::ZERO);
            }
        }
    }
}
