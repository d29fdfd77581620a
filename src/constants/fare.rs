use rust_decimal::Decimal;

/// Hourly rate for cars (1.5).
pub const CAR_RATE_PER_HOUR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Hourly rate for bikes (1.0).
pub const BIKE_RATE_PER_HOUR: Decimal = Decimal::from_parts(10, 0, 0, false, 1);

/// Stays shorter than this many hours are free (0.5).
pub const FREE_PERIOD_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Multiplier applied to a recurring customer's fare (0.95).
pub const RECURRING_DISCOUNT_FACTOR: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

pub const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
