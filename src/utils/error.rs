use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Out time provided is incorrect: in {in_time}, out {}", fmt_out_time(.out_time))]
    InvalidTimeRange {
        in_time: DateTime<Utc>,
        out_time: Option<DateTime<Utc>>,
    },

    #[error("Unknown parking type: {0}")]
    UnsupportedVehicleType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error")]
    IoError(#[from] std::io::Error),
}

fn fmt_out_time(out_time: &Option<DateTime<Utc>>) -> String {
    match out_time {
        Some(t) => t.to_string(),
        None => "none".to_string(),
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidTimeRange { .. } => "INVALID_TIME_RANGE",
            AppError::UnsupportedVehicleType(_) => "UNSUPPORTED_VEHICLE_TYPE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::MigrationError(_) => "MIGRATION_ERROR",
            AppError::IoError(_) => "IO_ERROR",
        }
    }

    pub fn log(&self) {
        match self {
            AppError::UnsupportedVehicleType(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::PersistenceFailure(msg)
            | AppError::ConfigError(msg) => {
                error!(code = self.code(), message = %msg, "Application error");
            }
            AppError::InvalidTimeRange { in_time, out_time } => {
                error!(code = self.code(), %in_time, ?out_time, "Invalid ticket time range");
            }
            AppError::DatabaseError(e) => {
                error!(code = self.code(), error = ?e, "Database error");
            }
            AppError::MigrationError(e) => {
                error!(code = self.code(), error = ?e, "Migration error");
            }
            AppError::IoError(e) => {
                error!(code = self.code(), error = ?e, "I/O error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_time_range_message() {
        let in_time = Utc::now();
        let err = AppError::InvalidTimeRange {
            in_time,
            out_time: None,
        };
        assert_eq!(err.code(), "INVALID_TIME_RANGE");
        assert!(err.to_string().ends_with("out none"));
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            AppError::PersistenceFailure("x".into()).code(),
            "PERSISTENCE_FAILURE"
        );
        assert_eq!(AppError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(
            AppError::UnsupportedVehicleType("TRUCK".into()).to_string(),
            "Unknown parking type: TRUCK"
        );
    }
}
