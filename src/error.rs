//! Error types shared by every hydration service.
//!
//! Failures are split in four families:
//! - [`ValidationError`]: the input was rejected before any state was touched
//! - [`StoreError`]: the persistent store could not be read or written
//! - [`HydrationError::NotFound`]: a keyed entity does not exist
//! - [`HydrationError::CapabilityUnavailable`]: an optional surface (sound,
//!   notifications) is missing and the caller degrades silently

use thiserror::Error;

/// Convenience alias used by the services of the crate.
pub type Result<T> = std::result::Result<T, HydrationError>;

/// Top level error returned by stores and services.
#[derive(Debug, Error)]
pub enum HydrationError {
    /// Input rejected before mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A record, achievement or setting with the given key does not exist.
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },
    /// An optional capability is not available on this host.
    #[error("{0} is not available")]
    CapabilityUnavailable(String),
}

/// Reasons an input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("reminder interval must be between 15 and 240 minutes, got {0}")]
    IntervalOutOfRange(i64),
    #[error("snooze duration must be between 1 and 240 minutes, got {0}")]
    SnoozeOutOfRange(i64),
    #[error("daily goal must be between 1 and 20 cups, got {0}")]
    GoalOutOfRange(i64),
    #[error("weather adjustment must be between -5 and 5 cups, got {0}")]
    AdjustmentOutOfRange(i64),
    #[error("cup count must be between 0 and 50, got {0}")]
    CupsOutOfRange(i64),
    #[error("no drink recorded today, nothing to undo")]
    NothingToUndo,
    #[error("invalid value for setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write store file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize store: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store file {path} is corrupted: {reason}")]
    Corrupted { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_into_hydration_error() {
        let error: HydrationError = ValidationError::IntervalOutOfRange(10).into();
        assert!(matches!(
            error,
            HydrationError::Validation(ValidationError::IntervalOutOfRange(10))
        ));
        assert_eq!(
            error.to_string(),
            "reminder interval must be between 15 and 240 minutes, got 10"
        );
    }

    #[test]
    fn test_not_found_message() {
        let error = HydrationError::NotFound {
            entity: "record",
            key: "42".to_string(),
        };
        assert_eq!(error.to_string(), "record '42' not found");
    }
}
