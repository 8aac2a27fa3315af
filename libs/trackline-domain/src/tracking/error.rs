//! Domain errors for tracking operations
//!
//! These errors describe business-level failures and are independent of the
//! store driver (no MongoDB error types here). The HTTP layer maps each
//! variant to a status code.

use thiserror::Error;

/// Errors that can occur while recording or looking up reports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// One of deviceId, latitude, longitude or timestamp is absent
    #[error("Missing required fields")]
    MissingFields,

    /// A field is present but cannot be read as the expected type
    #[error("Invalid value for {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// The device has no stored reports
    #[error("No data found")]
    NotFound,

    /// The store has not answered a readiness probe yet, or stopped answering
    #[error("Store unavailable")]
    StoreUnavailable,

    /// The store rejected or failed an operation; carries the driver message verbatim
    #[error("{0}")]
    StorageFailure(String),
}

impl TrackingError {
    /// Create a storage failure error with a message
    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Create an invalid field error
    pub fn invalid_field(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField { field, expected }
    }

    /// Whether the caller, not the server, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields | Self::InvalidField { .. } | Self::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            TrackingError::MissingFields.to_string(),
            "Missing required fields"
        );
    }

    #[test]
    fn test_storage_failure_is_verbatim() {
        let err = TrackingError::storage_failure("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_field_message() {
        let err = TrackingError::invalid_field("latitude", "a number");
        assert_eq!(err.to_string(), "Invalid value for latitude: expected a number");
        assert!(err.is_client_error());
    }
}
