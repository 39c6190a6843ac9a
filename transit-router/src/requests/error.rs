//! Request layer error types.

/// Errors reading, validating or writing a request document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a valid request document
    #[error("malformed request document: {0}")]
    Json(#[from] serde_json::Error),

    /// A declared road distance is negative or not finite
    #[error("invalid road distance {distance} from {from:?} to {to:?}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Buses must move forward in finite time
    #[error("invalid bus_velocity {0}: must be positive and finite")]
    InvalidVelocity(f64),

    /// Waiting cannot take negative time
    #[error("invalid bus_wait_time {0}: must be non-negative and finite")]
    InvalidWaitTime(f64),
}
