//! Schedule-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Endpoint not available: {0}")]
    EndpointUnavailable(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl ScheduleError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::EndpointUnavailable(_) => "Part of the schedule is unavailable.".to_string(),
            Self::InvalidEventData(msg) => format!("Invalid event: {}", msg),
            Self::ApiError(msg) => format!("Schedule error: {}", msg),
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error means the caller must go back through the
    /// login boundary.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Whether the next scheduled poll is likely to succeed. There is no
    /// in-request retry; transient failures simply wait for the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::ApiError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ScheduleError::SessionExpired;
        assert!(err.user_message().contains("sign in"));

        let err = ScheduleError::InvalidEventData("bad date".into());
        assert!(err.user_message().contains("bad date"));
    }

    #[test]
    fn test_is_auth_error() {
        assert!(ScheduleError::SessionExpired.is_auth_error());
        assert!(!ScheduleError::ApiError("x".into()).is_auth_error());
    }

    #[test]
    fn test_is_transient() {
        assert!(ScheduleError::ApiError("500".into()).is_transient());
        assert!(!ScheduleError::SessionExpired.is_transient());
        assert!(!ScheduleError::EndpointUnavailable("/x".into()).is_transient());
    }
}
