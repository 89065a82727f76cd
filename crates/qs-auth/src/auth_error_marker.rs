use serde::{Deserialize, Serialize};

const SESSION_EXPIRED_MESSAGE: &str = "Session expired";
const ACCESS_DENIED_MESSAGE: &str = "Access denied";

/// Left in storage by a forced logout so the login view can explain why
/// the user was signed out. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthErrorMarker {
    pub status: u16,
    pub message: String,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl AuthErrorMarker {
    pub fn for_status(status: u16) -> Self {
        Self::for_status_at(status, chrono::Utc::now().timestamp_millis())
    }

    pub fn for_status_at(status: u16, timestamp: i64) -> Self {
        let message = if status == 401 {
            SESSION_EXPIRED_MESSAGE
        } else {
            ACCESS_DENIED_MESSAGE
        };

        Self {
            status,
            message: message.to_string(),
            timestamp,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        self.status == 401
    }
}
