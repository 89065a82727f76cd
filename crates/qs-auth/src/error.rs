use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token expired at {expired_at} {location}")]
    TokenExpired {
        expired_at: i64,
        location: ErrorLocation,
    },

    #[error("Token has no expiration claim {location}")]
    MissingExpiry { location: ErrorLocation },

    #[error("Session storage failed at {path}: {source} {location}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize session data: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// True for errors that mean "no valid user" rather than an I/O fault
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::JwtDecode { .. } | Self::TokenExpired { .. } | Self::MissingExpiry { .. }
        )
    }

    #[track_caller]
    pub fn jwt_decode(source: jsonwebtoken::errors::Error) -> Self {
        Self::JwtDecode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_expired(expired_at: i64) -> Self {
        Self::TokenExpired {
            expired_at,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_expiry() -> Self {
        Self::MissingExpiry {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage(path: PathBuf, source: std::io::Error) -> Self {
        Self::Storage {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
