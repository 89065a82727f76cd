pub mod auth_error_marker;
pub mod claims;
pub mod error;
pub mod logout_service;
pub mod permission_gate;
pub mod permissions;
pub mod session;
pub mod session_state;
pub mod storage;
pub mod token_decoder;
pub mod user;

pub use auth_error_marker::AuthErrorMarker;
pub use claims::{AccessTokenClaims, RoleClaim};
pub use error::{AuthError, Result};
pub use logout_service::LogoutService;
pub use permission_gate::{has_all_permissions, has_any_permission, has_permission};
pub use session::Session;
pub use session_state::{PersistedSession, SessionState};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use token_decoder::{TokenDecoder, decode_user, is_token_expired};
pub use user::User;

/// Storage key of the persisted session
pub const AUTH_STORAGE_KEY: &str = "auth-storage";
/// Storage key of the read-once forced-logout marker
pub const AUTH_ERROR_KEY: &str = "auth-error";
/// Tenant assumed when the token carries none
pub const DEFAULT_TENANT: &str = "root";

#[cfg(test)]
mod tests;
