//! qs-client
//!
//! REST client for the Qualitas backend with transparent token refresh.

pub mod auth_api;
pub mod client;
pub mod error;
pub mod logger;
pub mod refresh;
mod transport;

#[cfg(test)]
mod tests;

pub use auth_api::{AuthApi, LoginRequest, TokenResponse};
pub use client::ApiClient;
pub use error::{ClientError, Result as ClientResult};
pub use refresh::{RefreshOrchestrator, TokenPair, TokenRefresher};

/// Header carrying the tenant identifier
pub const TENANT_HEADER: &str = "tenant";
