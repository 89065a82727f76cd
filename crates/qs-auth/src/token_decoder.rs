use crate::{AccessTokenClaims, AuthError, Result as AuthErrorResult, User};

use jsonwebtoken::dangerous::insecure_decode;
use log::{error, warn};

/// Reads access token claims on the client side.
///
/// The client never holds the signing key, so neither the signature nor
/// the algorithm is checked here. Expiry is checked against the caller's
/// clock; the backend stays the authority on whether a token is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenDecoder;

impl TokenDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Structural decode of the payload. No expiry check.
    #[track_caller]
    pub fn decode_claims(&self, token: &str) -> AuthErrorResult<AccessTokenClaims> {
        insecure_decode::<AccessTokenClaims>(token)
            .map(|data| data.claims)
            .map_err(|e| AuthError::jwt_decode(e))
    }

    /// Fails when `exp` is absent or `now >= exp` (both Unix seconds).
    #[track_caller]
    pub fn check_expiry(claims: &AccessTokenClaims, now: i64) -> AuthErrorResult<()> {
        match claims.exp {
            None => Err(AuthError::missing_expiry()),
            Some(exp) if now >= exp => Err(AuthError::token_expired(exp)),
            Some(_) => Ok(()),
        }
    }

    /// Decode and require an unexpired token.
    #[track_caller]
    pub fn validate_at(&self, token: &str, now: i64) -> AuthErrorResult<AccessTokenClaims> {
        let claims = self.decode_claims(token)?;
        Self::check_expiry(&claims, now)?;
        Ok(claims)
    }

    /// Any decode failure counts as expired.
    pub fn is_token_expired_at(&self, token: &str, now: i64) -> bool {
        match self.validate_at(token, now) {
            Ok(_) => false,
            Err(e) => {
                log_token_error(&e);
                true
            }
        }
    }

    /// `None` when the token is malformed, has no expiry, or has expired.
    pub fn decode_user_at(&self, token: &str, now: i64) -> Option<User> {
        match self.validate_at(token, now) {
            Ok(claims) => Some(User::from(claims)),
            Err(e) => {
                log_token_error(&e);
                None
            }
        }
    }
}

fn log_token_error(e: &AuthError) {
    match e {
        AuthError::TokenExpired { .. } => warn!("[AUTH] Token has expired"),
        AuthError::MissingExpiry { .. } => warn!("[AUTH] Token has no expiration claim"),
        other => error!("[AUTH] Error decoding token: {other}"),
    }
}

/// Current Unix time in seconds
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// [`TokenDecoder::decode_user_at`] against the system clock
pub fn decode_user(token: &str) -> Option<User> {
    TokenDecoder::new().decode_user_at(token, now_unix())
}

/// [`TokenDecoder::is_token_expired_at`] against the system clock
pub fn is_token_expired(token: &str) -> bool {
    TokenDecoder::new().is_token_expired_at(token, now_unix())
}
