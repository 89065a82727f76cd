use crate::{User, has_all_permissions, has_any_permission, has_permission};
use crate::token_decoder::{TokenDecoder, now_unix};

use serde::{Deserialize, Serialize};

/// Authenticated client state.
///
/// Fields are private; every change goes through one of the mutators
/// below so that `user` and `is_authenticated` always follow the
/// access token they were derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
    permissions: Vec<String>,
    is_authenticated: bool,
    is_loading_permissions: bool,
    permission_error: Option<String>,
    is_logging_in: bool,
    is_refreshing_token: bool,
}

/// Fields that survive a restart. Transient flags are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, access_token: String, refresh_token: String) {
        self.login_at(access_token, refresh_token, now_unix());
    }

    /// Store a token pair. An expired or malformed access token is still
    /// stored, but leaves the session unauthenticated.
    pub fn login_at(&mut self, access_token: String, refresh_token: String, now: i64) {
        let user = TokenDecoder::new().decode_user_at(&access_token, now);

        self.is_authenticated = user.is_some();
        self.access_token = Some(access_token);
        self.refresh_token = Some(refresh_token);
        self.user = user;
    }

    /// Back to the initial state. Idempotent.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn set_permissions(&mut self, permissions: Vec<String>) {
        self.permissions = permissions;
    }

    pub fn set_loading_permissions(&mut self, loading: bool) {
        self.is_loading_permissions = loading;
    }

    pub fn set_permission_error(&mut self, error: Option<String>) {
        self.permission_error = error;
    }

    pub fn set_logging_in(&mut self, logging_in: bool) {
        self.is_logging_in = logging_in;
    }

    pub fn set_refreshing_token(&mut self, refreshing: bool) {
        self.is_refreshing_token = refreshing;
    }

    pub fn redecode_user(&mut self) -> Option<&User> {
        self.redecode_user_at(now_unix())
    }

    /// Re-derive `user` from the stored access token. `is_authenticated`
    /// is left alone; only login and logout recompute it.
    pub fn redecode_user_at(&mut self, now: i64) -> Option<&User> {
        self.user = self
            .access_token
            .as_deref()
            .and_then(|token| TokenDecoder::new().decode_user_at(token, now));
        self.user.as_ref()
    }

    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            user: self.user.clone(),
            permissions: self.permissions.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    pub fn from_persisted(persisted: PersistedSession) -> Self {
        Self {
            access_token: persisted.access_token,
            refresh_token: persisted.refresh_token,
            user: persisted.user,
            permissions: persisted.permissions,
            is_authenticated: persisted.is_authenticated,
            ..Self::default()
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading_permissions(&self) -> bool {
        self.is_loading_permissions
    }

    pub fn permission_error(&self) -> Option<&str> {
        self.permission_error.as_deref()
    }

    pub fn is_logging_in(&self) -> bool {
        self.is_logging_in
    }

    pub fn is_refreshing_token(&self) -> bool {
        self.is_refreshing_token
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        has_permission(&self.permissions, permission)
    }

    pub fn has_any_permission<R: AsRef<str>>(&self, requested: &[R]) -> bool {
        has_any_permission(&self.permissions, requested)
    }

    pub fn has_all_permissions<R: AsRef<str>>(&self, requested: &[R]) -> bool {
        has_all_permissions(&self.permissions, requested)
    }
}
