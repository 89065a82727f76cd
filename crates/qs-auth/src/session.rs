use crate::{
    AUTH_STORAGE_KEY, PersistedSession, Result as AuthErrorResult, SessionState, SessionStorage,
    User,
};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

const PERSISTED_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

/// Process-wide session handle.
///
/// Clones share one [`SessionState`] and one storage scope. Each
/// mutation holds the write lock for its whole update, so readers never
/// see a half-applied login. Persisted fields are written back to the
/// storage scope after every change to them.
#[derive(Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    /// Empty session over `storage`. Nothing is loaded.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new())),
            storage,
        }
    }

    /// Session restored from `storage`, or empty if nothing usable is stored.
    pub fn rehydrate(storage: Arc<dyn SessionStorage>) -> Self {
        let session = Self::new(storage);
        match session.load() {
            Ok(true) => info!("[AUTH] Session rehydrated from storage"),
            Ok(false) => info!("[AUTH] No stored session"),
            Err(e) => warn!("[AUTH] Ignoring unreadable stored session: {e}"),
        }
        session
    }

    /// Replace the in-memory state with the stored one. Returns false when
    /// nothing is stored.
    pub fn load(&self) -> AuthErrorResult<bool> {
        let Some(raw) = self.storage.get_item(AUTH_STORAGE_KEY)? else {
            return Ok(false);
        };

        let envelope: PersistedEnvelope = serde_json::from_str(&raw)?;
        *self.write() = SessionState::from_persisted(envelope.state);
        Ok(true)
    }

    /// Write the persisted fields to storage.
    pub fn save(&self) -> AuthErrorResult<()> {
        let envelope = PersistedEnvelope {
            state: self.read().to_persisted(),
            version: PERSISTED_VERSION,
        };
        let json = serde_json::to_string(&envelope)?;
        self.storage.set_item(AUTH_STORAGE_KEY, &json)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            error!("[AUTH] Failed to persist session: {e}");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Returns whether the session is now authenticated.
    pub fn login(&self, access_token: String, refresh_token: String) -> bool {
        let is_authenticated = {
            let mut state = self.write();
            state.login(access_token, refresh_token);
            state.is_authenticated()
        };
        self.persist();
        is_authenticated
    }

    pub fn logout(&self) {
        self.write().logout();
        self.persist();
    }

    pub fn set_permissions(&self, permissions: Vec<String>) {
        self.write().set_permissions(permissions);
        self.persist();
    }

    pub fn set_loading_permissions(&self, loading: bool) {
        self.write().set_loading_permissions(loading);
    }

    pub fn set_permission_error(&self, error: Option<String>) {
        self.write().set_permission_error(error);
    }

    pub fn set_logging_in(&self, logging_in: bool) {
        self.write().set_logging_in(logging_in);
    }

    pub fn set_refreshing_token(&self, refreshing: bool) {
        self.write().set_refreshing_token(refreshing);
    }

    /// Re-derive the user from the stored access token against the current clock.
    pub fn redecode_user(&self) -> Option<User> {
        let user = self.write().redecode_user().cloned();
        self.persist();
        user
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Copy of the whole state
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token().map(String::from)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token().map(String::from)
    }

    pub fn user(&self) -> Option<User> {
        self.read().user().cloned()
    }

    pub fn permissions(&self) -> Vec<String> {
        self.read().permissions().to_vec()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_refreshing_token(&self) -> bool {
        self.read().is_refreshing_token()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.read().has_permission(permission)
    }

    pub fn has_any_permission<R: AsRef<str>>(&self, requested: &[R]) -> bool {
        self.read().has_any_permission(requested)
    }

    pub fn has_all_permissions<R: AsRef<str>>(&self, requested: &[R]) -> bool {
        self.read().has_all_permissions(requested)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Session")
            .field("is_authenticated", &state.is_authenticated())
            .field("user", &state.user().map(|u| u.id.as_str()))
            .field("permissions", &state.permissions().len())
            .finish_non_exhaustive()
    }
}
