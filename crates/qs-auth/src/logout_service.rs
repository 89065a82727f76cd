use crate::{AUTH_ERROR_KEY, AuthErrorMarker, Result as AuthErrorResult, Session};

use log::{error, info, warn};

/// Central logout cleanup.
#[derive(Debug, Clone)]
pub struct LogoutService {
    session: Session,
}

impl LogoutService {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Reset the session and wipe the whole storage scope.
    pub fn logout(&self) -> AuthErrorResult<()> {
        self.session.logout();

        if let Err(e) = self.session.storage().clear() {
            error!("[LOGOUT] Error during cleanup: {e}");
            return Err(e);
        }

        info!("[LOGOUT] Complete cleanup performed");
        Ok(())
    }

    /// Forced logout after a 401/403. Leaves an [`AuthErrorMarker`] for
    /// the login view.
    pub fn logout_on_auth_error(&self, status: u16) -> AuthErrorResult<AuthErrorMarker> {
        self.logout()?;

        let marker = AuthErrorMarker::for_status(status);
        let json = serde_json::to_string(&marker)?;
        self.session.storage().set_item(AUTH_ERROR_KEY, &json)?;

        info!("[LOGOUT] Logout on auth error completed (status {status})");
        Ok(marker)
    }

    /// Read and remove the forced-logout marker.
    pub fn take_auth_error(&self) -> AuthErrorResult<Option<AuthErrorMarker>> {
        let storage = self.session.storage();
        let Some(raw) = storage.get_item(AUTH_ERROR_KEY)? else {
            return Ok(None);
        };
        storage.remove_item(AUTH_ERROR_KEY)?;

        match serde_json::from_str(&raw) {
            Ok(marker) => Ok(Some(marker)),
            Err(e) => {
                warn!("[LOGOUT] Discarding malformed auth-error marker: {e}");
                Ok(None)
            }
        }
    }
}
