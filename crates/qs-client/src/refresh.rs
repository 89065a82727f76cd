use crate::{ClientError, ClientResult};

use qs_auth::{LogoutService, Session};

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;

const UNAUTHORIZED: u16 = 401;
const FORBIDDEN: u16 = 403;

/// Fresh credentials returned by the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints a new token pair from the current one.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> ClientResult<TokenPair>;
}

/// What a failed call should do after an auth failure has been handled
enum Recovery {
    /// Reissue the call once with this access token
    Retry(String),
    /// Propagate the original error
    GiveUp,
}

/// Wraps outbound calls and recovers from an expired access token.
///
/// - 401: refresh once, reissue the call once with the new token. A
///   failed refresh logs the session out.
/// - 403: log out, never refresh.
///
/// Refresh and logout cycles run one at a time. A call that hits 401
/// while a cycle is running waits for it, then reuses its outcome: it
/// retries with the token the cycle stored, or gives up if the cycle
/// logged out. After a 403 logout, further 401/403 failures are passed
/// through untouched for `forbidden_cooldown`.
pub struct RefreshOrchestrator {
    session: Session,
    logout: LogoutService,
    refresher: Arc<dyn TokenRefresher>,
    cycle: Mutex<()>,
    redirecting: Arc<AtomicBool>,
    forbidden_cooldown: Duration,
}

impl RefreshOrchestrator {
    pub fn new(
        session: Session,
        refresher: Arc<dyn TokenRefresher>,
        forbidden_cooldown: Duration,
    ) -> Self {
        Self {
            logout: LogoutService::new(session.clone()),
            session,
            refresher,
            cycle: Mutex::new(()),
            redirecting: Arc::new(AtomicBool::new(false)),
            forbidden_cooldown,
        }
    }

    /// True while a 403 logout is suppressing further auth handling
    pub fn is_redirecting(&self) -> bool {
        self.redirecting.load(Ordering::SeqCst)
    }

    /// Run `call` with the current access token, handling 401/403.
    ///
    /// `call` runs at most twice. A 401 on the second run is returned
    /// without another refresh; a 403 on it still logs out.
    pub async fn execute<T, F, Fut>(&self, call: F) -> ClientResult<T>
    where
        F: Fn(Option<String>) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let sent_with = self.session.access_token();

        let err = match call(sent_with.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match err.status() {
            Some(UNAUTHORIZED) => match self.recover(sent_with.as_deref()).await {
                Recovery::Retry(access_token) => {
                    debug!("[REFRESH] Retrying request with refreshed token");
                    let retried = call(Some(access_token)).await;
                    if retried.as_ref().is_err_and(ClientError::is_forbidden) {
                        self.handle_forbidden().await;
                    }
                    retried
                }
                Recovery::GiveUp => Err(err),
            },
            Some(FORBIDDEN) => {
                self.handle_forbidden().await;
                Err(err)
            }
            _ => Err(err),
        }
    }

    async fn recover(&self, sent_with: Option<&str>) -> Recovery {
        if self.is_redirecting() {
            debug!("[REFRESH] Redirect in progress, passing 401 through");
            return Recovery::GiveUp;
        }

        let _cycle = self.cycle.lock().await;

        // State may have moved on while this call waited for the cycle lock
        if self.is_redirecting() {
            return Recovery::GiveUp;
        }

        let Some(current) = self.session.access_token() else {
            debug!("[REFRESH] Session already logged out, passing 401 through");
            return Recovery::GiveUp;
        };

        if sent_with != Some(current.as_str()) {
            debug!("[REFRESH] Token already replaced by another request");
            return Recovery::Retry(current);
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("[REFRESH] No refresh token available");
            self.force_logout(UNAUTHORIZED);
            return Recovery::GiveUp;
        };

        self.session.set_refreshing_token(true);
        let result = self.refresher.refresh(Some(current.as_str()), &refresh_token).await;
        self.session.set_refreshing_token(false);

        match result.and_then(|tokens| self.store(tokens)) {
            Ok(access_token) => {
                info!("[REFRESH] Access token refreshed");
                Recovery::Retry(access_token)
            }
            Err(e) => {
                error!("[REFRESH] Token refresh error: {e}");
                self.force_logout(UNAUTHORIZED);
                Recovery::GiveUp
            }
        }
    }

    fn store(&self, tokens: TokenPair) -> ClientResult<String> {
        let access_token = tokens.access_token.clone();
        if !self.session.login(tokens.access_token, tokens.refresh_token) {
            return Err(ClientError::refresh_failed(
                "refreshed access token is invalid or already expired",
            ));
        }
        Ok(access_token)
    }

    async fn handle_forbidden(&self) {
        let _cycle = self.cycle.lock().await;

        if self.redirecting.swap(true, Ordering::SeqCst) {
            debug!("[REFRESH] Redirect in progress, passing 403 through");
            return;
        }

        self.force_logout(FORBIDDEN);

        let redirecting = Arc::clone(&self.redirecting);
        let cooldown = self.forbidden_cooldown;
        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            redirecting.store(false, Ordering::SeqCst);
        });
    }

    fn force_logout(&self, status: u16) {
        if let Err(e) = self.logout.logout_on_auth_error(status) {
            error!("[LOGOUT] Error during auth error logout: {e}");
        }
    }
}
