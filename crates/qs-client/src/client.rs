use crate::transport::send_json;
use crate::{AuthApi, ClientResult, LoginRequest, RefreshOrchestrator, TENANT_HEADER};

use qs_auth::{AuthErrorMarker, FileStorage, LogoutService, Session, SessionStorage};
use qs_config::{ApiConfig, Config};

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const PERMISSIONS_PATH: &str = "/api/v1/identity/permissions";

/// HTTP client for the Qualitas REST API.
///
/// Every call carries the session's bearer token and the configured
/// tenant, and is routed through a [`RefreshOrchestrator`].
pub struct ApiClient {
    pub base_url: String,
    pub tenant: Option<String>,
    http: ReqwestClient,
    session: Session,
    auth: AuthApi,
    logout: LogoutService,
    orchestrator: RefreshOrchestrator,
}

impl ApiClient {
    /// Create a client over an existing session.
    pub fn new(
        config: &ApiConfig,
        session: Session,
        forbidden_cooldown: Duration,
    ) -> ClientResult<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let tenant = config.tenant.clone();
        let auth = AuthApi::new(&base_url, tenant.as_deref(), http.clone());
        let orchestrator =
            RefreshOrchestrator::new(session.clone(), Arc::new(auth.clone()), forbidden_cooldown);

        Ok(Self {
            base_url,
            tenant,
            http,
            logout: LogoutService::new(session.clone()),
            session,
            auth,
            orchestrator,
        })
    }

    /// Create a client from loaded configuration, rehydrating the session
    /// from the configured storage scope.
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session.storage_dir {
            Some(dir) => Arc::new(FileStorage::in_dir(dir)),
            None => Arc::new(FileStorage::in_runtime_dir()),
        };
        let session = Session::rehydrate(storage);

        Self::new(&config.api, session, config.session.forbidden_cooldown())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn orchestrator(&self) -> &RefreshOrchestrator {
        &self.orchestrator
    }

    /// Build a request with bearer and tenant headers
    fn request(&self, method: Method, path: &str, access_token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);

        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }

        if let Some(ref tenant) = self.tenant {
            req = req.header(TENANT_HEADER, tenant);
        }

        req
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        self.orchestrator
            .execute(|access_token| {
                let mut req = self.request(method.clone(), path, access_token.as_deref());
                if let Some(ref body) = body {
                    req = req.json(body);
                }
                send_json(req)
            })
            .await
    }

    // =========================================================================
    // REST Operations
    // =========================================================================

    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.call(Method::GET, path, None).await
    }

    /// GET and decode into `T`
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let value = self.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let body = serde_json::to_value(body)?;
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let body = serde_json::to_value(body)?;
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.call(Method::DELETE, path, None).await
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Sign in and load permissions.
    ///
    /// Returns whether the session is still authenticated once permissions
    /// are loaded. A failed permission fetch does not fail the sign-in; it
    /// leaves an empty permission list and a recorded `permission_error`.
    /// A 403 on that fetch logs the session out like any other call.
    pub async fn sign_in(&self, credentials: &LoginRequest, tenant: &str) -> ClientResult<bool> {
        self.session.set_logging_in(true);

        let result = self.exchange_and_load(credentials, tenant).await;

        self.session.set_logging_in(false);

        if let Err(ref e) = result {
            error!("[AUTH] Login error: {e}");
        }
        result
    }

    async fn exchange_and_load(&self, credentials: &LoginRequest, tenant: &str) -> ClientResult<bool> {
        let tokens = self.auth.issue_token(credentials, tenant).await?;
        self.session.login(tokens.access_token, tokens.refresh_token);
        self.load_permissions().await;
        Ok(self.session.is_authenticated())
    }

    /// Fetch permissions into the session. Never fails; errors are recorded
    /// in `permission_error`.
    pub async fn load_permissions(&self) {
        self.session.set_loading_permissions(true);
        self.session.set_permission_error(None);

        match self.fetch_permissions().await {
            Ok(permissions) => {
                info!(
                    "[PERMISSIONS] Successfully fetched permissions: {} permissions found",
                    permissions.len()
                );
                self.session.set_permissions(permissions);
            }
            Err(e) => {
                error!(
                    "[PERMISSIONS] Failed to fetch user permissions: {:?} {e}",
                    e.status()
                );
                self.session.set_permission_error(Some(e.to_string()));
                self.session.set_permissions(Vec::new());
            }
        }

        self.session.set_loading_permissions(false);
    }

    /// Permission strings of the current principal. A null body is an empty list.
    pub async fn fetch_permissions(&self) -> ClientResult<Vec<String>> {
        let permissions: Option<Vec<String>> = self.get_as(PERMISSIONS_PATH).await?;
        Ok(permissions.unwrap_or_default())
    }

    /// Explicit sign-out: reset the session and wipe its storage scope.
    pub fn sign_out(&self) -> ClientResult<()> {
        self.logout.logout()?;
        Ok(())
    }

    /// Why the last forced logout happened, if not yet consumed.
    pub fn take_auth_error(&self) -> ClientResult<Option<AuthErrorMarker>> {
        Ok(self.logout.take_auth_error()?)
    }
}
