use crate::transport::send_json;
use crate::{ClientResult, TENANT_HEADER, TokenPair, TokenRefresher};

use async_trait::async_trait;
use log::info;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::{Deserialize, Serialize};

const TOKEN_ISSUE_PATH: &str = "/api/v1/identity/token/issue";
const TOKEN_REFRESH_PATH: &str = "/api/v1/identity/token/refresh";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Credential exchange / refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub access_token_expires_at: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_at: Option<String>,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    refresh_token: &'a str,
}

/// Identity service endpoints that run outside the refresh cycle.
#[derive(Debug, Clone)]
pub struct AuthApi {
    base_url: String,
    tenant: Option<String>,
    http: ReqwestClient,
}

impl AuthApi {
    pub fn new(base_url: &str, tenant: Option<&str>, http: ReqwestClient) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant: tenant.map(String::from),
            http,
        }
    }

    fn request(&self, method: Method, path: &str, tenant: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.request(method, &url);

        match tenant.or(self.tenant.as_deref()) {
            Some(tenant) => req.header(TENANT_HEADER, tenant),
            None => req,
        }
    }

    /// Exchange email/password for a token pair within `tenant`.
    pub async fn issue_token(
        &self,
        credentials: &LoginRequest,
        tenant: &str,
    ) -> ClientResult<TokenResponse> {
        let req = self
            .request(Method::POST, TOKEN_ISSUE_PATH, Some(tenant))
            .json(credentials);
        let body = send_json(req).await?;
        let tokens: TokenResponse = serde_json::from_value(body)?;

        info!("[AUTH] Credentials exchanged for tenant '{tenant}'");
        Ok(tokens)
    }

    pub async fn refresh_token(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> ClientResult<TokenResponse> {
        let body = RefreshRequest {
            token: access_token,
            refresh_token,
        };
        let req = self
            .request(Method::POST, TOKEN_REFRESH_PATH, None)
            .json(&body);
        let body = send_json(req).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl TokenRefresher for AuthApi {
    async fn refresh(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> ClientResult<TokenPair> {
        self.refresh_token(access_token, refresh_token)
            .await
            .map(TokenPair::from)
    }
}
