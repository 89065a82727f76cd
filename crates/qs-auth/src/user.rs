use crate::{AccessTokenClaims, DEFAULT_TENANT};

use serde::{Deserialize, Serialize};

/// Signed-in user as projected from the access token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub full_name: String,
    pub role: String,
    pub tenant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<AccessTokenClaims> for User {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            id: claims.jti.unwrap_or_default(),
            email: claims.email.unwrap_or_default(),
            name: claims.name.unwrap_or_default(),
            full_name: claims.full_name.unwrap_or_default(),
            role: claims
                .role
                .as_ref()
                .map(|role| role.primary().to_string())
                .unwrap_or_default(),
            tenant: claims
                .tenant
                .unwrap_or_else(|| String::from(DEFAULT_TENANT)),
            image_url: claims.image_url,
        }
    }
}
