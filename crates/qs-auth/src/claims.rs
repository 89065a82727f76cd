use serde::{Deserialize, Deserializer, Serialize};

/// Access token payload as issued by the identity backend.
///
/// Every claim is optional on the wire; missing ones fall back to
/// defaults when projected into a [`crate::User`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Token id, doubles as the user identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Expiration timestamp (Unix seconds)
    #[serde(
        default,
        deserialize_with = "unix_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,
    /// Issued at timestamp (Unix seconds)
    #[serde(
        default,
        deserialize_with = "unix_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,
}

/// NumericDate may carry a fractional part; it is floored to whole seconds.
fn unix_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = Option::<f64>::deserialize(deserializer)?;
    Ok(seconds.map(|s| s.floor() as i64))
}

/// The role claim is a string for one role and an array for several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    Single(String),
    Many(Vec<String>),
}

impl RoleClaim {
    /// First role listed, or "" when the array is empty
    pub fn primary(&self) -> &str {
        match self {
            Self::Single(role) => role,
            Self::Many(roles) => roles.first().map(String::as_str).unwrap_or_default(),
        }
    }
}

