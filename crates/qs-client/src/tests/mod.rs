mod logger;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;

/// Signed access token for `user_id`, valid for an hour
pub(crate) fn access_token(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "jti": user_id,
            "tenant": "acme",
            "exp": now + 3600,
            "iat": now,
        }),
        &EncodingKey::from_secret(b"test-secret-key-at-least-32-bytes"),
    )
    .unwrap()
}
