mod logout_service;
mod token_decoder;

use crate::{AccessTokenClaims, RoleClaim};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const HOUR: i64 = 3600;

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) fn create_test_token(claims: &AccessTokenClaims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

pub(crate) fn valid_claims() -> AccessTokenClaims {
    AccessTokenClaims {
        jti: Some("user-123".to_string()),
        email: Some("ana@qualitas.test".to_string()),
        name: Some("ana".to_string()),
        full_name: Some("Ana Torres".to_string()),
        role: Some(RoleClaim::Single("Auditor".to_string())),
        tenant: Some("acme".to_string()),
        image_url: Some("https://cdn.qualitas.test/ana.png".to_string()),
        exp: Some(now() + HOUR),
        iat: Some(now()),
    }
}

pub(crate) fn token_expiring_in(secs: i64) -> String {
    let mut claims = valid_claims();
    claims.exp = Some(now() + secs);
    create_test_token(&claims)
}
