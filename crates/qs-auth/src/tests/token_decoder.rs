use crate::tests::{HOUR, create_test_token, now, token_expiring_in, valid_claims};
use crate::{AccessTokenClaims, AuthError, RoleClaim, TokenDecoder, decode_user, is_token_expired};

#[test]
fn given_valid_token_when_decoded_then_user_maps_claims() {
    let token = create_test_token(&valid_claims());

    let user = decode_user(&token).unwrap();

    assert_eq!(user.id, "user-123");
    assert_eq!(user.email, "ana@qualitas.test");
    assert_eq!(user.name, "ana");
    assert_eq!(user.full_name, "Ana Torres");
    assert_eq!(user.role, "Auditor");
    assert_eq!(user.tenant, "acme");
    assert_eq!(
        user.image_url.as_deref(),
        Some("https://cdn.qualitas.test/ana.png")
    );
}

#[test]
fn given_only_expiry_claim_when_decoded_then_optional_fields_default() {
    let claims = AccessTokenClaims {
        exp: Some(now() + HOUR),
        ..AccessTokenClaims::default()
    };
    let token = create_test_token(&claims);

    let user = decode_user(&token).unwrap();

    assert_eq!(user.id, "");
    assert_eq!(user.email, "");
    assert_eq!(user.name, "");
    assert_eq!(user.full_name, "");
    assert_eq!(user.role, "");
    assert_eq!(user.tenant, "root");
    assert!(user.image_url.is_none());
}

#[test]
fn given_expired_token_when_decoded_then_no_user() {
    let token = token_expiring_in(-HOUR);

    assert!(decode_user(&token).is_none());
    assert!(is_token_expired(&token));
}

#[test]
fn given_expiry_equal_to_now_when_decoded_then_no_user() {
    let token = token_expiring_in(HOUR);
    let decoder = TokenDecoder::new();
    let claims = decoder.decode_claims(&token).unwrap();
    let exp = claims.exp.unwrap();

    assert!(decoder.decode_user_at(&token, exp - 1).is_some());
    assert!(decoder.decode_user_at(&token, exp).is_none());
    assert!(decoder.is_token_expired_at(&token, exp));
}

#[test]
fn given_expired_token_with_full_claims_when_validated_then_token_expired_error() {
    let mut claims = valid_claims();
    claims.exp = Some(1_000);
    let token = create_test_token(&claims);

    let result = TokenDecoder::new().validate_at(&token, 2_000);

    assert!(matches!(
        result,
        Err(AuthError::TokenExpired {
            expired_at: 1_000,
            ..
        })
    ));
}

#[test]
fn given_token_without_expiry_when_validated_then_missing_expiry_error() {
    let mut claims = valid_claims();
    claims.exp = None;
    let token = create_test_token(&claims);

    let result = TokenDecoder::new().validate_at(&token, now());

    assert!(matches!(result, Err(AuthError::MissingExpiry { .. })));
    assert!(decode_user(&token).is_none());
}

#[test]
fn given_garbage_token_when_decoded_then_decode_error_and_no_user() {
    let result = TokenDecoder::new().decode_claims("not-a-jwt");

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
    assert!(result.unwrap_err().is_token_error());
    assert!(decode_user("not-a-jwt").is_none());
    assert!(is_token_expired("not-a-jwt"));
}

#[test]
fn given_token_signed_with_unknown_key_when_decoded_then_claims_still_read() {
    let claims = valid_claims();
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-server-side-secret"),
    )
    .unwrap();

    let user = decode_user(&token).unwrap();

    assert_eq!(user.id, "user-123");
}

#[test]
fn given_rs256_header_when_decoded_then_claims_still_read() {
    // {"alg":"RS256","typ":"JWT"}
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";
    let token = create_test_token(&valid_claims());
    let (_, rest) = token.split_once('.').unwrap();
    let token = format!("{RS256_HEADER}.{rest}");

    let user = decode_user(&token).unwrap();

    assert_eq!(user.id, "user-123");
    assert!(!is_token_expired(&token));
}

#[test]
fn given_malformed_token_when_decoded_then_error_points_at_decoder() {
    let err = TokenDecoder::new().decode_claims("a.b").unwrap_err();

    let AuthError::JwtDecode { location, .. } = &err else {
        panic!("expected JwtDecode, got {err:?}");
    };
    assert!(location.file.ends_with("token_decoder.rs"));
}

#[test]
fn given_fractional_expiry_when_decoded_then_floored_to_seconds() {
    let exp = now() + HOUR;
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &serde_json::json!({ "jti": "user-123", "exp": exp as f64 + 0.5, "iat": 1.25 }),
        &jsonwebtoken::EncodingKey::from_secret(crate::tests::TEST_SECRET),
    )
    .unwrap();

    let claims = TokenDecoder::new().decode_claims(&token).unwrap();

    assert_eq!(claims.exp, Some(exp));
    assert_eq!(claims.iat, Some(1));
    assert_eq!(decode_user(&token).unwrap().id, "user-123");
}

#[test]
fn given_role_array_when_decoded_then_first_role_used() {
    let mut claims = valid_claims();
    claims.role = Some(RoleClaim::Many(vec![
        "Admin".to_string(),
        "Auditor".to_string(),
    ]));
    let token = create_test_token(&claims);

    let user = decode_user(&token).unwrap();

    assert_eq!(user.role, "Admin");
}

#[test]
fn given_raw_payload_with_uri_claims_when_deserialized_then_fields_mapped() {
    let json = r#"{
        "jti": "abc",
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress": "x@y.z",
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name": "x",
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": ["Basic"],
        "fullName": "X Y",
        "exp": 1,
        "iat": 0
    }"#;

    let claims: AccessTokenClaims = serde_json::from_str(json).unwrap();

    assert_eq!(claims.email.as_deref(), Some("x@y.z"));
    assert_eq!(claims.full_name.as_deref(), Some("X Y"));
    assert_eq!(claims.role.unwrap().primary(), "Basic");
    assert!(claims.tenant.is_none());
}
