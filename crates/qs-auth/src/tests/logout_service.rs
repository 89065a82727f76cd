use crate::tests::{create_test_token, valid_claims};
use crate::{AUTH_ERROR_KEY, AuthErrorMarker, LogoutService, MemoryStorage, Session, SessionStorage};

use std::sync::Arc;

fn logged_in() -> (Arc<MemoryStorage>, Session, LogoutService) {
    let storage = Arc::new(MemoryStorage::new());
    let session = Session::new(storage.clone());
    session.login(create_test_token(&valid_claims()), "r1".to_string());
    session.set_permissions(vec!["A".to_string()]);
    let service = LogoutService::new(session.clone());
    (storage, session, service)
}

#[test]
fn given_session_when_logout_then_state_reset_and_scope_cleared() {
    let (storage, session, service) = logged_in();
    storage.set_item("unrelated", "x").unwrap();

    service.logout().unwrap();

    assert!(!session.is_authenticated());
    assert!(session.permissions().is_empty());
    assert!(storage.is_empty());
}

#[test]
fn given_logged_out_session_when_logout_again_then_same_result() {
    let (storage, session, service) = logged_in();
    service.logout().unwrap();
    let once = session.snapshot();

    service.logout().unwrap();

    assert_eq!(session.snapshot(), once);
    assert!(storage.is_empty());
}

#[test]
fn given_401_when_forced_logout_then_session_expired_marker_written() {
    let (storage, session, service) = logged_in();

    let marker = service.logout_on_auth_error(401).unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(marker.message, "Session expired");
    assert!(marker.is_session_expired());
    assert!(storage.get_item(AUTH_ERROR_KEY).unwrap().is_some());
}

#[test]
fn given_403_when_forced_logout_then_access_denied_marker_written() {
    let (_storage, _session, service) = logged_in();

    let marker = service.logout_on_auth_error(403).unwrap();

    assert_eq!(marker.status, 403);
    assert_eq!(marker.message, "Access denied");
}

#[test]
fn given_marker_when_taken_then_consumed_once() {
    let (_storage, _session, service) = logged_in();
    let written = service.logout_on_auth_error(401).unwrap();

    let first = service.take_auth_error().unwrap();
    let second = service.take_auth_error().unwrap();

    assert_eq!(first, Some(written));
    assert_eq!(second, None);
}

#[test]
fn given_marker_when_serialized_then_has_status_message_timestamp() {
    let marker = AuthErrorMarker::for_status_at(401, 1_700_000_000_000);

    let json = serde_json::to_value(&marker).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "status": 401,
            "message": "Session expired",
            "timestamp": 1_700_000_000_000_i64
        })
    );
}
