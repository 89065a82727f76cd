use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok, some};
use serial_test::serial;

// =========================================================================
// Validation Tests - Session
// =========================================================================

#[test]
#[serial]
fn given_cooldown_zero_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _cooldown = EnvGuard::set("QS_SESSION_FORBIDDEN_COOLDOWN_MS", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.session.forbidden_cooldown(), eq(Duration::ZERO));
}

#[test]
#[serial]
fn given_cooldown_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _cooldown = EnvGuard::set("QS_SESSION_FORBIDDEN_COOLDOWN_MS", "60001");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_storage_dir_env_when_load_then_storage_dir_set() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _dir = EnvGuard::set("QS_SESSION_STORAGE_DIR", "/tmp/qualitas-session");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.session.storage_dir.as_deref(),
        some(eq("/tmp/qualitas-session"))
    );
}
