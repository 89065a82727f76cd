use crate::logger;

use qs_config::{LogLevel, LoggingConfig};

use log::LevelFilter;

#[test]
fn given_log_file_when_initialized_then_records_written_and_second_init_rejected() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let log_path = temp_dir.path().join("qualitas.log");
    let config = LoggingConfig {
        level: LogLevel(LevelFilter::Info),
        colored: false,
        file: Some(log_path.to_string_lossy().into_owned()),
    };

    logger::initialize(&config).unwrap();
    log::info!("[TEST] session restored");
    log::debug!("[TEST] below threshold");
    log::logger().flush();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("Logger initialized"));
    assert!(contents.contains("INFO] [TEST] session restored"));
    assert!(!contents.contains("below threshold"));

    let second = logger::initialize(&config);
    assert!(second.is_err());
}
