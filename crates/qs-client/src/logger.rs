use crate::{ClientError, ClientResult};

use qs_config::LoggingConfig;

use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize the global logger with fern.
///
/// Writes to `config.file` when set (plain, appended), otherwise to
/// stdout, colored when `config.colored`. Can only succeed once per
/// process.
pub fn initialize(config: &LoggingConfig) -> ClientResult<()> {
    let level_filter = config.level.0;

    let dispatch = match config.file.as_deref() {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(log_path))
                .map_err(|e| ClientError::logger(format!("Failed to open log file {log_path}: {e}")))?;

            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{file}:{line}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = record.level(),
                        message = message,
                        file = record.file().unwrap_or("unknown"),
                        line = record.line().unwrap_or(0),
                    ))
                })
                .chain(file)
        }
        None if config.colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{file}:{line}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = colors.color(record.level()),
                        message = message,
                        file = record.file().unwrap_or("unknown"),
                        line = record.line().unwrap_or(0),
                    ))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{file}:{line}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    file = record.file().unwrap_or("unknown"),
                    line = record.line().unwrap_or(0),
                ))
            })
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(dispatch)
        .apply()
        .map_err(|e| ClientError::logger(format!("Failed to initialize logger: {e}")))?;

    match config.file.as_deref() {
        Some(path) => info!("Logger initialized: level={level_filter:?}, file={path}"),
        None => info!("Logger initialized: level={level_filter:?}, stdout"),
    }

    Ok(())
}
