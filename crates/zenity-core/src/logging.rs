//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "ZENITY_LAUNCHER_LOG";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/zenity-launcher/logs/` so they never
/// interleave with the dialog results printed on stdout.
/// Log level is controlled by the `ZENITY_LAUNCHER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// ZENITY_LAUNCHER_LOG=debug zenity-launch run dialog.toml
/// ZENITY_LAUNCHER_LOG=zenity_process=trace zenity-launch run dialog.toml
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "zenity-launcher.log");

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| {
            EnvFilter::new("zenity_launch=info,zenity_core=info,zenity_process=info,warn")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("zenity-launcher starting, logging to {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("zenity-launcher").join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_per_application() {
        let dir = get_log_directory();
        assert!(dir.ends_with("zenity-launcher/logs"));
    }
}
