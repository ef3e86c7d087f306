//! Structured logging for the fireball viewer.
//!
//! Provides structured, filterable logging via the `tracing` ecosystem:
//! console output with timestamps and module paths, plus JSON file logging
//! in debug builds for post-mortem analysis. Integrates with the
//! configuration system for runtime log level control.

use std::path::Path;

use pyre_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing subscriber.
///
/// Sets up console output with timestamps, module paths, and severity
/// levels; an optional JSON file layer in debug builds; and
/// environment-based filtering (`RUST_LOG` wins, then the config's
/// `debug.log_level`, then `info`).
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    // In debug builds, also log to a file for post-mortem analysis.
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("pyre.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::info!(log_dir = %log_dir.display(), "logging initialized with file output");
        return;
    }

    subscriber.init();
    tracing::info!("logging initialized");
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_json_layer_emits_parseable_records() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(frame = 7u64, "frame complete");
        });

        let bytes = writer.0.lock().unwrap().clone();
        let text = std::str::from_utf8(&bytes).unwrap();
        let line = text.lines().next().unwrap();
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["fields"]["message"], "frame complete");
        assert_eq!(record["fields"]["frame"], 7);
        assert_eq!(record["level"], "INFO");
    }

    #[test]
    fn test_default_filter_is_info() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,pyre_render=trace",
            "warn,pyre_viewer=debug",
            "error",
        ];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_config_log_level_override() {
        let mut config = Config::default();
        config.debug.log_level = "trace".to_string();
        // Mirrors the filter selection in init_logging.
        let filter_str = if config.debug.log_level.is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            config.debug.log_level.clone()
        };
        assert_eq!(filter_str, "trace");
    }

    #[test]
    fn test_log_file_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("pyre.log");
        assert_eq!(log_file_path.file_name().unwrap(), "pyre.log");
    }
}
