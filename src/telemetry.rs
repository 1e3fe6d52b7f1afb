//! Tracing subscriber setup.
//!
//! Console output always; a second, non-ANSI layer appends to `logging.file`
//! when one is configured. `RUST_LOG`, when set and parseable, replaces the
//! configured level.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Build the subscriber described by `config` without installing it.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<impl Subscriber + Send + Sync + 'static, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    assemble(config, filter)
}

/// Install the subscriber as the global default. Fails if one is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    build_subscriber(config)?.try_init()?;
    Ok(())
}

fn assemble(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<impl Subscriber + Send + Sync + 'static, TelemetryError> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config.format)];

    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| TelemetryError::LogFile {
                path: path.clone(),
                source,
            })?;
        layers.push(file_layer(file, config.format));
    }

    Ok(tracing_subscriber::registry().with(filter).with(layers))
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer().with_target(true);
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(file: File, format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn file_config(path: PathBuf, format: LogFormat) -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            file: Some(path),
            format,
        }
    }

    #[test]
    fn file_layer_appends_plain_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supervisor.log");
        let subscriber = assemble(
            &file_config(path.clone(), LogFormat::Text),
            EnvFilter::new("info"),
        )
        .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(cycle = 7u64, "Cycle #7 completed successfully");
            tracing::debug!("filtered out");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Cycle #7 completed successfully"));
        assert!(contents.contains("cycle=7"));
        assert!(!contents.contains("filtered out"));
        assert!(!contents.contains("\u{1b}["), "file output must not carry ANSI codes");
    }

    #[test]
    fn json_format_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supervisor.jsonl");
        let subscriber = assemble(
            &file_config(path.clone(), LogFormat::Json),
            EnvFilter::new("info"),
        )
        .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(attempt = 2u32, "Database error, waiting for database to be ready");
        });

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["fields"]["attempt"], 2);
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("supervisor.log");

        let err = assemble(&file_config(path, LogFormat::Text), EnvFilter::new("info"))
            .err()
            .unwrap();

        assert!(matches!(err, TelemetryError::LogFile { .. }));
    }
}
