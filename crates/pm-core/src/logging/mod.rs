//! Structured logging.
//!
//! Two output modes:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scripts
//!
//! stdout is reserved for command payloads. Logs go to stderr, or to a file
//! when one is configured. The interactive UI owns the terminal, so it only
//! logs when a file is given.

pub mod config;
pub mod events;
pub mod layer;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, Level};
pub use layer::JsonlLayer;

use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Call once at startup. Fails only if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if !config.is_enabled() {
        return Ok(());
    }

    let filter = build_filter(config);

    let file = match &config.file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    // Subscriber installation only fails if one is already set; keep it.
    let _ = match config.format {
        LogFormat::Human => {
            let use_ansi = file.is_none() && io::stderr().is_terminal();
            let writer = match file {
                Some(file) => BoxMakeWriter::new(Mutex::new(file)),
                None => BoxMakeWriter::new(io::stderr),
            };
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let writer: Box<dyn Write + Send> = match file {
                Some(file) => Box::new(file),
                None => Box::new(io::stderr()),
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(JsonlLayer::new(writer))
                .try_init()
        }
    };

    Ok(())
}

/// A pinned level wins over `RUST_LOG`; otherwise its directives apply on
/// top of the configured default.
fn build_filter(config: &LogConfig) -> EnvFilter {
    let level = LevelFilter::from(config.level);
    if config.level_explicit {
        EnvFilter::default().add_directive(level.into())
    } else {
        EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy()
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are enough to correlate one invocation
    format!("run-{}", &uuid.simple().to_string()[..12])
}
