//! Event levels and the tracing targets procman emits under.

use serde::{Deserialize, Serialize};

/// Log levels as they appear in JSONL output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Standard event targets. JSONL output reports the target as `event`.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    pub const SCAN: &str = "collect.scan";

    pub const UI_STARTED: &str = "ui.started";
    pub const UI_USER_INPUT: &str = "ui.user_input";
    pub const UI_STATE_TRANSITION: &str = "ui.state_transition";
    pub const UI_FINISHED: &str = "ui.finished";

    pub const ACTION_TERMINATE: &str = "action.terminate";
}
