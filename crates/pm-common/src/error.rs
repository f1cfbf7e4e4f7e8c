//! Error types for procman.
//!
//! Every error carries a stable numeric code, a category, and a short
//! remediation hint. The structured form is what `--format json` prints:
//! ```json
//! {
//!   "code": 31,
//!   "category": "action",
//!   "message": "permission denied signalling process 1",
//!   "recoverable": true,
//!   "context": { "pid": 1 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for procman operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Command-line usage errors.
    Usage,
    /// Process table enumeration errors.
    Collection,
    /// Signal delivery errors.
    Action,
    /// File I/O and serialization errors.
    Io,
    /// Platform or build capability errors.
    Platform,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Usage => write!(f, "usage"),
            ErrorCategory::Collection => write!(f, "collection"),
            ErrorCategory::Action => write!(f, "action"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Platform => write!(f, "platform"),
        }
    }
}

/// Unified error type for procman.
#[derive(Error, Debug)]
pub enum Error {
    // Usage errors (10-19)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Collection errors (20-29)
    #[error("process collection failed: {0}")]
    Collection(String),

    // Action errors (30-39)
    #[error("process {pid} not found")]
    ProcessNotFound { pid: u32 },

    #[error("permission denied signalling process {pid}")]
    PermissionDenied { pid: u32 },

    #[error("action execution failed: {0}")]
    ActionFailed(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Platform errors (70-79)
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("capability not available: {0}")]
    CapabilityMissing(String),
}

impl Error {
    /// Stable error code, grouped by category.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidArgument(_) => 10,
            Error::Collection(_) => 20,
            Error::ProcessNotFound { .. } => 30,
            Error::PermissionDenied { .. } => 31,
            Error::ActionFailed(_) => 32,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::UnsupportedPlatform(_) => 70,
            Error::CapabilityMissing(_) => 71,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidArgument(_) => ErrorCategory::Usage,
            Error::Collection(_) => ErrorCategory::Collection,
            Error::ProcessNotFound { .. }
            | Error::PermissionDenied { .. }
            | Error::ActionFailed(_) => ErrorCategory::Action,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::UnsupportedPlatform(_) | Error::CapabilityMissing(_) => ErrorCategory::Platform,
        }
    }

    /// Returns whether retrying (possibly with different privileges) may help.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::InvalidArgument(_) => true,
            Error::Collection(_) => true,
            Error::ProcessNotFound { .. } => false, // Process is gone
            Error::PermissionDenied { .. } => true, // Can elevate
            Error::ActionFailed(_) => true,
            Error::Io(_) => true,
            Error::Json(_) => false,
            Error::UnsupportedPlatform(_) => false,
            Error::CapabilityMissing(_) => true, // Can rebuild with the feature
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "Run 'procman --help' to see accepted arguments.",
            Error::Collection(_) => "Check that /proc is mounted and readable, then retry.",
            Error::ProcessNotFound { .. } => {
                "The process exited before the signal was sent. Refresh the list."
            }
            Error::PermissionDenied { .. } => {
                "Only processes owned by your user can be signalled without elevated privileges."
            }
            Error::ActionFailed(_) => {
                "Retry the action. Processes in uninterruptible sleep may ignore signals."
            }
            Error::Io(_) => "Check file permissions and free disk space, then retry.",
            Error::Json(_) => "Internal serialization failure. Please report it.",
            Error::UnsupportedPlatform(_) => "procman reads /proc and only runs on Linux.",
            Error::CapabilityMissing(_) => {
                "Rebuild with the missing feature enabled, e.g. 'cargo install procman --features ui'."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "Invalid Argument",
            Error::Collection(_) => "Process Collection Error",
            Error::ProcessNotFound { .. } => "Process Not Found",
            Error::PermissionDenied { .. } => "Permission Denied",
            Error::ActionFailed(_) => "Action Failed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
            Error::UnsupportedPlatform(_) => "Unsupported Platform",
            Error::CapabilityMissing(_) => "Missing Capability",
        }
    }

    /// Multi-line human rendering: headline, reason, fix.
    pub fn to_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., pid).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();
        match err {
            Error::ProcessNotFound { pid } | Error::PermissionDenied { pid } => {
                context.insert("pid".to_string(), serde_json::json!(pid));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}
