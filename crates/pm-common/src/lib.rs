//! procman common types, IDs, and errors.
//!
//! Shared by the core library and the `procman` binary:
//! - Process identity
//! - Categorized error type with stable codes
//! - Output format selection for the non-interactive commands

pub mod error;
pub mod id;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use id::ProcessId;
pub use output::OutputFormat;
