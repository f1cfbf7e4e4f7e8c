//! procman core library
//!
//! - The list-interaction state machine ([`list`])
//! - Process enumeration from `/proc` ([`collect`])
//! - Signal delivery ([`action`])
//! - Logging, exit codes, and payload rendering for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod action;
pub mod collect;
pub mod config;
pub mod exit_codes;
pub mod list;
pub mod logging;
pub mod output;

// TUI module (optional, behind "ui" feature)
#[cfg(feature = "ui")]
pub mod tui;
