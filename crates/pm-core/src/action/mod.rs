//! Process termination.

#[cfg(unix)]
pub mod signal;

use std::str::FromStr;

use clap::ValueEnum;
use pm_common::ProcessId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::event_names;

#[cfg(unix)]
pub use signal::SignalTerminator;

/// Errors delivering a termination request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("process {pid} not found")]
    NotFound { pid: u32 },
    #[error("permission denied signalling process {pid}")]
    PermissionDenied { pid: u32 },
    #[error("invalid pid {pid}")]
    InvalidPid { pid: u32 },
    #[error("action failed: {0}")]
    Failed(String),
}

impl From<ActionError> for pm_common::Error {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::NotFound { pid } => pm_common::Error::ProcessNotFound { pid },
            ActionError::PermissionDenied { pid } => pm_common::Error::PermissionDenied { pid },
            ActionError::InvalidPid { pid } => {
                pm_common::Error::InvalidArgument(format!("pid {pid} cannot be signalled"))
            }
            ActionError::Failed(msg) => pm_common::Error::ActionFailed(msg),
        }
    }
}

/// Which signal a kill sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KillSignal {
    /// SIGKILL: cannot be caught or ignored.
    #[default]
    Kill,
    /// SIGTERM: asks the process to exit.
    Term,
}

impl KillSignal {
    #[cfg(unix)]
    pub fn as_raw(self) -> i32 {
        match self {
            KillSignal::Kill => libc::SIGKILL,
            KillSignal::Term => libc::SIGTERM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KillSignal::Kill => "SIGKILL",
            KillSignal::Term => "SIGTERM",
        }
    }
}

impl std::fmt::Display for KillSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KillSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kill" | "sigkill" | "9" => Ok(KillSignal::Kill),
            "term" | "sigterm" | "15" => Ok(KillSignal::Term),
            other => Err(format!("unknown signal: {other}")),
        }
    }
}

/// Delivers termination requests.
pub trait Terminator {
    fn terminate(&mut self, pid: ProcessId) -> Result<(), ActionError>;
}

impl<T: Terminator + ?Sized> Terminator for Box<T> {
    fn terminate(&mut self, pid: ProcessId) -> Result<(), ActionError> {
        (**self).terminate(pid)
    }
}

/// Records requests without signalling anything (`--dry-run`).
#[derive(Debug, Clone, Default)]
pub struct NoopTerminator {
    pub requested: Vec<ProcessId>,
}

impl Terminator for NoopTerminator {
    fn terminate(&mut self, pid: ProcessId) -> Result<(), ActionError> {
        tracing::info!(target: event_names::ACTION_TERMINATE, %pid, dry_run = true, "would terminate");
        self.requested.push(pid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names_parse() {
        assert_eq!("KILL".parse::<KillSignal>(), Ok(KillSignal::Kill));
        assert_eq!("sigterm".parse::<KillSignal>(), Ok(KillSignal::Term));
        assert_eq!("15".parse::<KillSignal>(), Ok(KillSignal::Term));
        assert!("hup".parse::<KillSignal>().is_err());
    }

    #[test]
    fn default_signal_is_kill() {
        assert_eq!(KillSignal::default(), KillSignal::Kill);
        assert_eq!(KillSignal::Kill.to_string(), "SIGKILL");
    }

    #[test]
    fn noop_records_requests() {
        let mut t = NoopTerminator::default();
        t.terminate(ProcessId(5)).unwrap();
        t.terminate(ProcessId(6)).unwrap();
        assert_eq!(t.requested, vec![ProcessId(5), ProcessId(6)]);
    }

    #[test]
    fn action_errors_map_to_common_errors() {
        let err: pm_common::Error = ActionError::PermissionDenied { pid: 1 }.into();
        assert_eq!(err.code(), 31);
        let err: pm_common::Error = ActionError::NotFound { pid: 2 }.into();
        assert!(matches!(err, pm_common::Error::ProcessNotFound { pid: 2 }));
    }
}
