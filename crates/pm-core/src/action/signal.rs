//! Signal delivery via `kill(2)`.

use pm_common::ProcessId;
use tracing::{info, warn};

use super::{ActionError, KillSignal, Terminator};
use crate::logging::event_names;

/// Sends `signal` to the target pid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalTerminator {
    signal: KillSignal,
}

impl SignalTerminator {
    pub fn new(signal: KillSignal) -> Self {
        Self { signal }
    }

    pub fn signal(&self) -> KillSignal {
        self.signal
    }
}

/// Send a raw signal to a single process.
pub fn send_signal(pid: ProcessId, signal: i32) -> Result<(), ActionError> {
    // A non-positive pid would address a process group or every process.
    let raw = pid.as_raw().ok_or(ActionError::InvalidPid { pid: pid.0 })?;

    // SAFETY: kill has no memory-safety preconditions; raw is a positive pid.
    let result = unsafe { libc::kill(raw, signal) };
    if result == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(ActionError::NotFound { pid: pid.0 }),
        Some(libc::EPERM) => Err(ActionError::PermissionDenied { pid: pid.0 }),
        Some(libc::EINVAL) => Err(ActionError::Failed("invalid signal".to_string())),
        _ => Err(ActionError::Failed(err.to_string())),
    }
}

impl Terminator for SignalTerminator {
    fn terminate(&mut self, pid: ProcessId) -> Result<(), ActionError> {
        match send_signal(pid, self.signal.as_raw()) {
            Ok(()) => {
                info!(target: event_names::ACTION_TERMINATE, %pid, signal = %self.signal, "killed process");
                Ok(())
            }
            Err(e) => {
                warn!(
                    target: event_names::ACTION_TERMINATE,
                    %pid,
                    signal = %self.signal,
                    error = %e,
                    "failed to kill process"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_zero_is_rejected_before_kill() {
        assert_eq!(
            send_signal(ProcessId(0), 0),
            Err(ActionError::InvalidPid { pid: 0 })
        );
        assert_eq!(
            send_signal(ProcessId(u32::MAX), 0),
            Err(ActionError::InvalidPid { pid: u32::MAX })
        );
    }

    #[test]
    fn probing_self_with_signal_zero_succeeds() {
        let me = ProcessId(std::process::id());
        assert_eq!(send_signal(me, 0), Ok(()));
    }

    #[test]
    fn terminating_a_reaped_child_reports_not_found() {
        let mut child = std::process::Command::new("true")
            .spawn()
            .expect("spawn true");
        let pid = ProcessId(child.id());
        child.wait().expect("wait");

        let mut terminator = SignalTerminator::new(KillSignal::Term);
        assert_eq!(
            terminator.terminate(pid),
            Err(ActionError::NotFound { pid: pid.0 })
        );
    }

    #[test]
    fn kill_signal_terminates_child() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("spawn sleep");
        let mut terminator = SignalTerminator::default();
        terminator
            .terminate(ProcessId(child.id()))
            .expect("kill sleep");
        let status = child.wait().expect("wait");
        assert!(!status.success());
    }
}
