//! Runtime settings for the interactive session.
//!
//! Nothing is persisted; values come from CLI flags and their `PROCMAN_*`
//! environment fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use crate::action::KillSignal;

/// Default cursor blink period.
pub const DEFAULT_BLINK_MS: u64 = 500;

/// Settings for `procman run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Signal sent by the kill button.
    pub signal: KillSignal,
    /// Record kill requests instead of sending signals.
    pub dry_run: bool,
    /// Cursor blink period; `0` disables blinking.
    pub blink_ms: u64,
    /// List every user's processes, not just the caller's.
    pub all_users: bool,
    /// Where interactive-mode logs go.
    pub log_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            signal: KillSignal::Kill,
            dry_run: false,
            blink_ms: DEFAULT_BLINK_MS,
            all_users: false,
            log_file: None,
        }
    }
}

impl RunConfig {
    /// Blink period, `None` when disabled.
    pub fn blink_interval(&self) -> Option<Duration> {
        (self.blink_ms > 0).then(|| Duration::from_millis(self.blink_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::default();
        assert_eq!(config.signal, KillSignal::Kill);
        assert!(!config.dry_run);
        assert_eq!(config.blink_interval(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn zero_blink_disables_ticks() {
        let config = RunConfig {
            blink_ms: 0,
            ..RunConfig::default()
        };
        assert_eq!(config.blink_interval(), None);
    }
}
