//! Process identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Process ID wrapper with display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Raw pid as accepted by `kill(2)`.
    ///
    /// Returns `None` when the value does not fit a positive `pid_t`, which
    /// would otherwise address a process group or every process.
    pub fn as_raw(self) -> Option<i32> {
        i32::try_from(self.0).ok().filter(|p| *p > 0)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        ProcessId(pid)
    }
}

impl FromStr for ProcessId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(ProcessId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(ProcessId(1234).to_string(), "1234");
    }

    #[test]
    fn raw_rejects_zero_and_overflow() {
        assert_eq!(ProcessId(0).as_raw(), None);
        assert_eq!(ProcessId(u32::MAX).as_raw(), None);
        assert_eq!(ProcessId(42).as_raw(), Some(42));
    }

    #[test]
    fn parses_with_whitespace() {
        assert_eq!(" 77 ".parse::<ProcessId>().unwrap(), ProcessId(77));
        assert!("abc".parse::<ProcessId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&ProcessId(9)).unwrap();
        assert_eq!(json, "9");
    }
}
