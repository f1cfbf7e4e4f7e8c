//! Common types for process enumeration.

use pm_common::ProcessId;
use serde::{Deserialize, Serialize};

/// Label used when neither cmdline, exe, nor comm yields anything.
pub const UNLABELED: &str = "[kernel or zombie process]";

/// A single process as shown in the list.
///
/// Immutable once built; a refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process ID.
    pub pid: ProcessId,

    /// Owning user name, or the numeric uid when it cannot be resolved.
    pub owner: String,

    /// Command line, executable path, or command name.
    pub label: String,
}

impl ProcessRecord {
    pub fn new(pid: impl Into<ProcessId>, owner: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            owner: owner.into(),
            label: label.into(),
        }
    }

    /// The line the list displays and the query matches against.
    pub fn display_line(&self) -> String {
        format!("{:<6}  {:<10}  {}", self.pid.0, self.owner, self.label)
    }
}

/// Result of an enumeration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Collected process records, ascending by pid.
    pub processes: Vec<ProcessRecord>,

    /// Scan metadata.
    pub metadata: ScanMetadata,
}

/// Metadata about an enumeration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Timestamp when the scan started (RFC 3339).
    pub started_at: String,

    /// Duration of the scan.
    pub duration_ms: u64,

    /// Number of processes collected.
    pub process_count: usize,

    /// Entries that vanished or could not be read.
    pub skipped: usize,
}
