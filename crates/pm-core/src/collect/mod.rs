//! Process enumeration.
//!
//! - [`ProcfsSource`] walks `/proc` for the current user's processes
//! - [`FixedSource`] serves a canned list (tests, demos)
//!
//! Enumeration never fails as a whole: unreadable entries are skipped and an
//! unreadable table yields an empty list.

mod procfs;
mod types;

pub use procfs::{
    cmdline_label, list_pids, parse_passwd, parse_uid_from_status, CollectError, OwnerFilter,
    ProcfsSource,
};
pub use types::{ProcessRecord, ScanMetadata, ScanResult, UNLABELED};

/// Anything that can produce the current process list.
pub trait ProcessSource {
    /// Records in enumeration order.
    fn enumerate(&mut self) -> Vec<ProcessRecord>;
}

/// A fixed list, optionally replaced between refreshes.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    records: Vec<ProcessRecord>,
    /// Number of times `enumerate` ran.
    pub calls: usize,
}

impl FixedSource {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        Self { records, calls: 0 }
    }

    pub fn set(&mut self, records: Vec<ProcessRecord>) {
        self.records = records;
    }

    /// Drop a pid, as if the process exited.
    pub fn remove(&mut self, pid: u32) {
        self.records.retain(|r| r.pid.0 != pid);
    }
}

impl ProcessSource for FixedSource {
    fn enumerate(&mut self) -> Vec<ProcessRecord> {
        self.calls += 1;
        self.records.clone()
    }
}

impl<S: ProcessSource + ?Sized> ProcessSource for Box<S> {
    fn enumerate(&mut self) -> Vec<ProcessRecord> {
        (**self).enumerate()
    }
}
