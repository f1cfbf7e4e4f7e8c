//! `/proc` enumeration for the current user's processes.
//!
//! Every path is rooted at a configurable directory so tests can build a
//! fake process table under a tempdir.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::types::{ProcessRecord, ScanMetadata, ScanResult, UNLABELED};
use super::ProcessSource;
use crate::logging::event_names;

/// Errors reading a single process entry.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no Uid line in /proc/{pid}/status")]
    MissingUid { pid: u32 },
}

/// Which owners to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerFilter {
    /// Real uid equals `getuid()`.
    #[default]
    CurrentUser,
    Uid(u32),
    Any,
}

impl OwnerFilter {
    fn resolve(self) -> Option<u32> {
        match self {
            // SAFETY: getuid has no preconditions and cannot fail.
            OwnerFilter::CurrentUser => Some(unsafe { libc::getuid() }),
            OwnerFilter::Uid(uid) => Some(uid),
            OwnerFilter::Any => None,
        }
    }
}

/// Reads the process table from procfs.
#[derive(Debug, Clone)]
pub struct ProcfsSource {
    proc_root: PathBuf,
    passwd_path: PathBuf,
    owner: OwnerFilter,
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsSource {
    pub fn new() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            passwd_path: PathBuf::from("/etc/passwd"),
            owner: OwnerFilter::CurrentUser,
        }
    }

    pub fn with_proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    pub fn with_passwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd_path = path.into();
        self
    }

    pub fn with_owner(mut self, owner: OwnerFilter) -> Self {
        self.owner = owner;
        self
    }

    /// Enumerate once. Unreadable entries are skipped and counted.
    pub fn scan(&self) -> ScanResult {
        let start = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        let pids = match list_pids(&self.proc_root) {
            Ok(pids) => pids,
            Err(e) => {
                warn!(
                    target: event_names::SCAN,
                    root = %self.proc_root.display(),
                    error = %e,
                    "process table unreadable"
                );
                Vec::new()
            }
        };

        let users = fs::read_to_string(&self.passwd_path)
            .map(|content| parse_passwd(&content))
            .unwrap_or_default();
        let wanted_uid = self.owner.resolve();

        let mut processes = Vec::new();
        let mut skipped = 0;
        for pid in pids {
            match self.read_entry(pid, wanted_uid, &users) {
                Ok(Some(record)) => processes.push(record),
                Ok(None) => {}
                Err(e) => {
                    trace!(target: event_names::SCAN, pid, error = %e, "skipping entry");
                    skipped += 1;
                }
            }
        }

        let metadata = ScanMetadata {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            process_count: processes.len(),
            skipped,
        };
        debug!(
            target: event_names::SCAN,
            count = metadata.process_count,
            skipped = metadata.skipped,
            duration_ms = metadata.duration_ms,
            "scan complete"
        );

        ScanResult {
            processes,
            metadata,
        }
    }

    /// Read one entry. `Ok(None)` means it belongs to another user.
    fn read_entry(
        &self,
        pid: u32,
        wanted_uid: Option<u32>,
        users: &HashMap<u32, String>,
    ) -> Result<Option<ProcessRecord>, CollectError> {
        let base = self.proc_root.join(pid.to_string());

        let status = fs::read_to_string(base.join("status"))?;
        let cmdline = fs::read(base.join("cmdline"))?;

        let uid = parse_uid_from_status(&status).ok_or(CollectError::MissingUid { pid })?;
        if wanted_uid.is_some_and(|wanted| wanted != uid) {
            return Ok(None);
        }

        let label = cmdline_label(&cmdline)
            .or_else(|| read_exe(&base))
            .or_else(|| read_comm(&base))
            .unwrap_or_else(|| UNLABELED.to_string());
        let owner = users
            .get(&uid)
            .cloned()
            .unwrap_or_else(|| uid.to_string());

        Ok(Some(ProcessRecord::new(pid, owner, label)))
    }
}

impl ProcessSource for ProcfsSource {
    fn enumerate(&mut self) -> Vec<ProcessRecord> {
        self.scan().processes
    }
}

/// Numeric entries of `root`, ascending.
pub fn list_pids(root: &Path) -> Result<Vec<u32>, CollectError> {
    let mut pids = Vec::new();

    for entry in fs::read_dir(root)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        if let Ok(pid) = name.to_string_lossy().parse::<u32>() {
            pids.push(pid);
        }
    }

    pids.sort_unstable();
    Ok(pids)
}

/// Real uid from a `status` file.
///
/// Format: `Uid:\t1000\t1000\t1000\t1000`, first value is the real uid.
pub fn parse_uid_from_status(content: &str) -> Option<u32> {
    content
        .lines()
        .find(|line| line.starts_with("Uid:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|uid| uid.parse::<u32>().ok())
}

/// uid -> name from passwd(5) content. First entry wins.
pub fn parse_passwd(content: &str) -> HashMap<u32, String> {
    let mut users = HashMap::new();
    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(':');
        let (Some(name), Some(_), Some(uid)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if let Ok(uid) = uid.parse::<u32>() {
            users.entry(uid).or_insert_with(|| name.to_string());
        }
    }
    users
}

/// Arguments joined by spaces, or `None` for an empty cmdline.
pub fn cmdline_label(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw).replace('\0', " ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn read_exe(base: &Path) -> Option<String> {
    fs::read_link(base.join("exe"))
        .ok()
        .map(|path| path.to_string_lossy().into_owned())
        .filter(|path| !path.is_empty())
}

fn read_comm(base: &Path) -> Option<String> {
    fs::read_to_string(base.join("comm"))
        .ok()
        .and_then(|comm| comm.lines().next().map(str::to_string))
        .filter(|comm| !comm.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_is_first_field() {
        let status = "Name:\tbash\nUmask:\t0022\nUid:\t1000\t1001\t1002\t1003\nGid:\t5\n";
        assert_eq!(parse_uid_from_status(status), Some(1000));
    }

    #[test]
    fn uid_missing_or_garbled() {
        assert_eq!(parse_uid_from_status("Name:\tx\n"), None);
        assert_eq!(parse_uid_from_status("Uid:\tabc\n"), None);
        assert_eq!(parse_uid_from_status("Uid:\n"), None);
    }

    #[test]
    fn passwd_maps_uid_to_name() {
        let passwd = "# comment\nroot:x:0:0:root:/root:/bin/bash\nalice:x:1000:1000::/home/alice:/bin/sh\nbroken\ndup:x:1000:1000::/:/bin/sh\n";
        let users = parse_passwd(passwd);
        assert_eq!(users.get(&0).map(String::as_str), Some("root"));
        assert_eq!(users.get(&1000).map(String::as_str), Some("alice"));
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn cmdline_nuls_become_spaces() {
        assert_eq!(
            cmdline_label(b"/usr/bin/sleep\0100\0"),
            Some("/usr/bin/sleep 100".to_string())
        );
        assert_eq!(cmdline_label(b""), None);
        assert_eq!(cmdline_label(b"\0\0"), None);
    }

    #[test]
    fn missing_root_yields_empty_scan() {
        let source = ProcfsSource::new().with_proc_root("/nonexistent/procman-test-root");
        let result = source.scan();
        assert!(result.processes.is_empty());
        assert_eq!(result.metadata.process_count, 0);
    }

    #[test]
    #[ignore = "reads the live process table"]
    fn live_scan_contains_self() {
        let me = std::process::id();
        let result = ProcfsSource::new().scan();
        assert!(result.processes.iter().any(|r| r.pid.0 == me));
    }
}
