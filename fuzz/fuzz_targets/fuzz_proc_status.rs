//! Fuzz target for /proc/[pid]/status and cmdline parsing.
//!
//! Tests that `parse_uid_from_status` and `cmdline_label` handle arbitrary
//! input without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pm_core::collect::{cmdline_label, parse_uid_from_status};

fuzz_target!(|data: &[u8]| {
    if let Some(label) = cmdline_label(data) {
        assert!(!label.is_empty());
        assert!(!label.contains('\0'));
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_uid_from_status(text);
    }
});
