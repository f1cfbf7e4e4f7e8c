//! Fuzz target for passwd(5) parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pm_core::collect::parse_passwd;

fuzz_target!(|data: &str| {
    for name in parse_passwd(data).values() {
        assert!(!name.is_empty());
    }
});
