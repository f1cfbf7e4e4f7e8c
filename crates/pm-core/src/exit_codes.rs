//! Exit codes for the `procman` binary.
//!
//! Exit code ranges:
//! - 0-2: Operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use pm_common::{Error, ErrorCategory};

/// Exit codes for procman operations. Stable for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean run
    Clean = 0,

    /// `list` matched nothing
    NoMatches = 1,

    /// A kill was delivered
    ActionOk = 2,

    /// Invalid arguments
    ArgsError = 10,

    /// Required capability missing (e.g. built without the `ui` feature)
    CapabilityError = 11,

    /// Permission denied
    PermissionError = 12,

    /// Target process not found
    NotFoundError = 13,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Codes 0-2.
    pub fn is_success(self) -> bool {
        (self as i32) < 10
    }

    /// Codes 10 and above.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Name used in JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::NoMatches => "OK_NO_MATCHES",
            ExitCode::ActionOk => "OK_APPLIED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::CapabilityError => "ERR_CAPABILITY",
            ExitCode::PermissionError => "ERR_PERMISSION",
            ExitCode::NotFoundError => "ERR_NOT_FOUND",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for an error surfaced to `main`.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::ProcessNotFound { .. } => ExitCode::NotFoundError,
            Error::PermissionDenied { .. } => ExitCode::PermissionError,
            Error::CapabilityMissing(_) | Error::UnsupportedPlatform(_) => {
                ExitCode::CapabilityError
            }
            _ => match err.category() {
                ErrorCategory::Usage => ExitCode::ArgsError,
                ErrorCategory::Io => ExitCode::IoError,
                _ => ExitCode::InternalError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::ActionOk.is_success());
        assert!(ExitCode::ArgsError.is_error());
        assert!(!ExitCode::NoMatches.is_error());
    }

    #[test]
    fn display_includes_name_and_number() {
        assert_eq!(ExitCode::PermissionError.to_string(), "ERR_PERMISSION (12)");
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(
            ExitCode::for_error(&Error::PermissionDenied { pid: 1 }),
            ExitCode::PermissionError
        );
        assert_eq!(
            ExitCode::for_error(&Error::ProcessNotFound { pid: 1 }),
            ExitCode::NotFoundError
        );
        assert_eq!(
            ExitCode::for_error(&Error::CapabilityMissing("ui".into())),
            ExitCode::CapabilityError
        );
        assert_eq!(
            ExitCode::for_error(&Error::InvalidArgument("x".into())),
            ExitCode::ArgsError
        );
        assert_eq!(
            ExitCode::for_error(&Error::Io(std::io::Error::other("x"))),
            ExitCode::IoError
        );
        assert_eq!(
            ExitCode::for_error(&Error::ActionFailed("x".into())),
            ExitCode::InternalError
        );
    }
}
