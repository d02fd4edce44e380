//! Exit codes for the tablet-config binary.
//!
//! Invariants:
//! - `FatalConfig` uses the sysexits `EX_CONFIG` value so supervisors can tell
//!   a bad configuration apart from a crash.

/// Structured exit codes for tablet-config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Configuration resolved.
    Success = 0,

    /// Unhandled failure outside configuration resolution.
    GeneralError = 1,

    /// Configuration the tablet must not start with.
    FatalConfig = 78,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::FatalConfig.as_i32(), 78);
    }
}
