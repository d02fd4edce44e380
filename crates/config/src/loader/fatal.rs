//! Handling policy for unrecoverable configuration failures.
//!
//! Responsibilities:
//! - Define the `Terminate` seam between resolvers and process termination.
//! - Provide `ProcessExit`, the production policy.
//! - Provide `require` to unwrap a fatal result through a policy.
//!
//! Does NOT handle:
//! - Producing fatal errors (see `service.rs`, `rules.rs`).
//!
//! Invariants:
//! - Resolvers never exit the process themselves; only a `Terminate`
//!   implementation chosen by the caller does.

use super::error::FatalError;

/// What to do with a configuration failure the process cannot start with.
pub trait Terminate {
    /// Report `error` and never return.
    fn terminate(&self, error: &FatalError) -> !;
}

/// Logs the failure and exits the process with a fixed exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    code: i32,
}

impl ProcessExit {
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    pub const fn code(&self) -> i32 {
        self.code
    }
}

impl Default for ProcessExit {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Terminate for ProcessExit {
    fn terminate(&self, error: &FatalError) -> ! {
        tracing::error!(error = %error, code = self.code, "Cannot start with this configuration");
        std::process::exit(self.code)
    }
}

/// Returns the value of `result`, or hands the failure to `terminator`.
pub fn require<T, P: Terminate + ?Sized>(result: Result<T, FatalError>, terminator: &P) -> T {
    match result {
        Ok(value) => value,
        Err(e) => terminator.terminate(&e),
    }
}
