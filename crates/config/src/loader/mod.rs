//! Layered configuration resolution for the tablet.
//!
//! Responsibilities:
//! - Resolve connection profiles from defaults, an override file and a
//!   credentials file.
//! - Resolve the query service config from defaults and an override file.
//! - Load custom query rules.
//!
//! Does NOT handle:
//! - Parsing command-line flags; every input path is an explicit parameter.
//! - Terminating the process; callers pick a `Terminate` policy.
//!
//! Invariants / Assumptions:
//! - Override files only replace the fields they contain.
//! - Profile failures are recoverable; service config and rule failures are fatal.
//! - Resolution runs once at startup and never touches ambient global state.

mod credentials;
mod error;
mod fatal;
mod overlay;
mod profile;
mod rules;
mod service;

pub use credentials::CredentialStore;
pub use error::{ConfigError, FatalError, FileKind, ProfileResolveError};
pub use fatal::{ProcessExit, Terminate, require};
pub use profile::ProfileResolver;
pub use rules::load_custom_rules;
pub use service::resolve_service_config;

#[cfg(test)]
mod tests;
