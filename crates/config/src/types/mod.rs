//! Configuration type definitions for the tablet.
//!
//! Responsibilities:
//! - Define the resolved connection profiles (`DbConfigs`, `ConnectionParams`).
//! - Define the resolved query service tuning (`ServiceConfig`, `RowCacheConfig`).
//! - Provide redacted summaries that are safe to log.
//!
//! Does NOT handle:
//! - Reading or merging configuration files (see `loader` module).
//! - Query rule definitions (see `rules` module).
//!
//! Invariants:
//! - Secrets use `secrecy::SecretString` so `Debug` output never exposes them.
//! - `Default` impls carry the compiled-in defaults from `constants`.

pub(crate) mod connection;
mod service;

pub use connection::{AppConfig, ConnectionParams, DbConfigs, Role};
pub use service::{RowCacheConfig, ServiceConfig};
