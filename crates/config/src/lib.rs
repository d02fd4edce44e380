//! Startup configuration resolution for a tablet database server.
//!
//! This crate resolves the connection profiles, query service tuning and
//! custom query rules a tablet needs before it starts serving, by layering
//! compiled-in defaults, override files and a separate credentials file.

pub mod constants;
mod loader;
pub mod rules;
pub mod types;

pub use loader::{
    ConfigError, CredentialStore, FatalError, FileKind, ProcessExit, ProfileResolveError,
    ProfileResolver, Terminate, load_custom_rules, require, resolve_service_config,
};
pub use rules::{Action, Decision, Pattern, PatternError, QueryRule, Request, RuleSet};
pub use types::{AppConfig, ConnectionParams, DbConfigs, Role, RowCacheConfig, ServiceConfig};
