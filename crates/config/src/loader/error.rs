//! Error types for configuration resolution.
//!
//! Responsibilities:
//! - Define `ConfigError` for read and parse failures.
//! - Define `ProfileResolveError`, the recoverable profile failure that keeps
//!   the partially resolved profiles.
//! - Define `FatalError`, the marker for failures the process cannot start with.
//!
//! Does NOT handle:
//! - Deciding how a fatal failure terminates the process (see `fatal.rs`).
//!
//! Invariants:
//! - Every variant names the file kind and path involved.
//! - Messages NEVER include file contents, so secrets cannot leak through errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::DbConfigs;

/// The configuration inputs a tablet reads at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    DbConfigs,
    DbCredentials,
    QueryServerConfig,
    CustomRules,
}

impl FileKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FileKind::DbConfigs => "db-configs",
            FileKind::DbCredentials => "db-credentials",
            FileKind::QueryServerConfig => "queryserver-config",
            FileKind::CustomRules => "customrules",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {kind} file at {path}: {source}")]
    Read {
        kind: FileKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} file at {path}: {source}")]
    Parse {
        kind: FileKind,
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// The file kind involved.
    pub fn file_kind(&self) -> FileKind {
        match self {
            ConfigError::Read { kind, .. } | ConfigError::Parse { kind, .. } => *kind,
        }
    }
}

/// Profile resolution failed; the caller decides whether to run anyway.
///
/// `partial` holds everything resolved before the failure: defaults, plus the
/// override file when only the credentials step failed. The socket path is
/// not stamped into a partial result.
#[derive(Error, Debug)]
#[error("Failed to resolve db configs")]
pub struct ProfileResolveError {
    partial: Box<DbConfigs>,
    #[source]
    source: ConfigError,
}

impl ProfileResolveError {
    pub(crate) fn new(partial: DbConfigs, source: ConfigError) -> Self {
        Self {
            partial: Box::new(partial),
            source,
        }
    }

    pub fn partial(&self) -> &DbConfigs {
        &self.partial
    }

    pub fn into_partial(self) -> DbConfigs {
        *self.partial
    }

    pub fn config_error(&self) -> &ConfigError {
        &self.source
    }

    /// Split into the partial profiles and the underlying error.
    pub fn into_parts(self) -> (DbConfigs, ConfigError) {
        (*self.partial, self.source)
    }
}

/// A configuration failure the process must not start with.
#[derive(Error, Debug)]
#[error("Unrecoverable configuration error: {0}")]
pub struct FatalError(#[from] ConfigError);

impl FatalError {
    pub fn config_error(&self) -> &ConfigError {
        &self.0
    }
}
