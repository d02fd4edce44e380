//! Connection profile resolution.
//!
//! Responsibilities:
//! - Layer compiled-in defaults, the override file and the credentials file
//!   into the `app`, `dba` and `repl` profiles.
//! - Stamp the local socket path into the profiles that use it.
//! - Log a redacted summary of the result.
//!
//! Does NOT handle:
//! - Opening database connections.
//! - Deciding whether a failed resolution is acceptable (the caller does).
//!
//! Invariants:
//! - Layering order is defaults, then override file, then credentials.
//! - Override and credential failures are returned, never fatal.
//! - `repl` never receives the local socket path.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use super::credentials::CredentialStore;
use super::error::{ConfigError, FileKind, ProfileResolveError};
use super::overlay::{Overlay, apply_overlay_file, non_empty, set_if_present};
use crate::types::{AppConfig, ConnectionParams, DbConfigs, Role};

/// Deserializes an optional secret straight into a `SecretString`.
fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| SecretString::new(s.into())))
}

/// Override document for one profile.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConnectionOverlay {
    host: Option<String>,
    port: Option<u16>,
    uname: Option<String>,
    #[serde(deserialize_with = "optional_secret")]
    pass: Option<SecretString>,
    dbname: Option<String>,
    unix_socket: Option<String>,
    charset: Option<String>,
}

impl Overlay for ConnectionOverlay {
    type Target = ConnectionParams;

    fn apply_to(self, target: &mut ConnectionParams) {
        set_if_present(&mut target.host, self.host);
        set_if_present(&mut target.port, self.port);
        set_if_present(&mut target.uname, self.uname);
        set_if_present(&mut target.pass, self.pass);
        set_if_present(&mut target.dbname, self.dbname);
        set_if_present(&mut target.unix_socket, self.unix_socket);
        set_if_present(&mut target.charset, self.charset);
    }
}

/// Override document for the application profile.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppOverlay {
    #[serde(flatten)]
    connection: ConnectionOverlay,
    keyspace: Option<String>,
    shard: Option<String>,
    enable_rowcache: Option<bool>,
    enable_invalidator: Option<bool>,
}

impl Overlay for AppOverlay {
    type Target = AppConfig;

    fn apply_to(self, target: &mut AppConfig) {
        self.connection.apply_to(&mut target.connection);
        set_if_present(&mut target.keyspace, self.keyspace);
        set_if_present(&mut target.shard, self.shard);
        set_if_present(&mut target.enable_rowcache, self.enable_rowcache);
        set_if_present(&mut target.enable_invalidator, self.enable_invalidator);
    }
}

/// The connection-profile override file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DbConfigsOverlay {
    app: Option<AppOverlay>,
    dba: Option<ConnectionOverlay>,
    repl: Option<ConnectionOverlay>,
    memcache: Option<String>,
}

impl Overlay for DbConfigsOverlay {
    type Target = DbConfigs;

    fn apply_to(self, target: &mut DbConfigs) {
        if let Some(app) = self.app {
            app.apply_to(&mut target.app);
        }
        if let Some(dba) = self.dba {
            dba.apply_to(&mut target.dba);
        }
        if let Some(repl) = self.repl {
            repl.apply_to(&mut target.repl);
        }
        set_if_present(&mut target.memcache, self.memcache);
    }
}

/// Resolves the tablet's connection profiles.
///
/// All inputs are optional; with none set, `resolve()` returns the
/// compiled-in defaults with an empty socket path.
#[derive(Debug, Clone, Default)]
pub struct ProfileResolver {
    overlay_path: Option<PathBuf>,
    credentials_path: Option<PathBuf>,
    socket_path: String,
}

impl ProfileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection-profile override file. An empty path is ignored.
    pub fn with_overlay_path(mut self, path: impl AsRef<Path>) -> Self {
        self.overlay_path = non_empty(Some(path.as_ref())).map(Path::to_path_buf);
        self
    }

    /// Set the credentials file. An empty path is ignored.
    pub fn with_credentials_path(mut self, path: impl AsRef<Path>) -> Self {
        self.credentials_path = non_empty(Some(path.as_ref())).map(Path::to_path_buf);
        self
    }

    /// Set the local socket path stamped into `app` and `dba`.
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = path.into();
        self
    }

    pub fn overlay_path(&self) -> Option<&Path> {
        self.overlay_path.as_deref()
    }

    pub fn credentials_path(&self) -> Option<&Path> {
        self.credentials_path.as_deref()
    }

    /// Resolve the profiles.
    ///
    /// # Errors
    ///
    /// Returns `ProfileResolveError` if the override or credentials file cannot
    /// be read or parsed. The error carries the partially resolved profiles.
    pub fn resolve(&self) -> Result<DbConfigs, ProfileResolveError> {
        let mut dbcfgs = DbConfigs::default();
        if let Err(e) = self.apply_files(&mut dbcfgs) {
            return Err(ProfileResolveError::new(dbcfgs, e));
        }

        for role in Role::ALL.into_iter().filter(|r| r.uses_local_socket()) {
            dbcfgs.profile_mut(role).unix_socket = self.socket_path.clone();
        }

        tracing::info!(
            overlay = ?self.overlay_path,
            config = %dbcfgs.redacted(),
            "Resolved db configs"
        );
        Ok(dbcfgs)
    }

    fn apply_files(&self, dbcfgs: &mut DbConfigs) -> Result<(), ConfigError> {
        if let Some(path) = &self.overlay_path {
            apply_overlay_file::<DbConfigsOverlay>(FileKind::DbConfigs, path, dbcfgs)?;
        }
        if let Some(path) = &self.credentials_path {
            let store = CredentialStore::load(path)?;
            tracing::debug!(accounts = store.len(), "Loaded credentials file");
            store.inject(dbcfgs);
        }
        Ok(())
    }
}
