//! Connection profile types.
//!
//! Responsibilities:
//! - Define `ConnectionParams` for one database account.
//! - Define `DbConfigs`, the container of the `app`, `dba` and `repl` profiles.
//! - Produce a redacted JSON summary of the resolved profiles for logging.
//!
//! Does NOT handle:
//! - Overlay parsing or credential injection (see `loader` module).
//!
//! Invariants:
//! - `DbConfigs::default()` carries the compiled-in account names and charset
//!   with empty secrets and no socket path.
//! - The redacted summary only reports whether a secret is set.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::fmt;

use crate::constants::{DEFAULT_APP_UNAME, DEFAULT_CHARSET, DEFAULT_DBA_UNAME, DEFAULT_REPL_UNAME};

/// Placeholder written in place of a non-empty secret.
const REDACTED: &str = "****";

/// The three connection roles a tablet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Application queries.
    App,
    /// Administrative operations.
    Dba,
    /// Replication from a remote instance.
    Repl,
}

impl Role {
    /// All roles, in resolution order.
    pub const ALL: [Role; 3] = [Role::App, Role::Dba, Role::Repl];

    /// The key of this role in the override file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::App => "app",
            Role::Dba => "dba",
            Role::Repl => "repl",
        }
    }

    /// Whether the role connects through the local socket.
    pub const fn uses_local_socket(self) -> bool {
        !matches!(self, Role::Repl)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for one database account.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    /// Host name; empty when connecting through a socket.
    pub host: String,
    /// TCP port; zero when unset.
    pub port: u16,
    /// Account name.
    pub uname: String,
    /// Account secret; empty when none was configured.
    pub pass: SecretString,
    /// Default database name.
    pub dbname: String,
    /// Local socket path; empty when unset.
    pub unix_socket: String,
    /// Connection character set.
    pub charset: String,
}

impl ConnectionParams {
    /// Parameters for `uname` with the default charset and no secret.
    pub fn for_account(uname: &str) -> Self {
        Self {
            host: String::new(),
            port: 0,
            uname: uname.to_string(),
            pass: SecretString::new(String::new().into()),
            dbname: String::new(),
            unix_socket: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Returns true if a non-empty secret is set.
    pub fn has_pass(&self) -> bool {
        !self.pass.expose_secret().is_empty()
    }

    /// JSON summary with the secret replaced by a marker.
    pub fn redacted(&self) -> Value {
        let pass = if self.has_pass() { REDACTED } else { "" };
        json!({
            "host": self.host,
            "port": self.port,
            "uname": self.uname,
            "pass": pass,
            "dbname": self.dbname,
            "unix_socket": self.unix_socket,
            "charset": self.charset,
        })
    }
}

/// Application profile: connection parameters plus serving options.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub connection: ConnectionParams,
    pub keyspace: String,
    pub shard: String,
    pub enable_rowcache: bool,
    pub enable_invalidator: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionParams::for_account(DEFAULT_APP_UNAME),
            keyspace: String::new(),
            shard: String::new(),
            enable_rowcache: false,
            enable_invalidator: false,
        }
    }
}

/// The resolved connection profiles of a tablet.
#[derive(Debug, Clone)]
pub struct DbConfigs {
    pub app: AppConfig,
    pub dba: ConnectionParams,
    pub repl: ConnectionParams,
    /// Path of the memcache socket backing the row cache.
    pub memcache: String,
}

impl Default for DbConfigs {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            dba: ConnectionParams::for_account(DEFAULT_DBA_UNAME),
            repl: ConnectionParams::for_account(DEFAULT_REPL_UNAME),
            memcache: String::new(),
        }
    }
}

impl DbConfigs {
    /// Connection parameters of `role`.
    pub fn profile(&self, role: Role) -> &ConnectionParams {
        match role {
            Role::App => &self.app.connection,
            Role::Dba => &self.dba,
            Role::Repl => &self.repl,
        }
    }

    /// Mutable connection parameters of `role`.
    pub fn profile_mut(&mut self, role: Role) -> &mut ConnectionParams {
        match role {
            Role::App => &mut self.app.connection,
            Role::Dba => &mut self.dba,
            Role::Repl => &mut self.repl,
        }
    }

    /// JSON summary of every profile, safe to log.
    pub fn redacted(&self) -> Value {
        let mut app = self.app.connection.redacted();
        if let Value::Object(fields) = &mut app {
            fields.insert("keyspace".to_string(), json!(self.app.keyspace));
            fields.insert("shard".to_string(), json!(self.app.shard));
            fields.insert("enable_rowcache".to_string(), json!(self.app.enable_rowcache));
            fields.insert(
                "enable_invalidator".to_string(),
                json!(self.app.enable_invalidator),
            );
        }
        json!({
            "app": app,
            "dba": self.dba.redacted(),
            "repl": self.repl.redacted(),
            "memcache": self.memcache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let dbcfgs = DbConfigs::default();
        assert_eq!(dbcfgs.app.connection.uname, "vt_app");
        assert_eq!(dbcfgs.dba.uname, "vt_dba");
        assert_eq!(dbcfgs.repl.uname, "vt_repl");
        for role in Role::ALL {
            let params = dbcfgs.profile(role);
            assert_eq!(params.charset, "utf8");
            assert!(!params.has_pass());
            assert!(params.unix_socket.is_empty());
        }
        assert!(dbcfgs.memcache.is_empty());
    }

    #[test]
    fn test_profile_mut_targets_role() {
        let mut dbcfgs = DbConfigs::default();
        dbcfgs.profile_mut(Role::Repl).host = "replica.example.com".to_string();
        assert_eq!(dbcfgs.repl.host, "replica.example.com");
        assert!(dbcfgs.dba.host.is_empty());
        assert!(dbcfgs.app.connection.host.is_empty());
    }

    #[test]
    fn test_only_repl_skips_local_socket() {
        assert!(Role::App.uses_local_socket());
        assert!(Role::Dba.uses_local_socket());
        assert!(!Role::Repl.uses_local_socket());
    }

    /// The summary must never carry the secret itself.
    #[test]
    fn test_redacted_summary_hides_secret() {
        let mut dbcfgs = DbConfigs::default();
        dbcfgs.dba.pass = SecretString::new("dba-secret-123".to_string().into());

        let summary = dbcfgs.redacted().to_string();
        assert!(!summary.contains("dba-secret-123"));
        assert_eq!(dbcfgs.redacted()["dba"]["pass"], "****");
        assert_eq!(dbcfgs.redacted()["app"]["pass"], "");
        assert_eq!(dbcfgs.redacted()["app"]["keyspace"], "");
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let mut params = ConnectionParams::for_account("vt_app");
        params.pass = SecretString::new("app-secret-456".to_string().into());

        let debug_output = format!("{:?}", params);
        assert!(!debug_output.contains("app-secret-456"));
        assert!(debug_output.contains("vt_app"));
    }
}
