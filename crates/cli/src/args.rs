//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the startup flags using clap derive macros.
//! - Turn the flags into the explicit inputs the resolvers take.
//!
//! Non-responsibilities:
//! - Does not resolve configuration (see `tablet_config`).

use clap::{Parser, ValueEnum};
use std::path::Path;
use tablet_config::ProfileResolver;

#[derive(Parser, Debug)]
#[command(name = "tablet-config")]
#[command(about = "Resolve and check a tablet's startup configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  tablet-config --db-configs-file db.json --db-credentials-file creds.json --mysql-socket /vt/mysql.sock\n  tablet-config --queryserver-config-file qs.json --customrules rules.json\n"
)]
pub struct Cli {
    /// Connection profile override file (JSON)
    #[arg(long, env = "TABLET_DB_CONFIGS_FILE", value_name = "FILE")]
    pub db_configs_file: Option<String>,

    /// Credentials file mapping account names to secrets (JSON)
    #[arg(long, env = "TABLET_DB_CREDENTIALS_FILE", value_name = "FILE")]
    pub db_credentials_file: Option<String>,

    /// Local MySQL socket used by the app and dba profiles
    #[arg(long, env = "TABLET_MYSQL_SOCKET", value_name = "PATH", default_value = "")]
    pub mysql_socket: String,

    /// Query service config override file (JSON)
    #[arg(long, env = "TABLET_QUERYSERVER_CONFIG_FILE", value_name = "FILE")]
    pub queryserver_config_file: Option<String>,

    /// Custom query rules file (JSON)
    #[arg(long, env = "TABLET_CUSTOMRULES", value_name = "FILE")]
    pub customrules: Option<String>,

    /// Treat a db configs or credentials failure as fatal instead of a warning
    #[arg(long)]
    pub strict: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// A profile resolver configured from the db flags.
    pub fn profile_resolver(&self) -> ProfileResolver {
        let mut resolver = ProfileResolver::new().with_socket_path(self.mysql_socket.clone());
        if let Some(path) = &self.db_configs_file {
            resolver = resolver.with_overlay_path(path);
        }
        if let Some(path) = &self.db_credentials_file {
            resolver = resolver.with_credentials_path(path);
        }
        resolver
    }

    pub fn queryserver_config_path(&self) -> Option<&Path> {
        self.queryserver_config_file.as_deref().map(Path::new)
    }

    pub fn customrules_path(&self) -> Option<&Path> {
        self.customrules.as_deref().map(Path::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let cli = Cli::try_parse_from(["tablet-config"]).unwrap();
        assert!(cli.db_configs_file.is_none());
        assert!(cli.mysql_socket.is_empty());
        assert!(!cli.strict);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.queryserver_config_path().is_none());
        assert!(cli.customrules_path().is_none());
    }

    #[test]
    fn test_profile_resolver_from_flags() {
        let cli = Cli::try_parse_from([
            "tablet-config",
            "--db-configs-file",
            "/etc/vt/db.json",
            "--db-credentials-file",
            "",
            "--mysql-socket",
            "/vt/mysql.sock",
        ])
        .unwrap();

        let resolver = cli.profile_resolver();
        assert_eq!(resolver.overlay_path(), Some(Path::new("/etc/vt/db.json")));
        assert!(resolver.credentials_path().is_none());
    }

    #[test]
    fn test_log_format_json() {
        let cli = Cli::try_parse_from(["tablet-config", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
