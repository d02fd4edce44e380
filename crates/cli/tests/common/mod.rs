//! Shared test utilities for tablet-config integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: `TABLET_*` variables from the host are cleared.
//! - Logging is pinned to `info` so assertions on log output are stable.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Returns a hermetic `tablet-config` command for integration testing.
pub fn tablet_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tablet-config");

    cmd.env("RUST_LOG", "info");

    // Clear potential host leakage
    cmd.env_remove("TABLET_DB_CONFIGS_FILE")
        .env_remove("TABLET_DB_CREDENTIALS_FILE")
        .env_remove("TABLET_MYSQL_SOCKET")
        .env_remove("TABLET_QUERYSERVER_CONFIG_FILE")
        .env_remove("TABLET_CUSTOMRULES");

    cmd
}

/// Writes `content` as `name` inside `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
