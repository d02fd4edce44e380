//! End-to-end tests for the startup policy of tablet-config.
//!
//! These tests verify which failures stop the process (and with which exit
//! code) and which ones only warn.

mod common;

use common::{tablet_cmd, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

/// EX_CONFIG, used for configuration the tablet must not start with.
const FATAL_CONFIG: i32 = 78;

#[test]
fn test_defaults_succeed() {
    let output = tablet_cmd()
        .args(["--mysql-socket", "/vt/mysql.sock"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["db_configs"]["app"]["uname"], "vt_app");
    assert_eq!(report["db_configs"]["dba"]["unix_socket"], "/vt/mysql.sock");
    assert_eq!(report["db_configs"]["repl"]["unix_socket"], "");
    assert_eq!(report["query_service"]["pool_size"], 16);
    assert_eq!(report["query_service"]["stream_buffer_size"], 32768);
    assert_eq!(report["custom_rules"], serde_json::json!([]));
}

#[test]
fn test_corrupt_service_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let qs = write_file(dir.path(), "qs.json", "{ \"PoolSize\": ");

    tablet_cmd()
        .arg("--queryserver-config-file")
        .arg(&qs)
        .assert()
        .code(FATAL_CONFIG)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("queryserver-config"));
}

#[test]
fn test_missing_rules_file_is_fatal() {
    let dir = TempDir::new().unwrap();

    tablet_cmd()
        .arg("--customrules")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(FATAL_CONFIG)
        .stderr(predicate::str::contains("customrules"));
}

#[test]
fn test_rules_are_reported() {
    let dir = TempDir::new().unwrap();
    let rules = write_file(
        dir.path(),
        "rules.json",
        r#"[{ "Name": "block_scans", "Query": "select \\* from .*" }]"#,
    );

    tablet_cmd()
        .arg("--customrules")
        .arg(&rules)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("block_scans"));
}

#[test]
fn test_malformed_credentials_only_warn() {
    let dir = TempDir::new().unwrap();
    let creds = write_file(dir.path(), "creds.json", "[\"not\", \"a map\"]");

    tablet_cmd()
        .arg("--db-credentials-file")
        .arg(&creds)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("partially resolved"));
}

#[test]
fn test_malformed_credentials_fatal_when_strict() {
    let dir = TempDir::new().unwrap();
    let creds = write_file(dir.path(), "creds.json", "[\"not\", \"a map\"]");

    tablet_cmd()
        .arg("--strict")
        .arg("--db-credentials-file")
        .arg(&creds)
        .assert()
        .code(FATAL_CONFIG)
        .stderr(predicate::str::contains("db-credentials"));
}

#[test]
fn test_flags_from_environment() {
    let dir = TempDir::new().unwrap();
    let qs = write_file(dir.path(), "qs.json", r#"{ "PoolSize": 8 }"#);

    let output = tablet_cmd()
        .env("TABLET_QUERYSERVER_CONFIG_FILE", &qs)
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["query_service"]["pool_size"], 8);
}

/// Secrets from either file must never appear in logs or the report.
#[test]
fn test_secrets_never_printed() {
    let dir = TempDir::new().unwrap();
    let db = write_file(
        dir.path(),
        "db.json",
        r#"{ "app": { "pass": "override-secret-111" } }"#,
    );
    let creds = write_file(
        dir.path(),
        "creds.json",
        r#"{ "vt_dba": ["cred-secret-222", "cred-secret-333"] }"#,
    );

    for format in ["text", "json"] {
        tablet_cmd()
            .args(["--log-format", format])
            .arg("--db-configs-file")
            .arg(&db)
            .arg("--db-credentials-file")
            .arg(&creds)
            .assert()
            .code(0)
            .stdout(predicate::str::contains("****"))
            .stdout(predicate::str::contains("secret-").not())
            .stderr(predicate::str::contains("Resolved db configs"))
            .stderr(predicate::str::contains("secret-").not());
    }
}
