//! Tests for layered configuration resolution.
//!
//! Responsibilities:
//! - Test profile resolution across defaults, override and credentials files.
//! - Test query service config resolution.
//! - Test custom rule loading.
//! - Test the fatal-failure policy without exiting the test process.
//!
//! Invariants:
//! - Every file lives in a `tempfile` directory that is removed after the test.

use std::path::{Path, PathBuf};


/// Writes `content` as `name` inside `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Writes `value` as JSON as `name` inside `dir` and returns its path.
pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    write_file(dir, name, &value.to_string())
}
