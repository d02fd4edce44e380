//! Field-level overlay of JSON documents onto resolved values.
//!
//! Responsibilities:
//! - Read a JSON document from disk into a typed value.
//! - Apply patch documents whose fields are all optional, so that only
//!   fields present in the file replace the current value.
//!
//! Does NOT handle:
//! - Defining the patch documents themselves (see `profile.rs`, `service.rs`).
//!
//! Invariants:
//! - A document is parsed completely before anything is applied; a parse
//!   failure leaves the target untouched.
//! - Absent fields and explicit `null` both leave the target value as is.

use serde::de::DeserializeOwned;
use std::path::Path;

use super::error::{ConfigError, FileKind};

/// A patch document that can be applied onto a resolved value.
pub(crate) trait Overlay: DeserializeOwned {
    type Target;

    /// Replace every field of `target` that is present in this document.
    fn apply_to(self, target: &mut Self::Target);
}

/// Reads and parses the JSON document at `path`.
pub(crate) fn read_document<T: DeserializeOwned>(
    kind: FileKind,
    path: &Path,
) -> Result<T, ConfigError> {
    let content = std::fs::read(path).map_err(|e| ConfigError::Read {
        kind,
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_slice(&content).map_err(|e| ConfigError::Parse {
        kind,
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads the overlay document at `path` and applies it onto `target`.
pub(crate) fn apply_overlay_file<O: Overlay>(
    kind: FileKind,
    path: &Path,
    target: &mut O::Target,
) -> Result<(), ConfigError> {
    let overlay: O = read_document(kind, path)?;
    overlay.apply_to(target);
    tracing::debug!(kind = %kind, path = %path.display(), "Applied override file");
    Ok(())
}

/// Assigns `value` to `slot` when the document carried it.
pub(crate) fn set_if_present<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Treats an empty path the same as no path.
pub(crate) fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Default, PartialEq)]
    struct Target {
        name: String,
        size: usize,
    }

    #[derive(Deserialize)]
    struct TargetOverlay {
        name: Option<String>,
        size: Option<usize>,
    }

    impl Overlay for TargetOverlay {
        type Target = Target;

        fn apply_to(self, target: &mut Target) {
            set_if_present(&mut target.name, self.name);
            set_if_present(&mut target.size, self.size);
        }
    }

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_present_fields_replace_absent_fields_stay() {
        let file = write_temp(r#"{ "size": 0 }"#);
        let mut target = Target {
            name: "kept".to_string(),
            size: 7,
        };

        apply_overlay_file::<TargetOverlay>(FileKind::DbConfigs, file.path(), &mut target)
            .unwrap();

        assert_eq!(target.name, "kept");
        assert_eq!(target.size, 0);
    }

    #[test]
    fn test_null_field_leaves_value() {
        let file = write_temp(r#"{ "name": null }"#);
        let mut target = Target {
            name: "kept".to_string(),
            size: 1,
        };

        apply_overlay_file::<TargetOverlay>(FileKind::DbConfigs, file.path(), &mut target)
            .unwrap();
        assert_eq!(target.name, "kept");
    }

    #[test]
    fn test_parse_failure_leaves_target_untouched() {
        let file = write_temp(r#"{ "name": "changed", "size": "#);
        let mut target = Target::default();

        let err = apply_overlay_file::<TargetOverlay>(
            FileKind::QueryServerConfig,
            file.path(),
            &mut target,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Parse {
                kind: FileKind::QueryServerConfig,
                ..
            }
        ));
        assert_eq!(target, Target::default());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = read_document::<serde_json::Value>(FileKind::CustomRules, &path).unwrap_err();
        match err {
            ConfigError::Read { kind, path: p, .. } => {
                assert_eq!(kind, FileKind::CustomRules);
                assert_eq!(p, path);
            }
            other => panic!("Expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty(None).is_none());
        assert!(non_empty(Some(Path::new(""))).is_none());
        assert_eq!(
            non_empty(Some(Path::new("/etc/tablet.json"))),
            Some(Path::new("/etc/tablet.json"))
        );
    }
}
