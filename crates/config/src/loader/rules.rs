//! Custom query rule loading.
//!
//! Responsibilities:
//! - Load the custom rule file into a `RuleSet`.
//!
//! Does NOT handle:
//! - Rule matching (see the crate-level `rules` module).
//!
//! Invariants:
//! - No rule file means an empty, permit-all rule set.
//! - The rule file is the only source of rules; nothing is merged.
//! - Every failure is a `FatalError`.

use std::path::Path;

use super::error::{FatalError, FileKind};
use super::overlay::{non_empty, read_document};
use crate::rules::RuleSet;

/// Loads custom query rules from `path`, or an empty set when unset.
///
/// An empty path is treated as unset.
///
/// # Errors
///
/// Returns `FatalError` if the file cannot be read, is not valid JSON, or
/// contains an invalid rule (for example a malformed pattern).
pub fn load_custom_rules(path: Option<&Path>) -> Result<RuleSet, FatalError> {
    let Some(path) = non_empty(path) else {
        return Ok(RuleSet::new());
    };

    let rules: RuleSet = read_document(FileKind::CustomRules, path)?;
    tracing::debug!(path = %path.display(), rules = rules.len(), "Loaded custom rules");
    Ok(rules)
}
