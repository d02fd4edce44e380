//! Credential store loading and injection.
//!
//! Responsibilities:
//! - Parse a credentials file mapping account names to ordered secret lists.
//! - Inject the authoritative secret into each resolved profile.
//!
//! Does NOT handle:
//! - Rotating or writing credentials.
//! - Reading the connection-profile override file (see `profile.rs`).
//!
//! Invariants:
//! - Only the first secret of a list is authoritative; later entries are kept
//!   for rotation tooling and never used here.
//! - A profile whose account has no entry keeps the secret it already had.
//! - Secret values are never logged.

use secrecy::SecretString;
use std::collections::BTreeMap;
use std::path::Path;

use super::error::{ConfigError, FileKind};
use super::overlay::read_document;
use crate::types::{DbConfigs, Role};

/// Secrets for database accounts, keyed by account name.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    entries: BTreeMap<String, Vec<SecretString>>,
}

impl CredentialStore {
    /// Loads the credentials file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<String>> = read_document(FileKind::DbCredentials, path)?;
        Ok(raw.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, account: &str) -> bool {
        self.entries.contains_key(account)
    }

    /// Every secret stored for `account`, in file order.
    pub fn secrets(&self, account: &str) -> Option<&[SecretString]> {
        self.entries.get(account).map(Vec::as_slice)
    }

    /// The authoritative secret for `account`: the first in its list.
    pub fn primary(&self, account: &str) -> Option<&SecretString> {
        self.secrets(account).and_then(<[SecretString]>::first)
    }

    /// Fills the secret of every profile whose account has an entry.
    pub fn inject(&self, dbcfgs: &mut DbConfigs) {
        for role in Role::ALL {
            let params = dbcfgs.profile_mut(role);
            match self.secrets(&params.uname) {
                Some([first, ..]) => params.pass = first.clone(),
                Some([]) => tracing::warn!(
                    role = %role,
                    account = %params.uname,
                    "Credentials entry has no secrets, keeping current secret"
                ),
                None => tracing::warn!(
                    role = %role,
                    account = %params.uname,
                    "No credentials entry for account, keeping current secret"
                ),
            }
        }
    }
}

impl FromIterator<(String, Vec<String>)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(account, secrets)| {
                let secrets = secrets
                    .into_iter()
                    .map(|s| SecretString::new(s.into()))
                    .collect();
                (account, secrets)
            })
            .collect();
        Self { entries }
    }
}
