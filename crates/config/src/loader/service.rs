//! Query service config resolution.
//!
//! Responsibilities:
//! - Overlay the query service override file onto the compiled-in defaults.
//!
//! Does NOT handle:
//! - Terminating the process on failure (see `fatal.rs`).
//! - Range checks: any value the file can express is applied as is.
//!
//! Invariants:
//! - Every failure is a `FatalError`: a service must not start on a
//!   half-applied tuning file.
//! - Override keys use the CamelCase names of existing deployments, with
//!   snake_case aliases.

use serde::Deserialize;
use std::path::Path;

use super::error::{FatalError, FileKind};
use super::overlay::{Overlay, apply_overlay_file, non_empty, set_if_present};
use crate::types::{RowCacheConfig, ServiceConfig};

/// The query service override file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ServiceConfigOverlay {
    #[serde(alias = "pool_size")]
    pool_size: Option<usize>,
    #[serde(alias = "stream_pool_size")]
    stream_pool_size: Option<usize>,
    #[serde(alias = "transaction_cap")]
    transaction_cap: Option<usize>,
    #[serde(alias = "transaction_timeout")]
    transaction_timeout: Option<f64>,
    #[serde(alias = "max_result_size")]
    max_result_size: Option<usize>,
    #[serde(alias = "query_cache_size")]
    query_cache_size: Option<usize>,
    #[serde(alias = "schema_reload_time")]
    schema_reload_time: Option<f64>,
    #[serde(alias = "query_timeout")]
    query_timeout: Option<f64>,
    #[serde(alias = "idle_timeout")]
    idle_timeout: Option<f64>,
    #[serde(alias = "stream_buffer_size")]
    stream_buffer_size: Option<usize>,
    #[serde(alias = "row_cache")]
    row_cache: Option<RowCacheConfig>,
}

impl Overlay for ServiceConfigOverlay {
    type Target = ServiceConfig;

    fn apply_to(self, target: &mut ServiceConfig) {
        set_if_present(&mut target.pool_size, self.pool_size);
        set_if_present(&mut target.stream_pool_size, self.stream_pool_size);
        set_if_present(&mut target.transaction_cap, self.transaction_cap);
        set_if_present(&mut target.transaction_timeout, self.transaction_timeout);
        set_if_present(&mut target.max_result_size, self.max_result_size);
        set_if_present(&mut target.query_cache_size, self.query_cache_size);
        set_if_present(&mut target.schema_reload_time, self.schema_reload_time);
        set_if_present(&mut target.query_timeout, self.query_timeout);
        set_if_present(&mut target.idle_timeout, self.idle_timeout);
        set_if_present(&mut target.stream_buffer_size, self.stream_buffer_size);
        if self.row_cache.is_some() {
            target.row_cache = self.row_cache;
        }
    }
}

/// Resolves the query service config from defaults and an optional override file.
///
/// An empty path is treated as no override file.
///
/// # Errors
///
/// Returns `FatalError` if the file cannot be read or parsed.
pub fn resolve_service_config(overlay_path: Option<&Path>) -> Result<ServiceConfig, FatalError> {
    let mut config = ServiceConfig::default();
    if let Some(path) = non_empty(overlay_path) {
        apply_overlay_file::<ServiceConfigOverlay>(FileKind::QueryServerConfig, path, &mut config)?;
    }
    Ok(config)
}
