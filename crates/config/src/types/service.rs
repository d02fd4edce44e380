//! Query service tuning types.
//!
//! Responsibilities:
//! - Define `ServiceConfig`, the flat set of query service tuning values.
//! - Define `RowCacheConfig` for the optional row cache backend.
//! - Expose timeouts as `Duration`s.
//!
//! Does NOT handle:
//! - Reading override files (see `loader::service`).
//!
//! Invariants:
//! - Timeouts are stored as fractional seconds, as they appear in override files.
//! - A query timeout of zero means "no timeout".

use serde::Deserialize;
use std::time::Duration;

use crate::constants::{
    DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_RESULT_SIZE, DEFAULT_POOL_SIZE,
    DEFAULT_QUERY_CACHE_SIZE, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_SCHEMA_RELOAD_SECS,
    DEFAULT_STREAM_BUFFER_SIZE, DEFAULT_STREAM_POOL_SIZE, DEFAULT_TRANSACTION_CAP,
    DEFAULT_TRANSACTION_TIMEOUT_SECS,
};

/// Settings for the memcache process backing the row cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RowCacheConfig {
    /// Path to the cache server binary.
    pub binary: String,
    /// Memory limit in megabytes.
    pub memory: usize,
    /// Socket the cache server listens on.
    pub socket: String,
    /// TCP port; zero disables TCP.
    pub tcp_port: u16,
    pub connections: usize,
    pub threads: usize,
    /// Lock paged memory.
    pub lock_paged: bool,
}

/// Query service tuning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub pool_size: usize,
    pub stream_pool_size: usize,
    pub transaction_cap: usize,
    /// Transaction timeout in seconds.
    pub transaction_timeout: f64,
    pub max_result_size: usize,
    pub query_cache_size: usize,
    /// Schema reload interval in seconds.
    pub schema_reload_time: f64,
    /// Query timeout in seconds; zero disables it.
    pub query_timeout: f64,
    /// Idle connection timeout in seconds.
    pub idle_timeout: f64,
    /// Streaming buffer size in bytes.
    pub stream_buffer_size: usize,
    pub row_cache: Option<RowCacheConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            stream_pool_size: DEFAULT_STREAM_POOL_SIZE,
            transaction_cap: DEFAULT_TRANSACTION_CAP,
            transaction_timeout: DEFAULT_TRANSACTION_TIMEOUT_SECS,
            max_result_size: DEFAULT_MAX_RESULT_SIZE,
            query_cache_size: DEFAULT_QUERY_CACHE_SIZE,
            schema_reload_time: DEFAULT_SCHEMA_RELOAD_SECS,
            query_timeout: DEFAULT_QUERY_TIMEOUT_SECS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT_SECS,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            row_cache: None,
        }
    }
}

/// Converts seconds to a `Duration`, clamping invalid values to zero.
fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_default()
}

impl ServiceConfig {
    pub fn transaction_timeout(&self) -> Duration {
        seconds(self.transaction_timeout)
    }

    pub fn schema_reload_interval(&self) -> Duration {
        seconds(self.schema_reload_time)
    }

    pub fn idle_timeout(&self) -> Duration {
        seconds(self.idle_timeout)
    }

    /// The query timeout, or `None` when disabled.
    pub fn query_timeout(&self) -> Option<Duration> {
        let timeout = seconds(self.query_timeout);
        (!timeout.is_zero()).then_some(timeout)
    }
}
