//! Centralized compiled-in defaults for tablet configuration.
//!
//! These are the base layer of every resolution: override files only ever
//! replace individual values on top of them.

// =============================================================================
// Connection Profile Defaults
// =============================================================================

/// Default account name of the application profile.
pub const DEFAULT_APP_UNAME: &str = "vt_app";

/// Default account name of the administrative profile.
pub const DEFAULT_DBA_UNAME: &str = "vt_dba";

/// Default account name of the replication profile.
pub const DEFAULT_REPL_UNAME: &str = "vt_repl";

/// Default character set for every profile.
pub const DEFAULT_CHARSET: &str = "utf8";

// =============================================================================
// Query Service Defaults
// =============================================================================

/// Default size of the regular connection pool.
pub const DEFAULT_POOL_SIZE: usize = 16;

/// Default size of the streaming connection pool.
pub const DEFAULT_STREAM_POOL_SIZE: usize = 750;

/// Default number of concurrent transactions.
pub const DEFAULT_TRANSACTION_CAP: usize = 20;

/// Default transaction timeout in seconds.
pub const DEFAULT_TRANSACTION_TIMEOUT_SECS: f64 = 30.0;

/// Default maximum number of rows in a non-streaming result.
pub const DEFAULT_MAX_RESULT_SIZE: usize = 10_000;

/// Default number of entries in the query plan cache.
pub const DEFAULT_QUERY_CACHE_SIZE: usize = 5000;

/// Default schema reload interval in seconds (30 minutes).
pub const DEFAULT_SCHEMA_RELOAD_SECS: f64 = 30.0 * 60.0;

/// Default query timeout in seconds. Zero disables the timeout.
pub const DEFAULT_QUERY_TIMEOUT_SECS: f64 = 0.0;

/// Default idle connection timeout in seconds (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT_SECS: f64 = 30.0 * 60.0;

/// Default streaming buffer size in bytes.
///
/// Smaller buffers send too many packets; larger ones force clients to read
/// a packet in several chunks and copy memory. With encoding overhead the
/// packets on the wire end up about twice this size.
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 32 * 1024;
