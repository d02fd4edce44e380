//! tablet-config - resolve a tablet's startup configuration.
//!
//! Responsibilities:
//! - Parse the startup flags and initialize logging.
//! - Resolve db configs, the query service config and custom rules in order.
//! - Apply the startup policy: profile failures warn (or are fatal with
//!   `--strict`), service config and rule failures always exit.
//! - Print a redacted report of the resolved configuration.
//!
//! Invariants:
//! - Logs go to stderr; the report goes to stdout.
//! - Secrets never reach either stream.

mod args;
mod error;

use anyhow::Context;
use args::{Cli, LogFormat};
use clap::Parser;
use error::ExitCode;
use serde_json::{Value, json};
use std::io::IsTerminal;
use tablet_config::{
    DbConfigs, FatalError, ProcessExit, RuleSet, ServiceConfig, Terminate, load_custom_rules,
    require, resolve_service_config,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_format) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let fatal = ProcessExit::new(ExitCode::FatalConfig.as_i32());

    let dbcfgs = match cli.profile_resolver().resolve() {
        Ok(dbcfgs) => dbcfgs,
        Err(e) if cli.strict => {
            let (_, source) = e.into_parts();
            fatal.terminate(&FatalError::from(source))
        }
        Err(e) => {
            tracing::warn!(
                error = %e.config_error(),
                "Continuing with partially resolved db configs"
            );
            e.into_partial()
        }
    };

    let service = require(resolve_service_config(cli.queryserver_config_path()), &fatal);
    let rules = require(load_custom_rules(cli.customrules_path()), &fatal);

    tracing::info!(
        pool_size = service.pool_size,
        stream_pool_size = service.stream_pool_size,
        rules = rules.len(),
        "Startup configuration resolved"
    );

    println!("{:#}", report(&dbcfgs, &service, &rules));
}

fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    let ansi = std::io::stderr().is_terminal();

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_ansi(ansi).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("failed to install tracing subscriber")
}

/// Redacted summary of everything that was resolved.
fn report(dbcfgs: &DbConfigs, service: &ServiceConfig, rules: &RuleSet) -> Value {
    json!({
        "db_configs": dbcfgs.redacted(),
        "query_service": {
            "pool_size": service.pool_size,
            "stream_pool_size": service.stream_pool_size,
            "transaction_cap": service.transaction_cap,
            "transaction_timeout": service.transaction_timeout,
            "max_result_size": service.max_result_size,
            "query_cache_size": service.query_cache_size,
            "schema_reload_time": service.schema_reload_time,
            "query_timeout": service.query_timeout,
            "idle_timeout": service.idle_timeout,
            "stream_buffer_size": service.stream_buffer_size,
            "row_cache": service.row_cache.is_some(),
        },
        "custom_rules": rules.iter().map(|rule| rule.name.as_str()).collect::<Vec<_>>(),
    })
}
