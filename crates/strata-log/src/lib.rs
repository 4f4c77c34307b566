//! Structured logging for the Strata generator.
//!
//! Console output with uptime timestamps, module paths, and worker thread
//! names, plus a JSON file log in debug builds. The level comes from
//! `RUST_LOG` when set, otherwise from the config's `debug.log_level`.

use std::path::{Path, PathBuf};

use strata_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config name a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "strata.log";

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration to use for log level override
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
///
/// # Examples
///
/// ```no_run
/// use strata_config::Config;
/// use strata_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // workers are named strata-gen-N
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_timer(fmt::time::uptime())
            .json();

        if subscriber.with(file_layer).try_init().is_err() {
            tracing::debug!("Logging already initialized");
        }
        return;
    }

    if subscriber.try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Filter string derived from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// `EnvFilter` with the default filter string; useful in tests.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
