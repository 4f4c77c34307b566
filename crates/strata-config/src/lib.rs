//! Configuration for the Strata terrain generator.
//!
//! Settings persist to disk as `config.ron`. Values can be overridden from the
//! command line via clap, and [`GeneratorPreset::validate`] rejects presets the
//! generator cannot work with before any chunk is produced.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GeneratorPreset, SEA_LEVEL_RANGE, WorkerConfig,
    WorldConfig, default_config_dir,
};
pub use error::ConfigError;
