//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Deterministic terrain and biome generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Radius in chunks around the origin.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Worker thread count (0 = automatic).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Water surface height.
    #[arg(long)]
    pub sea_level: Option<u32>,

    /// Biome size multiplier.
    #[arg(long)]
    pub biome_size: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(radius) = args.radius {
            self.world.radius = radius;
        }
        if let Some(threads) = args.threads {
            self.workers.threads = threads;
        }
        if let Some(sea_level) = args.sea_level {
            self.generator.sea_level = sea_level;
        }
        if let Some(biome_size) = args.biome_size {
            self.generator.biome_size = biome_size;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            sea_level: Some(70),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.generator.sea_level, 70);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.radius, 4);
        assert_eq!(config.generator.biome_size, 1.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "strata",
            "--seed",
            "12",
            "--threads",
            "3",
            "--biome-size",
            "1.5",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.threads, Some(3));
        assert_eq!(args.biome_size, Some(1.5));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }
}
