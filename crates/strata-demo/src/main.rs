//! Demo binary that generates a square of chunks around the origin and logs a
//! summary of the resulting terrain.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-demo -- --seed 42 --radius 6`.

mod summary;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use strata_config::{CliArgs, Config, default_config_dir};
use strata_terrain::{AsyncChunkGenerator, SubmitError, WorldGenContext};
use tracing::{error, info, warn};

use crate::summary::{WorldSummary, square_around_origin};

fn main() {
    let args = CliArgs::parse();

    let config_dir = resolve_config_dir(args.config.clone());

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let ctx = match WorldGenContext::new(config.world.seed, config.generator.clone()) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            error!("Cannot build world: {e}");
            std::process::exit(1);
        }
    };

    let pool = AsyncChunkGenerator::from_config(Arc::clone(&ctx), &config.workers);
    let summary = generate_square(&pool, config.world.radius);
    report(&ctx, &summary);
}

/// Explicit `--config` first, then the platform config directory, then the
/// current directory.
fn resolve_config_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.or_else(default_config_dir).unwrap_or_else(|| {
        eprintln!("No platform config directory, using the current directory");
        PathBuf::from(".")
    })
}

/// Feeds the pool nearest-first and collects every result.
fn generate_square(pool: &AsyncChunkGenerator, radius: u32) -> WorldSummary {
    let positions = square_around_origin(radius);
    let total = positions.len();
    info!(
        "Generating {} chunks (radius {}) on {} workers",
        total,
        radius,
        pool.thread_count()
    );

    let start = Instant::now();
    let mut summary = WorldSummary::default();
    let mut queue = positions.into_iter().peekable();
    let mut received = 0;

    while received < total {
        while let Some(&pos) = queue.peek() {
            match pool.submit(pos) {
                Ok(()) => {
                    queue.next();
                }
                Err(SubmitError::QueueFull(_)) => break,
                Err(e) => {
                    warn!("Skipping chunk {pos}: {e}");
                    queue.next();
                    received += 1;
                    summary.record_failure();
                }
            }
        }

        if let Some(result) = pool.recv_timeout(Duration::from_millis(100)) {
            received += 1;
            match result.result {
                Ok(chunk) => summary.record(&chunk),
                Err(_) => summary.record_failure(),
            }
        }
    }

    info!(
        "Generated {} chunks in {:.2}s",
        summary.chunks,
        start.elapsed().as_secs_f64()
    );
    summary
}

fn report(ctx: &WorldGenContext, summary: &WorldSummary) {
    info!(
        "Seed {}: {} chunks, {} failures, {} warnings, avg {}us per chunk",
        ctx.seed(),
        summary.chunks,
        summary.failures,
        summary.warnings,
        summary.average_time_us()
    );
    if let (Some(min), Some(max)) = (summary.min_height, summary.max_height) {
        info!(
            "Surface heights {}..={} (sea level {}), fill ratio {:.3}",
            min,
            max,
            ctx.preset().sea_level,
            summary.fill_ratio()
        );
    }

    let columns: usize = summary.biome_columns.values().sum();
    for (name, count) in summary.biome_histogram(ctx.registry()) {
        info!(
            "  {:<20} {:>7} columns ({:.1}%)",
            name,
            count,
            100.0 * count as f64 / columns.max(1) as f64
        );
    }

    match summary.origin_digest {
        Some(digest) => info!("Chunk (0, 0) digest: {digest:016x}"),
        None => warn!("Chunk (0, 0) was not generated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_dir_wins() {
        let dir = PathBuf::from("/tmp/strata-demo-config");
        assert_eq!(resolve_config_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn test_config_dir_always_resolves() {
        let dir = resolve_config_dir(None);
        assert!(!dir.as_os_str().is_empty());
        match default_config_dir() {
            Some(platform) => assert_eq!(dir, platform),
            None => assert_eq!(dir, PathBuf::from(".")),
        }
    }
}
