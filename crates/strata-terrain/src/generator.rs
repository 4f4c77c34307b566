//! Chunk generation entry points.
//!
//! A [`ChunkGenerator`] runs the three stages (landscape, replace pass,
//! decorate pass) for one chunk at a time. It owns its decorator chain, so a
//! generator must not be shared between threads; build one per worker over a
//! shared [`WorldGenContext`].

use std::sync::Arc;
use std::time::Instant;

use strata_config::GeneratorPreset;
use strata_voxel::{ChunkData, ChunkPos};

use crate::context::WorldGenContext;
use crate::decorate::{Decorator, decorate_pass, standard_decorators};
use crate::error::{GenerationError, GenerationWarning};
use crate::landscape::ChunkLandscape;
use crate::materialize::replace_pass;

/// A finished chunk plus the recoverable warnings raised while building it.
#[derive(Clone, Debug)]
pub struct GeneratedChunk {
    pub data: ChunkData,
    pub warnings: Vec<GenerationWarning>,
    /// Wall-clock time spent generating, in microseconds.
    pub generation_time_us: u64,
}

pub struct ChunkGenerator {
    ctx: Arc<WorldGenContext>,
    decorators: Vec<Box<dyn Decorator>>,
}

impl ChunkGenerator {
    /// Creates a generator with the standard decorator chain.
    pub fn new(ctx: Arc<WorldGenContext>) -> Self {
        let decorators = standard_decorators(ctx.seed(), ctx.blocks());
        Self { ctx, decorators }
    }

    /// Creates a generator with a custom decorator chain, run in the given order.
    pub fn with_decorators(ctx: Arc<WorldGenContext>, decorators: Vec<Box<dyn Decorator>>) -> Self {
        Self { ctx, decorators }
    }

    pub fn context(&self) -> &Arc<WorldGenContext> {
        &self.ctx
    }

    /// Generates the chunk at `pos`.
    ///
    /// The result depends only on the context and `pos`, never on which
    /// chunks this generator produced before.
    ///
    /// # Errors
    ///
    /// [`GenerationError::CoordinateOutOfRange`] if the chunk's world
    /// coordinates overflow `i32`. No state is modified in that case.
    pub fn generate(&mut self, pos: ChunkPos) -> Result<GeneratedChunk, GenerationError> {
        let start = Instant::now();

        let landscape = ChunkLandscape::compute(&self.ctx, pos)?;
        let mut data = replace_pass(&self.ctx, &landscape);
        decorate_pass(&self.ctx, &mut data, &mut self.decorators);

        let generation_time_us = start.elapsed().as_micros() as u64;
        for warning in &landscape.warnings {
            tracing::warn!("Chunk {pos}: {warning}");
        }
        tracing::debug!(
            "Generated chunk {} in {}us ({} warnings)",
            pos,
            generation_time_us,
            landscape.warnings.len()
        );

        Ok(GeneratedChunk {
            data,
            warnings: landscape.warnings,
            generation_time_us,
        })
    }
}

/// Generates one chunk with the default preset.
///
/// Builds a fresh context per call; use [`ChunkGenerator`] when generating
/// more than a handful of chunks.
pub fn generate_chunk(seed: u64, chunk_x: i32, chunk_z: i32) -> Result<ChunkData, GenerationError> {
    let ctx = WorldGenContext::new(seed, GeneratorPreset::default())?;
    let mut generator = ChunkGenerator::new(Arc::new(ctx));
    generator
        .generate(ChunkPos::new(chunk_x, chunk_z))
        .map(|chunk| chunk.data)
}
