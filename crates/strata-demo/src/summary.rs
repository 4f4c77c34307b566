//! Aggregate statistics over the generated chunks.

use std::collections::BTreeMap;

use strata_terrain::{BiomeId, BiomeRegistry, GeneratedChunk, hash_chunk_data};
use strata_voxel::ChunkPos;

#[derive(Debug, Default)]
pub struct WorldSummary {
    pub chunks: usize,
    pub failures: usize,
    pub warnings: usize,
    /// Column count per effective biome id.
    pub biome_columns: BTreeMap<u8, usize>,
    pub min_height: Option<i16>,
    pub max_height: Option<i16>,
    pub non_air_blocks: usize,
    pub total_time_us: u64,
    /// Digest of chunk (0, 0), if it was generated.
    pub origin_digest: Option<u64>,
}

impl WorldSummary {
    pub fn record(&mut self, chunk: &GeneratedChunk) {
        self.chunks += 1;
        self.warnings += chunk.warnings.len();
        self.total_time_us += chunk.generation_time_us;
        self.non_air_blocks += chunk.data.blocks.non_air_count();
        for column in &chunk.data.columns {
            *self.biome_columns.entry(column.biome_id).or_default() += 1;
            let h = column.surface_height;
            self.min_height = Some(self.min_height.map_or(h, |m| m.min(h)));
            self.max_height = Some(self.max_height.map_or(h, |m| m.max(h)));
        }
        if chunk.data.pos == ChunkPos::new(0, 0) {
            self.origin_digest = Some(hash_chunk_data(&chunk.data));
        }
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn average_time_us(&self) -> u64 {
        if self.chunks == 0 {
            0
        } else {
            self.total_time_us / self.chunks as u64
        }
    }

    /// Biomes by column count, most common first, with their names.
    pub fn biome_histogram<'a>(&self, registry: &'a BiomeRegistry) -> Vec<(&'a str, usize)> {
        let mut rows: Vec<_> = self
            .biome_columns
            .iter()
            .map(|(&id, &count)| {
                let name = registry
                    .get(BiomeId(id))
                    .map_or("unknown", |biome| biome.name.as_str());
                (name, count)
            })
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        rows
    }

    /// Fraction of the generated volume that is not air.
    pub fn fill_ratio(&self) -> f64 {
        let volume = self.chunks * blocks_per_chunk();
        if volume == 0 {
            0.0
        } else {
            self.non_air_blocks as f64 / volume as f64
        }
    }
}

fn blocks_per_chunk() -> usize {
    strata_voxel::CHUNK_AREA * strata_voxel::WORLD_HEIGHT
}

/// Chunk positions of the square of `radius` chunks around the origin,
/// nearest first.
pub fn square_around_origin(radius: u32) -> Vec<ChunkPos> {
    let r = radius.min(i32::MAX as u32 / 2) as i32;
    let mut positions: Vec<_> = (-r..=r)
        .flat_map(|x| (-r..=r).map(move |z| ChunkPos::new(x, z)))
        .collect();
    positions.sort_by_key(|p| (p.x as i64).pow(2) + (p.z as i64).pow(2));
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_config::GeneratorPreset;
    use strata_terrain::{ChunkGenerator, WorldGenContext};

    #[test]
    fn test_square_is_sorted_by_distance() {
        let positions = square_around_origin(2);
        assert_eq!(positions.len(), 25);
        assert_eq!(positions[0], ChunkPos::new(0, 0));
        let last = positions[24];
        assert_eq!(last.x.abs(), 2);
        assert_eq!(last.z.abs(), 2);
    }

    #[test]
    fn test_summary_counts_columns() {
        let ctx = Arc::new(WorldGenContext::new(5, GeneratorPreset::default()).unwrap());
        let mut generator = ChunkGenerator::new(Arc::clone(&ctx));
        let mut summary = WorldSummary::default();
        for pos in square_around_origin(1) {
            summary.record(&generator.generate(pos).unwrap());
        }
        summary.record_failure();

        assert_eq!(summary.chunks, 9);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.biome_columns.values().sum::<usize>(), 9 * 256);
        assert!(summary.min_height <= summary.max_height);
        assert!(summary.origin_digest.is_some());
        assert!(summary.fill_ratio() > 0.0 && summary.fill_ratio() < 1.0);

        let histogram = summary.biome_histogram(ctx.registry());
        assert!(histogram.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(histogram.iter().all(|(name, _)| *name != "unknown"));
    }
}
