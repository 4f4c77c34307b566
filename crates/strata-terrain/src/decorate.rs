//! Decorate pass: seeded decorators that add plants, trees and snow on top of
//! the replaced columns.
//!
//! Decorators run in a fixed order, each visiting every column of the chunk
//! before the next one starts, because later decorators read blocks written by
//! earlier ones (snow settles on tree canopies). Every decorator owns its RNG
//! stream and reseeds it from `(world seed, decorator salt, chunk position)`
//! at the start of each chunk, so output never depends on which chunks the
//! instance decorated before.

mod foliage;
mod snow;
mod trees;

pub use foliage::FoliageDecorator;
pub use snow::SnowCoverDecorator;
pub use trees::{TreeDecorator, TreeKind};

use strata_voxel::{BlockRegistry, CHUNK_SIDE, ChunkBlocks, ChunkData, ChunkPos, WORLD_HEIGHT};

use crate::biome::{BiomeDescriptor, BiomeId};
use crate::context::WorldGenContext;

/// Everything a decorator knows about one column.
#[derive(Clone, Copy, Debug)]
pub struct DecorationColumn<'a> {
    pub world_x: i32,
    pub world_z: i32,
    /// Effective biome of the column (after river and beach substitution).
    pub biome: &'a BiomeDescriptor,
    pub local_x: usize,
    /// Y of the top terrain block.
    pub height: usize,
    pub local_z: usize,
    /// The top block is dry land open to the sky.
    pub is_surface_column: bool,
    /// There is at least one free cell above the top block.
    pub below_max_height: bool,
}

pub trait Decorator: Send {
    fn name(&self) -> &'static str;

    /// Reseeds the decorator's RNG stream for `pos`.
    fn begin_chunk(&mut self, pos: ChunkPos);

    fn decorate(&mut self, blocks: &mut ChunkBlocks, column: &DecorationColumn<'_>);
}

/// The standard chain: foliage, then trees, then snow cover.
pub fn standard_decorators(world_seed: u64, blocks: &BlockRegistry) -> Vec<Box<dyn Decorator>> {
    vec![
        Box::new(FoliageDecorator::new(world_seed)),
        Box::new(TreeDecorator::new(world_seed, blocks.replaceable_mask())),
        Box::new(SnowCoverDecorator::new(world_seed, blocks)),
    ]
}

/// Runs `decorators` over every column of `data`, decorator-major.
pub fn decorate_pass(
    ctx: &WorldGenContext,
    data: &mut ChunkData,
    decorators: &mut [Box<dyn Decorator>],
) {
    let registry = ctx.registry();
    let sea_level = ctx.preset().sea_level as usize;
    let Some((origin_x, origin_z)) = data.pos.world_origin() else {
        return;
    };

    for decorator in decorators.iter_mut() {
        decorator.begin_chunk(data.pos);
        for local_z in 0..CHUNK_SIDE {
            for local_x in 0..CHUNK_SIDE {
                let info = data.columns[ChunkData::column_index(local_x, local_z)];
                let Some(biome) = registry.get(BiomeId(info.biome_id)) else {
                    continue;
                };
                let height = info.surface_height.max(0) as usize;
                let column = DecorationColumn {
                    world_x: origin_x + local_x as i32,
                    world_z: origin_z + local_z as i32,
                    biome,
                    local_x,
                    height,
                    local_z,
                    is_surface_column: height + 1 >= sea_level,
                    below_max_height: height + 1 < WORLD_HEIGHT,
                };
                decorator.decorate(&mut data.blocks, &column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::GeneratorPreset;

    use crate::landscape::ChunkLandscape;
    use crate::materialize::replace_pass;

    #[test]
    fn test_standard_chain_order() {
        let chain = standard_decorators(1, &BlockRegistry::standard());
        let names: Vec<_> = chain.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["foliage", "trees", "snow_cover"]);
    }

    #[test]
    fn test_decoration_ignores_instance_history() {
        let ctx = WorldGenContext::new(356_556_635, GeneratorPreset::default()).unwrap();
        let pos = ChunkPos::new(2, 7);
        let base = replace_pass(&ctx, &ChunkLandscape::compute(&ctx, pos).unwrap());

        let mut fresh = standard_decorators(ctx.seed(), ctx.blocks());
        let mut a = base.clone();
        decorate_pass(&ctx, &mut a, &mut fresh);

        // A chain that already decorated other chunks must give the same result.
        let mut used = standard_decorators(ctx.seed(), ctx.blocks());
        for other in [ChunkPos::new(-4, 1), ChunkPos::new(9, 9)] {
            let mut scratch = replace_pass(&ctx, &ChunkLandscape::compute(&ctx, other).unwrap());
            decorate_pass(&ctx, &mut scratch, &mut used);
        }
        let mut b = base.clone();
        decorate_pass(&ctx, &mut b, &mut used);

        assert_eq!(a.blocks.as_slice(), b.blocks.as_slice());
    }

    #[test]
    fn test_decoration_never_touches_column_records() {
        let ctx = WorldGenContext::new(11, GeneratorPreset::default()).unwrap();
        let pos = ChunkPos::new(0, 0);
        let mut data = replace_pass(&ctx, &ChunkLandscape::compute(&ctx, pos).unwrap());
        let columns = data.columns.clone();
        decorate_pass(&ctx, &mut data, &mut standard_decorators(ctx.seed(), ctx.blocks()));
        assert_eq!(data.columns, columns);
    }
}
