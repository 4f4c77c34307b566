//! Snow layers on exposed tops of cold columns, including tree canopies.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_voxel::{BlockId, BlockMask, BlockRegistry, ChunkBlocks, ChunkPos, WORLD_HEIGHT, blocks};

use super::{DecorationColumn, Decorator};
use crate::seed::{chunk_rng, derive_seed, salt};

pub struct SnowCoverDecorator {
    seed: u64,
    rng: ChaCha8Rng,
    /// Blocks a snow layer can rest on.
    solid: BlockMask,
    /// Plants the snow buries.
    plants: BlockMask,
}

impl SnowCoverDecorator {
    pub fn new(world_seed: u64, registry: &BlockRegistry) -> Self {
        let seed = derive_seed(world_seed, salt::SNOW);
        let mut solid = BlockMask::EMPTY;
        let mut plants = BlockMask::EMPTY;
        for id in 0..registry.len().min(BlockMask::CAPACITY) {
            let id = BlockId(id as u16);
            let Some(def) = registry.get(id) else {
                continue;
            };
            if def.solid {
                solid = solid.union(BlockMask::of(&[id]));
            } else if def.replaceable && id != blocks::AIR && id != blocks::SNOW_LAYER {
                plants = plants.union(BlockMask::of(&[id]));
            }
        }
        // No snow on ice or cactus.
        solid = solid.difference(BlockMask::of(&[blocks::ICE, blocks::CACTUS]));

        Self {
            seed,
            rng: chunk_rng(seed, ChunkPos::new(0, 0)),
            solid,
            plants,
        }
    }
}

impl Decorator for SnowCoverDecorator {
    fn name(&self) -> &'static str {
        "snow_cover"
    }

    fn begin_chunk(&mut self, pos: ChunkPos) {
        self.rng = chunk_rng(self.seed, pos);
    }

    fn decorate(&mut self, chunk: &mut ChunkBlocks, column: &DecorationColumn<'_>) {
        let chance = column.biome.vegetation.snow;
        if chance <= 0.0 {
            return;
        }
        let (x, z) = (column.local_x, column.local_z);
        let Some(top) = chunk.column_top(x, z) else {
            return;
        };
        let roll: f64 = self.rng.random();
        if roll >= chance {
            return;
        }

        let block = chunk.get(x, top, z);
        if self.plants.contains(block) {
            chunk.set(x, top, z, blocks::SNOW_LAYER);
        } else if self.solid.contains(block) && top + 1 < WORLD_HEIGHT {
            chunk.set(x, top + 1, z, blocks::SNOW_LAYER);
        }
    }
}
