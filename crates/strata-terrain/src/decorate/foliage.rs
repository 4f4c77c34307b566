//! Ground cover: tall grass, ferns, flowers and dead bushes.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_noise::{NoiseFn, Scale, Simplex};
use strata_voxel::{BlockId, ChunkBlocks, ChunkPos, blocks};

use super::{DecorationColumn, Decorator};
use crate::seed::{chunk_rng, derive_seed, salt};

/// Wavelength of the patch field that clumps grass into meadows.
const PATCH_WAVELENGTH: f64 = 24.0;
/// Biomes colder than this grow ferns among their grass.
const FERN_TEMPERATURE: f64 = 0.35;

pub struct FoliageDecorator {
    seed: u64,
    rng: ChaCha8Rng,
    patches: Scale<Simplex>,
}

impl FoliageDecorator {
    pub fn new(world_seed: u64) -> Self {
        let seed = derive_seed(world_seed, salt::FOLIAGE);
        Self {
            seed,
            rng: chunk_rng(seed, ChunkPos::new(0, 0)),
            patches: Scale::wavelength(Simplex::new(seed), PATCH_WAVELENGTH),
        }
    }

    fn pick_plant(&mut self, top: BlockId, column: &DecorationColumn<'_>) -> Option<BlockId> {
        let veg = &column.biome.vegetation;
        let patch = (self.patches.get([column.world_x as f64, column.world_z as f64]) + 1.0) * 0.5;
        let roll: f64 = self.rng.random();

        match top {
            blocks::GRASS | blocks::PODZOL => {
                if roll < veg.flowers {
                    Some(if self.rng.random_bool(0.5) {
                        blocks::DANDELION
                    } else {
                        blocks::POPPY
                    })
                } else if roll < veg.flowers + veg.grass * (0.5 + patch) {
                    let fern = column.biome.temperature < FERN_TEMPERATURE && self.rng.random_bool(0.4);
                    Some(if fern { blocks::FERN } else { blocks::TALL_GRASS })
                } else {
                    None
                }
            }
            blocks::SAND | blocks::RED_SAND | blocks::TERRACOTTA => {
                (roll < veg.dead_bush).then_some(blocks::DEAD_BUSH)
            }
            _ => None,
        }
    }
}

impl Decorator for FoliageDecorator {
    fn name(&self) -> &'static str {
        "foliage"
    }

    fn begin_chunk(&mut self, pos: ChunkPos) {
        self.rng = chunk_rng(self.seed, pos);
    }

    fn decorate(&mut self, chunk: &mut ChunkBlocks, column: &DecorationColumn<'_>) {
        if !column.is_surface_column || !column.below_max_height {
            return;
        }
        let (x, y, z) = (column.local_x, column.height, column.local_z);
        if chunk.get(x, y + 1, z) != blocks::AIR {
            return;
        }
        let top = chunk.get(x, y, z);
        if let Some(plant) = self.pick_plant(top, column) {
            chunk.set(x, y + 1, z, plant);
        }
    }
}
