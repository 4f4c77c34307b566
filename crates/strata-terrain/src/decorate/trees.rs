//! Trees and cacti, placed through [`StructurePlan`]s so a tree that does not
//! fit is dropped whole.

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_noise::{NoiseFn, Scale, Simplex};
use strata_voxel::{BlockId, BlockMask, ChunkBlocks, ChunkPos, blocks};

use super::{DecorationColumn, Decorator};
use crate::seed::{chunk_rng, derive_seed, salt};
use crate::structure::StructurePlan;

/// Wavelength of the forest density field.
const DENSITY_WAVELENGTH: f64 = 96.0;

const SOIL: BlockMask = BlockMask::of(&[blocks::GRASS, blocks::DIRT, blocks::PODZOL]);
const CACTUS_SOIL: BlockMask = BlockMask::of(&[blocks::SAND, blocks::RED_SAND]);
const AIR: BlockMask = BlockMask::of(&[blocks::AIR]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Oak,
    Birch,
    Spruce,
    Acacia,
    Cactus,
}

impl TreeKind {
    fn blocks(self) -> (BlockId, BlockId) {
        match self {
            Self::Oak => (blocks::OAK_LOG, blocks::OAK_LEAVES),
            Self::Birch => (blocks::BIRCH_LOG, blocks::BIRCH_LEAVES),
            Self::Spruce => (blocks::SPRUCE_LOG, blocks::SPRUCE_LEAVES),
            Self::Acacia => (blocks::ACACIA_LOG, blocks::ACACIA_LEAVES),
            Self::Cactus => (blocks::CACTUS, blocks::CACTUS),
        }
    }

    /// Builds the plan for one tree whose trunk starts at `origin`.
    ///
    /// `replaceable` is the set of blocks a trunk or canopy may grow into.
    pub fn plan(self, rng: &mut ChaCha8Rng, origin: IVec3, replaceable: BlockMask) -> StructurePlan {
        let mut plan = StructurePlan::new(origin);
        let (log, leaves) = self.blocks();
        // Canopies may overlap other canopies but never cut through logs.
        let canopy_space = replaceable.union(BlockMask::of(&[leaves]));

        match self {
            Self::Oak | Self::Birch => {
                let height = if self == Self::Oak {
                    rng.random_range(4..=6)
                } else {
                    rng.random_range(5..=7)
                };
                plan.require(IVec3::NEG_Y, SOIL);
                trunk(&mut plan, IVec3::ZERO, height, log, replaceable);
                for dy in height - 2..=height + 1 {
                    let radius = if dy >= height { 1 } else { 2 };
                    let corner_gap = rng.random_bool(0.5);
                    let hollow = dy < height;
                    disc(
                        &mut plan,
                        IVec3::new(0, dy, 0),
                        radius,
                        corner_gap,
                        hollow,
                        leaves,
                        canopy_space,
                    );
                }
            }
            Self::Spruce => {
                let height = rng.random_range(6..=9);
                plan.require(IVec3::NEG_Y, SOIL);
                trunk(&mut plan, IVec3::ZERO, height, log, replaceable);
                plan.require(IVec3::new(0, height, 0), canopy_space)
                    .place(IVec3::new(0, height, 0), leaves);
                // Alternating rings widen toward the bottom of the crown.
                for (i, dy) in (2..height).rev().enumerate() {
                    let radius = if i % 2 == 0 { 1 } else { (i as i32 / 3 + 1).min(2) };
                    disc(&mut plan, IVec3::new(0, dy, 0), radius, true, true, leaves, canopy_space);
                }
            }
            Self::Acacia => {
                let height = rng.random_range(4..=5);
                let lean = [IVec3::X, IVec3::NEG_X, IVec3::Z, IVec3::NEG_Z][rng.random_range(0..4)];
                plan.require(IVec3::NEG_Y, SOIL);
                trunk(&mut plan, IVec3::ZERO, height - 2, log, replaceable);
                let bend = IVec3::new(0, height - 2, 0) + lean;
                trunk(&mut plan, bend, 2, log, replaceable);
                let crown = bend + IVec3::new(0, 2, 0) + lean;
                plan.require(crown - IVec3::Y, replaceable)
                    .place(crown - IVec3::Y, log);
                disc(&mut plan, crown, 2, true, false, leaves, canopy_space);
                disc(&mut plan, crown + IVec3::Y, 1, false, false, leaves, canopy_space);
            }
            Self::Cactus => {
                let height = rng.random_range(1..=3);
                plan.require(IVec3::NEG_Y, CACTUS_SOIL);
                for dy in 0..height {
                    let cell = IVec3::new(0, dy, 0);
                    plan.require(cell, AIR);
                    for side in [IVec3::X, IVec3::NEG_X, IVec3::Z, IVec3::NEG_Z] {
                        plan.require(cell + side, AIR);
                    }
                    plan.place(cell, log);
                }
            }
        }
        plan
    }
}

/// Vertical run of `height` logs starting at `base`.
fn trunk(plan: &mut StructurePlan, base: IVec3, height: i32, log: BlockId, space: BlockMask) {
    for dy in 0..height {
        let cell = base + IVec3::new(0, dy, 0);
        plan.require(cell, space).place(cell, log);
    }
}

/// Square layer of leaves around `center`, optionally without the four
/// corners. A `hollow` layer leaves the center to the trunk.
fn disc(
    plan: &mut StructurePlan,
    center: IVec3,
    radius: i32,
    corner_gap: bool,
    hollow: bool,
    leaves: BlockId,
    space: BlockMask,
) {
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            if corner_gap && radius > 0 && dx.abs() == radius && dz.abs() == radius {
                continue;
            }
            if hollow && dx == 0 && dz == 0 {
                continue;
            }
            let cell = center + IVec3::new(dx, 0, dz);
            plan.require(cell, space).place(cell, leaves);
        }
    }
}

pub struct TreeDecorator {
    seed: u64,
    rng: ChaCha8Rng,
    density: Scale<Simplex>,
    replaceable: BlockMask,
}

impl TreeDecorator {
    pub fn new(world_seed: u64, replaceable: BlockMask) -> Self {
        let seed = derive_seed(world_seed, salt::TREES);
        Self {
            seed,
            rng: chunk_rng(seed, ChunkPos::new(0, 0)),
            density: Scale::wavelength(Simplex::new(seed), DENSITY_WAVELENGTH),
            replaceable,
        }
    }

    fn pick_kind(&mut self, kinds: &[(TreeKind, u32)]) -> Option<TreeKind> {
        let total: u32 = kinds.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return None;
        }
        let mut target = self.rng.random_range(0..total);
        for &(kind, weight) in kinds {
            if target < weight {
                return Some(kind);
            }
            target -= weight;
        }
        None
    }
}

impl Decorator for TreeDecorator {
    fn name(&self) -> &'static str {
        "trees"
    }

    fn begin_chunk(&mut self, pos: ChunkPos) {
        self.rng = chunk_rng(self.seed, pos);
    }

    fn decorate(&mut self, chunk: &mut ChunkBlocks, column: &DecorationColumn<'_>) {
        let veg = &column.biome.vegetation;
        if !column.is_surface_column || !column.below_max_height || veg.trees <= 0.0 {
            return;
        }
        let density = (self.density.get([column.world_x as f64, column.world_z as f64]) + 1.0) * 0.5;
        let roll: f64 = self.rng.random();
        if roll >= veg.trees * (0.4 + 0.6 * density) {
            return;
        }
        let Some(kind) = self.pick_kind(&veg.tree_kinds) else {
            return;
        };
        let origin = IVec3::new(
            column.local_x as i32,
            column.height as i32 + 1,
            column.local_z as i32,
        );
        let mut plan = kind.plan(&mut self.rng, origin, self.replaceable);
        plan.commit(chunk);
    }
}
