//! Per-chunk landscape: blended heights, dominant biomes and river magnitudes
//! for all columns, before any block is written.

use strata_voxel::{CHUNK_AREA, CHUNK_SIDE, ChunkPos};

use crate::biome::{ColumnBlend, SAMPLE_COUNT};
use crate::context::WorldGenContext;
use crate::error::{GenerationError, GenerationWarning, WarningKind};
use crate::height::mountain_cap;

/// Column-major (`z * 16 + x`) results of the landscape pass.
#[derive(Clone, Debug)]
pub struct ChunkLandscape {
    pub pos: ChunkPos,
    /// World coordinate of local column `(0, 0)`.
    pub origin: (i32, i32),
    /// Final blended height in blocks.
    pub heights: Vec<f64>,
    /// Catalog index of the dominant biome.
    pub dominant: Vec<usize>,
    /// River carving magnitude in `[0, 1]`, before any biome opts out.
    pub river: Vec<f64>,
    pub warnings: Vec<GenerationWarning>,
}

impl ChunkLandscape {
    /// Resolves biomes on the kernel grid, blends them per column and
    /// evaluates the weighted height sum.
    ///
    /// # Errors
    ///
    /// [`GenerationError::CoordinateOutOfRange`] if a column of the chunk is
    /// not addressable with `i32` world coordinates.
    pub fn compute(ctx: &WorldGenContext, pos: ChunkPos) -> Result<Self, GenerationError> {
        let origin = pos
            .world_origin()
            .ok_or(GenerationError::CoordinateOutOfRange {
                chunk_x: pos.x,
                chunk_z: pos.z,
            })?;
        let scale = ctx.preset().coordinate_scale;
        let sea_level = ctx.sea_level();
        let height_scale = ctx.preset().height_scale;
        let registry = ctx.registry();
        let kernel = ctx.kernel();
        let mut warnings = Vec::new();

        // --- Biome samples ---
        let mut samples = [0usize; SAMPLE_COUNT];
        for (slot, &(ox, oz)) in samples.iter_mut().zip(kernel.sample_offsets()) {
            let wx = (origin.0 as f64 + ox as f64) * scale;
            let wz = (origin.1 as f64 + oz as f64) * scale;
            let selection = ctx.resolver().resolve(registry, wx, wz);
            if let Some(kind) = selection.fallback {
                warnings.push(GenerationWarning {
                    local_x: ox,
                    local_z: oz,
                    kind,
                });
            }
            *slot = selection.index;
        }

        // --- Columns ---
        let mut heights = vec![0.0; CHUNK_AREA];
        let mut dominant = vec![0; CHUNK_AREA];
        let mut river = vec![0.0; CHUNK_AREA];

        for z in 0..CHUNK_SIDE {
            for x in 0..CHUNK_SIDE {
                let column = z * CHUNK_SIDE + x;
                let warn = |kind| GenerationWarning {
                    local_x: x as i32,
                    local_z: z as i32,
                    kind,
                };

                let blend = match kernel.blend(column, &samples) {
                    Some(blend) => blend,
                    None => {
                        warnings.push(warn(WarningKind::EmptyBlend));
                        ColumnBlend::single(samples[kernel.nearest_sample(column)])
                    }
                };

                let wx = (origin.0 as f64 + x as f64) * scale;
                let wz = (origin.1 as f64 + z as f64) * scale;

                let strength = ctx.rivers().strength(wx, wz);
                let magnitude = if strength.is_finite() {
                    (-strength).clamp(0.0, 1.0)
                } else {
                    warnings.push(warn(WarningKind::NonFiniteRiver));
                    0.0
                };

                let mut h = 0.0;
                for &(index, weight) in blend.entries() {
                    let biome = registry.by_index(index);
                    let biome_river = if biome.allow_rivers { magnitude } else { 0.0 };
                    let raw = biome.height.height(ctx.terrain(), wx, wz, weight, biome_river);
                    h += biome.clamp_height(raw) * weight;
                }
                h = mountain_cap(sea_level + (h - sea_level) * height_scale);
                if !h.is_finite() {
                    warnings.push(warn(WarningKind::NonFiniteHeight));
                    h = sea_level;
                }

                heights[column] = h;
                dominant[column] = blend.dominant();
                river[column] = magnitude;
            }
        }

        Ok(Self {
            pos,
            origin,
            heights,
            dominant,
            river,
            warnings,
        })
    }

    #[inline]
    pub fn index(x: usize, z: usize) -> usize {
        z * CHUNK_SIDE + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeDescriptor, BiomeId};
    use crate::height::HeightFunction;
    use strata_config::GeneratorPreset;

    fn ctx() -> WorldGenContext {
        WorldGenContext::new(356_556_635, GeneratorPreset::default()).unwrap()
    }

    #[test]
    fn test_landscape_is_deterministic() {
        let ctx = ctx();
        let a = ChunkLandscape::compute(&ctx, ChunkPos::new(3, -2)).unwrap();
        let b = ChunkLandscape::compute(&ctx, ChunkPos::new(3, -2)).unwrap();
        assert_eq!(a.dominant, b.dominant);
        for (ha, hb) in a.heights.iter().zip(&b.heights) {
            assert_eq!(ha.to_bits(), hb.to_bits());
        }
    }

    #[test]
    fn test_heights_finite_and_capped() {
        let ctx = ctx();
        for cx in -2..2 {
            for cz in -2..2 {
                let land = ChunkLandscape::compute(&ctx, ChunkPos::new(cx, cz)).unwrap();
                for &h in &land.heights {
                    assert!(h.is_finite());
                    assert!(h <= mountain_cap(254.0) + 1e-9, "Height {h} escaped the cap");
                }
                for &m in &land.river {
                    assert!((0.0..=1.0).contains(&m));
                }
            }
        }
    }

    #[test]
    fn test_coordinate_scale_stretches_landscape() {
        let base = ChunkLandscape::compute(&ctx(), ChunkPos::new(4, 4)).unwrap();
        let preset = GeneratorPreset {
            coordinate_scale: 2.0,
            ..GeneratorPreset::default()
        };
        let scaled_ctx = WorldGenContext::new(356_556_635, preset).unwrap();
        let scaled = ChunkLandscape::compute(&scaled_ctx, ChunkPos::new(4, 4)).unwrap();
        assert_ne!(base.heights, scaled.heights, "Coordinate scale had no effect");
    }

    fn nan_height_context() -> WorldGenContext {
        let catalog = vec![BiomeDescriptor::new(
            BiomeId(0),
            "broken",
            HeightFunction::Plains {
                base: f64::NAN,
                ground: 2.0,
                hills: 4.0,
            },
        )];
        WorldGenContext::with_catalog(7, GeneratorPreset::default(), catalog).unwrap()
    }

    #[test]
    fn test_non_finite_height_falls_back_to_sea_level() {
        let ctx = nan_height_context();
        let land = ChunkLandscape::compute(&ctx, ChunkPos::new(0, 0)).unwrap();
        assert!(land.heights.iter().all(|&h| h == ctx.sea_level()));
        let flagged = land
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::NonFiniteHeight)
            .count();
        assert_eq!(flagged, CHUNK_AREA);
    }

    #[test]
    fn test_out_of_range_chunk_errors() {
        let ctx = ctx();
        let err = ChunkLandscape::compute(&ctx, ChunkPos::new(i32::MAX, 0)).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::CoordinateOutOfRange {
                chunk_x: i32::MAX,
                chunk_z: 0
            }
        ));
    }
}
