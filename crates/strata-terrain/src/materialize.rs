//! Replace pass: turns a [`ChunkLandscape`] into block columns.
//!
//! Each column is written by its effective biome, which is the dominant biome,
//! its river variant where a river crosses it, or its beach variant on dry
//! shore columns.

use strata_voxel::{CHUNK_SIDE, ChunkData, ColumnInfo, WORLD_HEIGHT, blocks};

use crate::biome::{BiomeDescriptor, BiomeRegistry};
use crate::context::WorldGenContext;
use crate::landscape::ChunkLandscape;
use crate::river::RIVER_THRESHOLD;

/// Shore band, relative to sea level, where beach variants replace dry columns.
pub const BEACH_BAND: (i32, i32) = (-2, 1);

/// `floor(height)` clamped to `[1, WORLD_HEIGHT - 2]`.
pub fn quantize_height(height: f64) -> i32 {
    (height.floor() as i32).clamp(1, WORLD_HEIGHT as i32 - 2)
}

/// Channel depth below sea level for a river of carving magnitude `magnitude`.
/// Always at least 2, so every river column holds water.
#[inline]
pub fn river_depth(magnitude: f64) -> i32 {
    2 + (2.0 * magnitude).floor() as i32
}

/// Effective biome index and surface height of one column.
fn effective_column(
    registry: &BiomeRegistry,
    dominant: usize,
    surface: i32,
    magnitude: f64,
    sea_level: i32,
) -> (usize, i32) {
    let biome = registry.by_index(dominant);
    if biome.allow_rivers && magnitude >= RIVER_THRESHOLD {
        let index = registry.index_of(biome.river_variant).unwrap_or(dominant);
        return (index, surface.min(sea_level - river_depth(magnitude)));
    }
    if let Some(beach) = biome.beach_variant
        && (sea_level + BEACH_BAND.0..=sea_level + BEACH_BAND.1).contains(&surface)
    {
        return (registry.index_of(beach).unwrap_or(dominant), surface);
    }
    (dominant, surface)
}

/// Writes bedrock, stone, filler, top block and water for every column.
pub fn replace_pass(ctx: &WorldGenContext, land: &ChunkLandscape) -> ChunkData {
    let registry = ctx.registry();
    let sea_level = ctx.preset().sea_level as i32;
    let mut data = ChunkData::new(land.pos);

    for z in 0..CHUNK_SIDE {
        for x in 0..CHUNK_SIDE {
            let i = ChunkLandscape::index(x, z);
            let (index, surface) = effective_column(
                registry,
                land.dominant[i],
                quantize_height(land.heights[i]),
                land.river[i],
                sea_level,
            );
            let biome = registry.by_index(index);
            write_column(&mut data, biome, x, z, surface, sea_level);
            data.columns[i] = ColumnInfo {
                biome_id: biome.id.0,
                surface_height: surface as i16,
            };
        }
    }
    data
}

fn write_column(
    data: &mut ChunkData,
    biome: &BiomeDescriptor,
    x: usize,
    z: usize,
    surface: i32,
    sea_level: i32,
) {
    let rule = biome.surface_rule();
    let surface = surface as usize;
    let sea_level = sea_level as usize;
    let submerged = surface + 1 < sea_level;
    let (top, filler) = if submerged {
        (rule.underwater, rule.underwater)
    } else {
        (rule.top, rule.filler)
    };
    let filler_start = surface.saturating_sub(rule.filler_depth as usize).max(1);

    let column = &mut data.blocks;
    column.set(x, 0, z, blocks::BEDROCK);
    column.fill_column(x, z, 1, filler_start, blocks::STONE);
    column.fill_column(x, z, filler_start, surface, filler);
    column.set(x, surface, z, top);

    if submerged {
        column.fill_column(x, z, surface + 1, sea_level, blocks::WATER);
        if rule.frozen_water {
            column.set(x, sea_level - 1, z, blocks::ICE);
        }
    }
}
