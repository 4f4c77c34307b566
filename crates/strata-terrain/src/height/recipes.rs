//! Per-biome height recipes. Constants live in the [`HeightFunction`](super::HeightFunction)
//! variants; these functions only combine the shaping primitives.

#![allow(clippy::too_many_arguments)]

use strata_noise::NoiseFn;

use super::shaping::{ground_noise, hills, ridged, riverized, smoothstep, staircase};
use super::{PlateauBand, TerrainNoise};
use crate::seed::det_pow;

pub(super) fn plains(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    river: f64,
    base: f64,
    ground: f64,
    hill: f64,
) -> f64 {
    let h = n.sea_level + base + ground_noise(n, x, z, ground) + hills(n, x, z, hill);
    riverized(h, river, n.sea_level)
}

pub(super) fn highland(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    base: f64,
    ground: f64,
    hill: f64,
    ridge: f64,
) -> f64 {
    let h = n.sea_level
        + base
        + ground_noise(n, x, z, ground)
        + hills(n, x, z, hill)
        + ridge * ridged(n, x, z) * border;
    riverized(h, river, n.sea_level)
}

pub(super) fn mesa(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    base: f64,
    ground: f64,
    plateau: f64,
    threshold: f64,
    step: f64,
) -> f64 {
    // Cell value is constant per cell, so plateaus end in cliffs at cell borders.
    let cell = n.mesa_cells.get([x, z]);
    let lift = if cell > threshold {
        plateau * smoothstep(threshold, threshold + 0.2, cell) * border
    } else {
        0.0
    };
    let h = n.sea_level + base + ground_noise(n, x, z, ground) + staircase(lift, step, 2.0);
    riverized(h, river, n.sea_level)
}

pub(super) fn plateau(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    base: f64,
    ground: f64,
    bands: &[PlateauBand],
) -> f64 {
    let selector = (n.plateau_selector.get([x, z]) + 1.0) * 0.5;
    let stacked: f64 = bands
        .iter()
        .map(|&(height, threshold)| height * smoothstep(threshold, threshold + 0.04, selector))
        .sum();
    let h = n.sea_level + base + ground_noise(n, x, z, ground) + stacked * border;
    riverized(h, river, n.sea_level)
}

pub(super) fn ocean(n: &TerrainNoise, x: f64, z: f64, border: f64, depth: f64, ground: f64) -> f64 {
    // Shallow shelf where the ocean weight fades out.
    n.sea_level - depth * (0.35 + 0.65 * border) + ground_noise(n, x, z, ground)
}

pub(super) fn marsh(n: &TerrainNoise, x: f64, z: f64, river: f64, ground: f64) -> f64 {
    let h = n.sea_level - 1.0 + ground_noise(n, x, z, ground);
    riverized(h, river, n.sea_level)
}

pub(super) fn beach(n: &TerrainNoise, x: f64, z: f64, ground: f64) -> f64 {
    n.sea_level + 0.5 + ground_noise(n, x, z, ground)
}

pub(super) fn grassland_flats(n: &TerrainNoise, x: f64, z: f64, river: f64, ground: f64) -> f64 {
    let h = n.sea_level + 1.0 + ground_noise(n, x, z, ground);
    riverized(h, river, n.sea_level)
}

pub(super) fn grassland_hills(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    river: f64,
    ground: f64,
    hill: f64,
) -> f64 {
    let h = n.sea_level + 2.0 + ground_noise(n, x, z, ground) + hills(n, x, z, hill);
    riverized(h, river, n.sea_level)
}

pub(super) fn grassland_mountains(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    ground: f64,
    hill: f64,
    mountain: f64,
) -> f64 {
    let h = n.sea_level
        + 3.0
        + ground_noise(n, x, z, ground)
        + hills(n, x, z, hill)
        + mountain * ridged(n, x, z) * border;
    riverized(h, river, n.sea_level)
}

pub(super) fn lonely_mountain(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    base: f64,
    ground: f64,
    peak: f64,
    radius: f64,
) -> f64 {
    let distance = n.peak_distance(x, z);
    let cone = peak * det_pow((1.0 - distance / radius).max(0.0), 1.6) * border;
    let h = n.sea_level + base + ground_noise(n, x, z, ground) + cone;
    riverized(h, river, n.sea_level)
}

pub(super) fn ridged_extreme_hills(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    river: f64,
    base: f64,
    ground: f64,
    ridge: f64,
) -> f64 {
    let h = n.sea_level
        + base
        + ground_noise(n, x, z, ground)
        + hills(n, x, z, ridge * 0.2)
        + ridge * ridged(n, x, z) * (0.4 + 0.6 * border);
    riverized(h, river, n.sea_level)
}

pub(super) fn volcano(
    n: &TerrainNoise,
    x: f64,
    z: f64,
    border: f64,
    base: f64,
    ground: f64,
    peak: f64,
    radius: f64,
    crater_radius: f64,
    crater_depth: f64,
) -> f64 {
    let distance = n.peak_distance(x, z);
    let profile = volcano_profile(distance, peak, radius, crater_radius, crater_depth);
    n.sea_level + base + ground_noise(n, x, z, ground) + profile * border
}

/// Linear cone of height `peak` minus a parabolic crater inside `crater_radius`.
pub(super) fn volcano_profile(
    distance: f64,
    peak: f64,
    radius: f64,
    crater_radius: f64,
    crater_depth: f64,
) -> f64 {
    let cone = peak * (1.0 - distance / radius).max(0.0);
    if distance < crater_radius {
        let t = distance / crater_radius;
        cone - crater_depth * (1.0 - t * t)
    } else {
        cone
    }
}

pub(super) fn river(n: &TerrainNoise, x: f64, z: f64, depth: f64, ground: f64) -> f64 {
    n.sea_level - depth + ground_noise(n, x, z, ground)
}
