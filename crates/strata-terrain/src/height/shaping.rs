//! Reusable numeric building blocks shared by the biome height recipes.

use strata_noise::NoiseFn;

use super::TerrainNoise;
use crate::seed::det_pow;

/// Turning point used by [`ground_noise`].
pub const GROUND_TURN: f64 = 0.35;

/// Height offset above sea level that river beds converge to.
pub const RIVER_BED_OFFSET: f64 = 0.45;

/// Maps a nominal `[-1, 1]` sample to a C1-continuous `[0, 1]` curve.
///
/// Below the turning point `p` (in the `[0, 1]` domain) the curve is a
/// parabola that flattens toward zero; above it the curve continues linearly
/// with matching slope and reaches 1 at the top of the input range. Lower
/// turning points leave fewer flat valley floors.
#[inline]
pub fn blended_hill(value: f64, turn: f64) -> f64 {
    let t = ((value + 1.0) * 0.5).clamp(0.0, 1.0);
    let p = turn.clamp(1e-3, 1.0);
    let a = 1.0 / (2.0 * p - p * p);
    if t < p {
        a * t * t
    } else {
        a * p * p + 2.0 * a * p * (t - p)
    }
}

/// Bayesian confidence remap: `c = p·m / (1 − p)`, result `c / (1 + c)`.
///
/// `p` is clamped to `[0, 1)`; `m > 1` pushes the result toward 1, `m < 1`
/// toward 0. Monotonically non-decreasing in `p` for `m > 0`.
#[inline]
pub fn bayesian(p: f64, multiplier: f64) -> f64 {
    let p = p.clamp(0.0, 1.0 - 1e-9);
    let confidence = p * multiplier / (1.0 - p);
    confidence / (1.0 + confidence)
}

/// Three octaves of remapped simplex noise at 49, 23 and 11 world units with
/// amplitudes `a`, `a/2`, `a/4`. Output lies in `[0, 1.75·a]`.
pub fn ground_noise(noise: &TerrainNoise, x: f64, z: f64, amplitude: f64) -> f64 {
    let mut total = 0.0;
    let mut amp = amplitude;
    for field in &noise.ground {
        total += amp * blended_hill(field.get([x, z]), GROUND_TURN);
        amp *= 0.5;
    }
    total
}

/// Broad 150-unit hills modulated by a ridged 55-unit layer. Output lies in
/// `[0, strength]`.
pub fn hills(noise: &TerrainNoise, x: f64, z: f64, strength: f64) -> f64 {
    let broad = blended_hill(noise.hills_broad.get([x, z]), 0.5);
    let ridge = 1.0 - noise.hills_detail.get([x, z]).abs().min(1.0);
    strength * broad * (0.5 + 0.5 * ridge)
}

/// Ridged multi-octave field in `[0, 1]`, sharp crests where the source crosses zero.
pub fn ridged(noise: &TerrainNoise, x: f64, z: f64) -> f64 {
    let r = 1.0 - noise.ridge.get([x, z]).abs().min(1.0);
    r * r
}

/// Blends `height` toward `sea_level + 0.45` by `river` in `[0, 1]`.
///
/// The remap multiplier falls with the unblended height above sea level, so
/// steep banks are pulled down less than low floodplains.
pub fn riverized(height: f64, river: f64, sea_level: f64) -> f64 {
    if river <= 0.0 {
        return height;
    }
    let target = sea_level + RIVER_BED_OFFSET;
    let above = (height - sea_level).max(0.0);
    let multiplier = 3.0 / (1.0 + above * 0.1);
    let blend = bayesian(river.min(1.0), multiplier);
    height + (target - height) * blend
}

/// Two staged soft caps: 75% of the excess above 160, then 75% of the
/// remaining excess above 180. Never raises a height.
pub fn mountain_cap(height: f64) -> f64 {
    let mut h = height;
    if h > 160.0 {
        h = 160.0 + 0.75 * (h - 160.0);
    }
    if h > 180.0 {
        h = 180.0 + 0.75 * (h - 180.0);
    }
    h
}

/// Terraces: flat treads for the first 70% of each `step`, then a linear
/// riser of sharpness `exponent` up to the next tread.
pub fn staircase(height: f64, step: f64, exponent: f64) -> f64 {
    if step <= 0.0 {
        return height;
    }
    let level = (height / step).floor();
    let frac = height / step - level;
    let riser = if frac < 0.7 {
        0.0
    } else {
        det_pow((frac - 0.7) / 0.3, exponent)
    };
    (level + riser) * step
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
