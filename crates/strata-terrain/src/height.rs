//! Terrain height library.
//!
//! Each biome carries one [`HeightFunction`] variant holding its tuned
//! constants. Every variant evaluates
//! `f(noise, world_x, world_z, border, river)` against the shared, read-only
//! [`TerrainNoise`] fields and returns an absolute height in blocks.

mod recipes;
mod shaping;

pub use shaping::{
    GROUND_TURN, RIVER_BED_OFFSET, bayesian, blended_hill, ground_noise, hills, mountain_cap,
    ridged, riverized, smoothstep, staircase,
};

use strata_noise::{Cellular, CellularReturn, Fractal, Scale, Simplex};

use crate::seed::{derive_seed, salt};

/// Noise fields shared by every height recipe, built once per world seed.
pub struct TerrainNoise {
    /// Water surface height.
    pub sea_level: f64,
    /// Ground octaves at 49, 23 and 11 world units.
    pub ground: [Scale<Simplex>; 3],
    pub hills_broad: Scale<Simplex>,
    pub hills_detail: Scale<Simplex>,
    /// Three-octave source for ridged mountain ranges.
    pub ridge: Fractal<Scale<Simplex>>,
    /// Slow field gating plateau bands.
    pub plateau_selector: Fractal<Scale<Simplex>>,
    /// Piecewise-constant cell values for mesa plateaus.
    pub mesa_cells: Scale<Cellular>,
    /// Feature points for lone peaks and volcanoes.
    pub peaks: Cellular,
    /// Inverse wavelength applied before sampling [`TerrainNoise::peaks`].
    pub peak_frequency: f64,
}

impl TerrainNoise {
    pub fn new(world_seed: u64, sea_level: f64) -> Self {
        let ground_seed = derive_seed(world_seed, salt::GROUND);
        let simplex = |seed: u64, wavelength: f64| Scale::wavelength(Simplex::new(seed), wavelength);

        Self {
            sea_level,
            ground: [
                simplex(ground_seed, 49.0),
                simplex(ground_seed.wrapping_add(1), 23.0),
                simplex(ground_seed.wrapping_add(2), 11.0),
            ],
            hills_broad: simplex(derive_seed(world_seed, salt::HILLS), 150.0),
            hills_detail: simplex(derive_seed(world_seed, salt::HILLS).wrapping_add(1), 55.0),
            ridge: Fractal::new(simplex(derive_seed(world_seed, salt::RIDGE), 320.0), 3.0)
                .with_gain(0.45),
            plateau_selector: Fractal::new(
                simplex(derive_seed(world_seed, salt::PLATEAU), 420.0),
                2.0,
            ),
            mesa_cells: Scale::wavelength(
                Cellular::new(derive_seed(world_seed, salt::MESA))
                    .with_return_type(CellularReturn::CellValue),
                140.0,
            ),
            peaks: Cellular::new(derive_seed(world_seed, salt::PEAKS)).with_jitter(0.7),
            peak_frequency: 1.0 / 380.0,
        }
    }

    /// Distance to the nearest peak feature point, in peak-cell units.
    pub fn peak_distance(&self, x: f64, z: f64) -> f64 {
        self.peaks
            .sample_cell2([x * self.peak_frequency, z * self.peak_frequency])
            .distance
    }
}

/// `(extra height, selector threshold)` pairs stacked by the plateau recipe.
pub type PlateauBand = (f64, f64);

/// Per-biome height recipe with its tuned constants.
#[derive(Clone, Debug, PartialEq)]
pub enum HeightFunction {
    /// Gentle rolling land: ground octaves plus low hills.
    Plains { base: f64, ground: f64, hills: f64 },
    /// Raised land with ridged relief.
    Highland {
        base: f64,
        ground: f64,
        hills: f64,
        ridge: f64,
    },
    /// Cellular plateaus cut into terraces.
    Mesa {
        base: f64,
        ground: f64,
        plateau: f64,
        threshold: f64,
        step: f64,
    },
    /// Selector-gated staircase of stacked bands.
    Plateau {
        base: f64,
        ground: f64,
        bands: Vec<PlateauBand>,
    },
    /// Sea floor, deepest in the biome interior.
    Ocean { depth: f64, ground: f64 },
    /// Waterlogged flats hovering around sea level.
    Marsh { ground: f64 },
    /// Shore slope just above the water line.
    Beach { ground: f64 },
    GrasslandFlats { ground: f64 },
    GrasslandHills { ground: f64, hills: f64 },
    GrasslandMountains {
        ground: f64,
        hills: f64,
        mountain: f64,
    },
    /// A single cone rising from a cellular feature point.
    LonelyMountain {
        base: f64,
        ground: f64,
        peak: f64,
        radius: f64,
    },
    RidgedExtremeHills { base: f64, ground: f64, ridge: f64 },
    /// Cone with a crater at its summit.
    Volcano {
        base: f64,
        ground: f64,
        peak: f64,
        radius: f64,
        crater_radius: f64,
        crater_depth: f64,
    },
    /// Channel floor below sea level.
    River { depth: f64, ground: f64 },
}

impl HeightFunction {
    /// Height at world column `(x, z)`.
    ///
    /// `border` is the biome's normalized blend weight at the column (1 deep
    /// inside the biome) and `river` the carving magnitude in `[0, 1]`.
    pub fn height(&self, noise: &TerrainNoise, x: f64, z: f64, border: f64, river: f64) -> f64 {
        use recipes as r;
        match self {
            Self::Plains {
                base,
                ground,
                hills,
            } => r::plains(noise, x, z, river, *base, *ground, *hills),
            Self::Highland {
                base,
                ground,
                hills,
                ridge,
            } => r::highland(noise, x, z, border, river, *base, *ground, *hills, *ridge),
            Self::Mesa {
                base,
                ground,
                plateau,
                threshold,
                step,
            } => r::mesa(
                noise, x, z, border, river, *base, *ground, *plateau, *threshold, *step,
            ),
            Self::Plateau {
                base,
                ground,
                bands,
            } => r::plateau(noise, x, z, border, river, *base, *ground, bands),
            Self::Ocean { depth, ground } => r::ocean(noise, x, z, border, *depth, *ground),
            Self::Marsh { ground } => r::marsh(noise, x, z, river, *ground),
            Self::Beach { ground } => r::beach(noise, x, z, *ground),
            Self::GrasslandFlats { ground } => r::grassland_flats(noise, x, z, river, *ground),
            Self::GrasslandHills { ground, hills } => {
                r::grassland_hills(noise, x, z, river, *ground, *hills)
            }
            Self::GrasslandMountains {
                ground,
                hills,
                mountain,
            } => r::grassland_mountains(noise, x, z, border, river, *ground, *hills, *mountain),
            Self::LonelyMountain {
                base,
                ground,
                peak,
                radius,
            } => r::lonely_mountain(noise, x, z, border, river, *base, *ground, *peak, *radius),
            Self::RidgedExtremeHills {
                base,
                ground,
                ridge,
            } => r::ridged_extreme_hills(noise, x, z, border, river, *base, *ground, *ridge),
            Self::Volcano {
                base,
                ground,
                peak,
                radius,
                crater_radius,
                crater_depth,
            } => r::volcano(
                noise,
                x,
                z,
                border,
                *base,
                *ground,
                *peak,
                *radius,
                *crater_radius,
                *crater_depth,
            ),
            Self::River { depth, ground } => r::river(noise, x, z, *depth, *ground),
        }
    }

    /// Short recipe name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plains { .. } => "plains",
            Self::Highland { .. } => "highland",
            Self::Mesa { .. } => "mesa",
            Self::Plateau { .. } => "plateau",
            Self::Ocean { .. } => "ocean",
            Self::Marsh { .. } => "marsh",
            Self::Beach { .. } => "beach",
            Self::GrasslandFlats { .. } => "grassland_flats",
            Self::GrasslandHills { .. } => "grassland_hills",
            Self::GrasslandMountains { .. } => "grassland_mountains",
            Self::LonelyMountain { .. } => "lonely_mountain",
            Self::RidgedExtremeHills { .. } => "ridged_extreme_hills",
            Self::Volcano { .. } => "volcano",
            Self::River { .. } => "river",
        }
    }
}
