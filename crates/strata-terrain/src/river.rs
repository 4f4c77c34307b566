//! River and lake carving field.
//!
//! Rivers follow the borders of a domain-warped cellular field: the interior
//! value is zero on cell borders, so thresholding it low yields long winding
//! channels. Lakes are round basins around a random subset of feature points of
//! a second, coarser cellular field.

use strata_config::GeneratorPreset;
use strata_noise::{Cellular, CellularReturn, NoiseFn, Scale, Simplex, Turbulence};

use crate::height::bayesian;
use crate::seed::{derive_seed, salt};

/// Multiplier of the Bayesian remap applied to the interior value.
pub const RIVER_REMAP: f64 = 0.5;
/// Remapped interior value below which a column is river, at `river_size = 1`.
pub const VALLEY_LEVEL: f64 = 0.04;
/// Carving magnitude from which a column is substituted by the river variant.
pub const RIVER_THRESHOLD: f64 = 0.35;

const LARGE_BEND_WAVELENGTH: f64 = 240.0;
const SMALL_BEND_WAVELENGTH: f64 = 80.0;
const LARGE_BEND_POWER: f64 = 52.0;
const SMALL_BEND_POWER: f64 = 14.0;
const SEPARATION_BASE: f64 = 380.0;
const SEPARATION_SPREAD: u64 = 80;

const LAKE_SPACING: f64 = 700.0;
const LAKE_CHANCE: f64 = 0.3;
const LAKE_RADIUS: f64 = 0.18;

/// Large bend → small bend → cellular interior value at `1 / separation`.
type RiverNoise = Turbulence<Turbulence<Scale<Cellular>, Scale<Simplex>>, Scale<Simplex>>;

/// Negative carving strength for every world column; 0 means dry land.
pub struct RiverField {
    river: RiverNoise,
    valley_level: f64,
    separation: f64,
    lakes: Cellular,
    lake_frequency: f64,
    lake_chance: f64,
    lake_radius: f64,
}

impl RiverField {
    pub fn new(world_seed: u64, preset: &GeneratorPreset) -> Self {
        let spread = derive_seed(world_seed, salt::RIVER_SEPARATION) % SEPARATION_SPREAD;
        let separation =
            (SEPARATION_BASE + spread as f64) * preset.biome_size / preset.river_frequency;

        let cells = Cellular::new(derive_seed(world_seed, salt::RIVER))
            .with_search_radius(2)
            .with_return_type(CellularReturn::InteriorValue);
        let small = Turbulence::simplex(
            Scale::wavelength(cells, separation),
            derive_seed(world_seed, salt::RIVER_BEND_SMALL),
            SMALL_BEND_WAVELENGTH,
            SMALL_BEND_POWER * preset.biome_size,
        );
        let river = Turbulence::simplex(
            small,
            derive_seed(world_seed, salt::RIVER_BEND_LARGE),
            LARGE_BEND_WAVELENGTH,
            LARGE_BEND_POWER * preset.biome_size,
        );

        Self {
            river,
            valley_level: VALLEY_LEVEL * preset.river_size,
            separation,
            lakes: Cellular::new(derive_seed(world_seed, salt::LAKE)).with_jitter(0.8),
            lake_frequency: 1.0 / (LAKE_SPACING * preset.biome_size),
            lake_chance: LAKE_CHANCE * preset.lake_frequency,
            lake_radius: LAKE_RADIUS * preset.lake_size,
        }
    }

    /// Distance between neighbouring river channels, in world units.
    pub fn separation(&self) -> f64 {
        self.separation
    }

    pub fn valley_level(&self) -> f64 {
        self.valley_level
    }

    /// River strength in `[-1, 0]`.
    pub fn river_strength(&self, x: f64, z: f64) -> f64 {
        strength_from_interior(self.river.get([x, z]), self.valley_level)
    }

    /// Lake strength in `[-1, 0]`; basins follow the large river bends.
    pub fn lake_strength(&self, x: f64, z: f64) -> f64 {
        if self.lake_chance <= 0.0 {
            return 0.0;
        }
        let [wx, wz] = self.river.warp2([x, z]);
        let cell = self
            .lakes
            .sample_cell2([wx * self.lake_frequency, wz * self.lake_frequency]);
        if cell.value >= self.lake_chance || cell.distance >= self.lake_radius {
            return 0.0;
        }
        let t = cell.distance / self.lake_radius;
        -(1.0 - t * t)
    }

    /// Combined carving strength: the deeper of river and lake.
    pub fn strength(&self, x: f64, z: f64) -> f64 {
        self.river_strength(x, z).min(self.lake_strength(x, z))
    }
}

/// Maps a raw cellular interior value to river strength.
///
/// Zero at and above the valley level, falling linearly in the remapped value
/// to −1 on the cell border. NaN input propagates.
pub fn strength_from_interior(interior: f64, valley_level: f64) -> f64 {
    let v = bayesian(interior, RIVER_REMAP);
    if v > valley_level {
        0.0
    } else {
        v / valley_level - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset() -> GeneratorPreset {
        GeneratorPreset::default()
    }

    #[test]
    fn test_strength_monotonic_in_interior_value() {
        let valley = VALLEY_LEVEL;
        let mut previous = strength_from_interior(0.0, valley);
        assert!((previous + 1.0).abs() < 1e-12, "Cell border must carve fully");
        for i in 1..=2000 {
            let interior = i as f64 * 0.0005;
            let s = strength_from_interior(interior, valley);
            assert!(
                s.abs() <= previous.abs(),
                "Carving grew from {previous} to {s} at interior {interior}"
            );
            previous = s;
        }
        assert_eq!(previous, 0.0, "Cell interiors must be dry");
    }

    #[test]
    fn test_strength_range() {
        let field = RiverField::new(356_556_635, &preset());
        for i in 0..400 {
            let x = i as f64 * 23.0 - 4000.0;
            let z = i as f64 * 11.0 + 900.0;
            let s = field.strength(x, z);
            assert!((-1.0..=0.0).contains(&s), "Strength {s} out of range");
        }
    }

    #[test]
    fn test_field_is_deterministic() {
        let a = RiverField::new(77, &preset());
        let b = RiverField::new(77, &preset());
        assert_eq!(a.separation(), b.separation());
        for i in 0..200 {
            let p = (i as f64 * 31.0, i as f64 * -7.0);
            assert_eq!(a.strength(p.0, p.1).to_bits(), b.strength(p.0, p.1).to_bits());
        }
    }

    #[test]
    fn test_rivers_exist_somewhere() {
        let field = RiverField::new(356_556_635, &preset());
        let carved = (0..200)
            .flat_map(|i| (0..200).map(move |j| (i as f64 * 8.0, j as f64 * 8.0)))
            .filter(|&(x, z)| field.river_strength(x, z) < 0.0)
            .count();
        assert!(carved > 0, "No river in a 1.6 km square");
        assert!(carved < 200 * 200 / 2, "Rivers cover {carved} of 40000 samples");
    }

    #[test]
    fn test_lake_frequency_zero_disables_lakes() {
        let mut p = preset();
        p.lake_frequency = 0.0;
        let field = RiverField::new(5, &p);
        for i in 0..500 {
            assert_eq!(field.lake_strength(i as f64 * 29.0, i as f64 * 13.0), 0.0);
        }
    }

    #[test]
    fn test_river_frequency_narrows_separation() {
        let base = RiverField::new(9, &preset());
        let mut p = preset();
        p.river_frequency = 2.0;
        let dense = RiverField::new(9, &p);
        assert!((dense.separation() * 2.0 - base.separation()).abs() < 1e-9);
    }
}
