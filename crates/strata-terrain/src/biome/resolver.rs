//! Climate sampling and weighted biome selection.
//!
//! Selection is a deterministic weighted walk: the selector field supplies
//! the "randomness", so the same column always resolves to the same biome.

use strata_noise::{Average, Fractal, NoiseFn, Scale, Simplex};

use super::registry::BiomeRegistry;
use crate::error::WarningKind;
use crate::seed::{derive_seed, salt};

/// Absolute climate values at one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateSample {
    pub temperature: f64,
    pub rainfall: f64,
    pub selector: f64,
}

/// Outcome of [`select_biome`]: a catalog index, plus the reason when the
/// index is the fallback (the first non-edge biome).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub fallback: Option<WarningKind>,
}

impl Selection {
    fn hit(index: usize) -> Self {
        Self {
            index,
            fallback: None,
        }
    }

    fn fallback(registry: &BiomeRegistry, kind: WarningKind) -> Self {
        Self {
            index: registry.primary().first().copied().unwrap_or(0),
            fallback: Some(kind),
        }
    }
}

type ClimateField = Fractal<Scale<Simplex>>;
type SelectorField = Average<Fractal<Scale<Simplex>>, Scale<Simplex>>;

/// Temperature, rainfall, and selector fields for one world seed.
pub struct ClimateResolver {
    temperature: ClimateField,
    rainfall: ClimateField,
    selector: SelectorField,
}

impl ClimateResolver {
    /// `biome_size` stretches every climate wavelength.
    pub fn new(world_seed: u64, biome_size: f64) -> Self {
        let field = |salt: u64, wavelength: f64| {
            Scale::wavelength(
                Simplex::new(derive_seed(world_seed, salt)),
                wavelength * biome_size,
            )
        };
        Self {
            temperature: Fractal::new(field(salt::TEMPERATURE, 720.0), 3.0),
            rainfall: Fractal::new(field(salt::RAINFALL, 560.0), 3.0),
            selector: Average::new(
                Fractal::new(field(salt::SELECTOR, 260.0), 2.5),
                field(salt::SELECTOR_BROAD, 900.0),
            ),
        }
    }

    /// `|T|`, `|R|` and `|S|` at world column `(x, z)`.
    pub fn climate(&self, x: f64, z: f64) -> ClimateSample {
        let p = [x, z];
        ClimateSample {
            temperature: self.temperature.get(p).abs(),
            rainfall: self.rainfall.get(p).abs(),
            selector: self.selector.get(p).abs(),
        }
    }

    /// Resolves the primary biome at world column `(x, z)`.
    pub fn resolve(&self, registry: &BiomeRegistry, x: f64, z: f64) -> Selection {
        let c = self.climate(x, z);
        select_biome(registry, c.temperature, c.rainfall, c.selector)
    }
}

/// `weight × (1 + (ΔT² + ΔR²) / 3)` for one biome.
#[inline]
fn climate_weight(weight: f64, dt: f64, dr: f64) -> f64 {
    weight * (1.0 + (dt * dt + dr * dr) / 3.0)
}

/// Weighted walk over the registry's non-edge biomes in catalog order.
///
/// The first biome whose cumulative weight reaches `selector × Σweight` wins.
/// Zero-weight biomes are never chosen. Non-finite inputs, a non-positive sum,
/// or a walk that ends short of the target fall back to the first non-edge
/// biome in catalog order.
pub fn select_biome(
    registry: &BiomeRegistry,
    temperature: f64,
    rainfall: f64,
    selector: f64,
) -> Selection {
    if !(temperature.is_finite() && rainfall.is_finite() && selector.is_finite()) {
        return Selection::fallback(registry, WarningKind::NonFiniteClimate);
    }

    let weight_of = |index: usize| {
        let b = registry.by_index(index);
        climate_weight(b.weight, b.temperature - temperature, b.rainfall - rainfall)
    };

    let sum: f64 = registry.primary().iter().map(|&i| weight_of(i)).sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Selection::fallback(registry, WarningKind::DegenerateSelection);
    }

    let target = selector * sum;
    let mut cursor = 0.0;
    for &index in registry.primary() {
        let weight = weight_of(index);
        if weight <= 0.0 {
            continue;
        }
        cursor += weight;
        if cursor >= target {
            return Selection::hit(index);
        }
    }

    Selection::fallback(registry, WarningKind::SelectorExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeDescriptor, BiomeId, standard_catalog};
    use crate::height::HeightFunction;

    fn registry(weights: &[f64]) -> BiomeRegistry {
        let catalog = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                BiomeDescriptor::new(
                    BiomeId(i as u8),
                    &format!("b{i}"),
                    HeightFunction::GrasslandFlats { ground: 1.0 },
                )
                .with_weight(w)
                .with_climate(i as f64 * 0.1, 0.5)
            })
            .collect();
        BiomeRegistry::new(catalog).unwrap()
    }

    #[test]
    fn test_selector_zero_picks_first_nonzero_weight() {
        let reg = registry(&[0.0, 0.0, 2.0, 1.0, 0.0]);
        let s = select_biome(&reg, 0.3, 0.4, 0.0);
        assert_eq!(s, Selection::hit(2), "selector 0 must pick the first weighted biome");
    }

    #[test]
    fn test_selector_one_picks_last_nonzero_weight() {
        let reg = registry(&[1.0, 3.0, 2.0, 0.0]);
        for (t, r) in [(0.0, 0.0), (0.77, 0.13), (1.0, 1.0)] {
            let s = select_biome(&reg, t, r, 1.0);
            assert_eq!(s, Selection::hit(2), "selector 1 must reach the last weighted biome");
        }
    }

    #[test]
    fn test_edge_biomes_never_selected() {
        let catalog = vec![
            BiomeDescriptor::new(BiomeId(0), "edge", HeightFunction::Beach { ground: 1.0 })
                .as_edge()
                .with_weight(50.0),
            BiomeDescriptor::new(BiomeId(1), "land", HeightFunction::Marsh { ground: 1.0 }),
        ];
        let reg = BiomeRegistry::new(catalog).unwrap();
        for i in 0..=10 {
            let s = select_biome(&reg, 0.5, 0.5, i as f64 / 10.0);
            assert_eq!(s.index, 1);
        }
    }

    #[test]
    fn test_fallback_skips_leading_edge_biome() {
        let catalog = vec![
            BiomeDescriptor::new(BiomeId(0), "shore", HeightFunction::Beach { ground: 1.0 }).as_edge(),
            BiomeDescriptor::new(BiomeId(1), "land", HeightFunction::Marsh { ground: 1.0 }),
        ];
        let reg = BiomeRegistry::new(catalog).unwrap();
        for s in [
            select_biome(&reg, f64::NAN, 0.5, 0.5),
            select_biome(&reg, 0.5, 0.5, 1.5),
            select_biome(&reg, f64::MAX, 0.5, 0.5),
        ] {
            assert!(s.fallback.is_some());
            assert_eq!(s.index, 1, "Fallback must not resolve to an edge biome");
        }
    }

    #[test]
    fn test_selector_partitions_by_weight() {
        // Equal climate: weights scale uniformly, so the split point is 1/3.
        let reg = registry(&[1.0, 2.0]);
        let b0 = reg.by_index(0);
        let b1 = reg.by_index(1);
        let w0 = climate_weight(b0.weight, b0.temperature - 0.05, b0.rainfall - 0.5);
        let w1 = climate_weight(b1.weight, b1.temperature - 0.05, b1.rainfall - 0.5);
        let split = w0 / (w0 + w1);
        assert_eq!(select_biome(&reg, 0.05, 0.5, split * 0.99).index, 0);
        assert_eq!(select_biome(&reg, 0.05, 0.5, split * 1.01 + 1e-9).index, 1);
    }

    #[test]
    fn test_non_finite_and_overflowing_selector_fall_back() {
        let reg = registry(&[1.0, 1.0]);
        assert_eq!(
            select_biome(&reg, f64::NAN, 0.5, 0.5),
            Selection::fallback(&reg, WarningKind::NonFiniteClimate)
        );
        assert_eq!(
            select_biome(&reg, 0.5, 0.5, 1.5),
            Selection::fallback(&reg, WarningKind::SelectorExhausted)
        );
        assert_eq!(
            select_biome(&reg, f64::MAX, 0.5, 0.5),
            Selection::fallback(&reg, WarningKind::DegenerateSelection)
        );
    }

    #[test]
    fn test_resolver_is_deterministic() {
        let reg = BiomeRegistry::new(standard_catalog(64.0)).unwrap();
        let a = ClimateResolver::new(356_556_635, 1.0);
        let b = ClimateResolver::new(356_556_635, 1.0);
        for i in 0..200 {
            let x = i as f64 * 97.0 - 9000.0;
            let z = i as f64 * -53.0 + 1200.0;
            assert_eq!(a.climate(x, z), b.climate(x, z));
            assert_eq!(a.resolve(&reg, x, z), b.resolve(&reg, x, z));
        }
    }

    #[test]
    fn test_climate_values_are_absolute() {
        let resolver = ClimateResolver::new(8, 1.0);
        for i in 0..500 {
            let c = resolver.climate(i as f64 * 41.0, i as f64 * 17.0);
            assert!(c.temperature >= 0.0 && c.rainfall >= 0.0 && c.selector >= 0.0);
        }
    }

    #[test]
    fn test_standard_world_selects_several_biomes() {
        let reg = BiomeRegistry::new(standard_catalog(64.0)).unwrap();
        let resolver = ClimateResolver::new(356_556_635, 1.0);
        let mut seen = std::collections::BTreeSet::new();
        for i in 0..60 {
            for j in 0..60 {
                let s = resolver.resolve(&reg, i as f64 * 160.0, j as f64 * 160.0);
                seen.insert(s.index);
            }
        }
        assert!(seen.len() >= 5, "Only {} biomes over a 9.6 km square", seen.len());
    }
}
