//! Biome registry: owns the descriptors, the id→index table used for
//! height-function dispatch, and global diagnostics.

use hashbrown::HashMap;

use super::def::{BiomeDescriptor, BiomeId, SurfaceRule};
use crate::error::BiomeRegistryError;
use crate::seed::hash_bytes;

/// Climate and height extremes across the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegistryStats {
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_rainfall: f64,
    pub max_rainfall: f64,
    pub min_height: f64,
    pub max_height: f64,
}

/// Read-only after construction; share it by reference across workers.
pub struct BiomeRegistry {
    biomes: Vec<BiomeDescriptor>,
    /// `by_id[id] = catalog index`.
    by_id: [Option<u16>; 256],
    name_to_id: HashMap<String, BiomeId>,
    /// Catalog indices of non-edge biomes, in catalog order.
    primary: Vec<usize>,
    stats: RegistryStats,
}

impl BiomeRegistry {
    /// Validates the catalog and fills in missing surfaces and colours.
    ///
    /// # Errors
    ///
    /// Any [`BiomeRegistryError`]; a rejected catalog never yields a registry.
    pub fn new(mut biomes: Vec<BiomeDescriptor>) -> Result<Self, BiomeRegistryError> {
        if biomes.is_empty() {
            return Err(BiomeRegistryError::EmptyCatalog);
        }

        let mut by_id = [None; 256];
        let mut name_to_id = HashMap::with_capacity(biomes.len());
        for (index, biome) in biomes.iter().enumerate() {
            let slot = &mut by_id[biome.id.0 as usize];
            if slot.is_some() {
                return Err(BiomeRegistryError::DuplicateId(biome.id.0));
            }
            *slot = Some(index as u16);
            if name_to_id.insert(biome.name.clone(), biome.id).is_some() {
                return Err(BiomeRegistryError::DuplicateName(biome.name.clone()));
            }
        }

        for biome in &biomes {
            if !biome.weight.is_finite() || biome.weight < 0.0 {
                return Err(BiomeRegistryError::InvalidWeight(biome.name.clone()));
            }
            if !(biome.min_height.is_finite()
                && biome.max_height.is_finite()
                && biome.min_height <= biome.max_height)
            {
                return Err(BiomeRegistryError::InvalidHeightBand {
                    name: biome.name.clone(),
                    min: biome.min_height,
                    max: biome.max_height,
                });
            }
            let variants = [("river", Some(biome.river_variant)), ("beach", biome.beach_variant)];
            for (role, variant) in variants {
                if let Some(variant) = variant
                    && by_id[variant.0 as usize].is_none()
                {
                    return Err(BiomeRegistryError::DanglingVariant {
                        biome: biome.name.clone(),
                        role,
                        variant: variant.0,
                    });
                }
            }
        }

        let primary: Vec<usize> = biomes
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.edge)
            .map(|(i, _)| i)
            .collect();
        let primary_weight: f64 = primary.iter().map(|&i| biomes[i].weight).sum();
        if primary_weight <= 0.0 {
            return Err(BiomeRegistryError::NoSelectableBiome);
        }

        for biome in &mut biomes {
            if biome.surface.is_none() {
                biome.surface = Some(default_surface(biome));
            }
            if biome.color.is_none() {
                biome.color = Some(color_from_name(&biome.name));
            }
        }

        let stats = compute_stats(&biomes);
        tracing::debug!(
            "Biome registry built: {} biomes ({} selectable), temperature {:.2}..{:.2}, height {}..{}",
            biomes.len(),
            primary.len(),
            stats.min_temperature,
            stats.max_temperature,
            stats.min_height,
            stats.max_height
        );

        Ok(Self {
            biomes,
            by_id,
            name_to_id,
            primary,
            stats,
        })
    }

    pub fn get(&self, id: BiomeId) -> Option<&BiomeDescriptor> {
        self.index_of(id).map(|i| &self.biomes[i])
    }

    /// Catalog index of `id`.
    #[inline]
    pub fn index_of(&self, id: BiomeId) -> Option<usize> {
        self.by_id[id.0 as usize].map(usize::from)
    }

    /// Descriptor at catalog position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn by_index(&self, index: usize) -> &BiomeDescriptor {
        &self.biomes[index]
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Catalog indices eligible for primary selection, in catalog order.
    pub fn primary(&self) -> &[usize] {
        &self.primary
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiomeDescriptor> {
        self.biomes.iter()
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

/// Snow for cold biomes, sand for hot dry ones, grass otherwise.
fn default_surface(biome: &BiomeDescriptor) -> SurfaceRule {
    if biome.temperature < 0.2 {
        SurfaceRule::SNOW
    } else if biome.temperature > 0.75 && biome.rainfall < 0.25 {
        SurfaceRule::SAND
    } else {
        SurfaceRule::GRASS
    }
}

/// Deterministic colour from the biome name, kept away from black and white.
fn color_from_name(name: &str) -> [u8; 3] {
    let h = hash_bytes(name.as_bytes());
    let channel = |shift: u32| 48 + ((h >> shift) & 0xFF) as u8 % 160;
    [channel(0), channel(8), channel(16)]
}

fn compute_stats(biomes: &[BiomeDescriptor]) -> RegistryStats {
    let mut stats = RegistryStats {
        min_temperature: f64::INFINITY,
        max_temperature: f64::NEG_INFINITY,
        min_rainfall: f64::INFINITY,
        max_rainfall: f64::NEG_INFINITY,
        min_height: f64::INFINITY,
        max_height: f64::NEG_INFINITY,
    };
    for b in biomes {
        stats.min_temperature = stats.min_temperature.min(b.temperature);
        stats.max_temperature = stats.max_temperature.max(b.temperature);
        stats.min_rainfall = stats.min_rainfall.min(b.rainfall);
        stats.max_rainfall = stats.max_rainfall.max(b.rainfall);
        stats.min_height = stats.min_height.min(b.min_height);
        stats.max_height = stats.max_height.max(b.max_height);
    }
    stats
}
