//! Immutable world generation context.
//!
//! Everything a chunk generation call reads is built here once, before any
//! generation starts, and never mutated afterwards. Share it behind an `Arc`.

use strata_config::GeneratorPreset;
use strata_voxel::BlockRegistry;

use crate::biome::{BiomeDescriptor, BiomeRegistry, BlendKernel, ClimateResolver, standard_catalog};
use crate::error::ContextError;
use crate::height::TerrainNoise;
use crate::river::RiverField;

pub struct WorldGenContext {
    seed: u64,
    preset: GeneratorPreset,
    registry: BiomeRegistry,
    blocks: BlockRegistry,
    resolver: ClimateResolver,
    kernel: BlendKernel,
    terrain: TerrainNoise,
    rivers: RiverField,
}

impl WorldGenContext {
    /// Builds the context for the standard biome catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if the preset is invalid. Nothing is built in
    /// that case.
    pub fn new(seed: u64, preset: GeneratorPreset) -> Result<Self, ContextError> {
        let catalog = standard_catalog(preset.sea_level as f64);
        Self::with_catalog(seed, preset, catalog)
    }

    /// Builds the context for a custom biome catalog.
    pub fn with_catalog(
        seed: u64,
        preset: GeneratorPreset,
        catalog: Vec<BiomeDescriptor>,
    ) -> Result<Self, ContextError> {
        preset.validate()?;
        let registry = BiomeRegistry::new(catalog)?;
        let sea_level = preset.sea_level as f64;

        let ctx = Self {
            seed,
            resolver: ClimateResolver::new(seed, preset.biome_size),
            kernel: BlendKernel::new(),
            terrain: TerrainNoise::new(seed, sea_level),
            rivers: RiverField::new(seed, &preset),
            blocks: BlockRegistry::standard(),
            registry,
            preset,
        };

        tracing::info!(
            "World generation context ready: seed {}, sea level {}, {} biomes, river separation {:.0}",
            ctx.seed,
            ctx.preset.sea_level,
            ctx.registry.len(),
            ctx.rivers.separation()
        );
        Ok(ctx)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn preset(&self) -> &GeneratorPreset {
        &self.preset
    }

    pub fn sea_level(&self) -> f64 {
        self.preset.sea_level as f64
    }

    pub fn registry(&self) -> &BiomeRegistry {
        &self.registry
    }

    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    pub fn resolver(&self) -> &ClimateResolver {
        &self.resolver
    }

    pub fn kernel(&self) -> &BlendKernel {
        &self.kernel
    }

    pub fn terrain(&self) -> &TerrainNoise {
        &self.terrain
    }

    pub fn rivers(&self) -> &RiverField {
        &self.rivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BiomeRegistryError;
    use strata_config::ConfigError;

    #[test]
    fn test_default_context_builds() {
        let ctx = WorldGenContext::new(356_556_635, GeneratorPreset::default()).unwrap();
        assert_eq!(ctx.seed(), 356_556_635);
        assert_eq!(ctx.sea_level(), 64.0);
        assert_eq!(ctx.registry().len(), 21);
        assert!(!ctx.blocks().is_empty());
    }

    #[test]
    fn test_invalid_preset_is_fatal() {
        let preset = GeneratorPreset {
            biome_size: 0.0,
            ..GeneratorPreset::default()
        };
        let err = WorldGenContext::new(1, preset).err();
        assert!(
            matches!(
                err,
                Some(ContextError::Config(ConfigError::InvalidPreset { field: "biome_size", .. }))
            ),
            "Zero biome size must fail construction, got {err:?}"
        );
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let err = WorldGenContext::with_catalog(1, GeneratorPreset::default(), Vec::new()).err();
        assert!(matches!(
            err,
            Some(ContextError::Registry(BiomeRegistryError::EmptyCatalog))
        ));
    }
}
