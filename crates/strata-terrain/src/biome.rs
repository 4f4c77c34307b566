//! Biome system: descriptors, registry, standard catalog, climate resolution,
//! and the blend kernel that smooths biome borders.

mod blend;
mod catalog;
mod def;
mod registry;
mod resolver;

pub use blend::{
    BlendKernel, ColumnBlend, FALLOFF_EXPONENT, FALLOFF_LIMIT, KERNEL_PADDING, SAMPLE_COUNT,
    SAMPLE_SPACING, SAMPLES_PER_AXIS,
};
pub use catalog::{ids, standard_catalog};
pub use def::{BiomeDescriptor, BiomeId, SurfaceRule, Vegetation};
pub use registry::{BiomeRegistry, RegistryStats};
pub use resolver::{ClimateResolver, ClimateSample, Selection, select_biome};
