//! Deterministic terrain synthesis: climate-driven biome resolution, blended
//! height fields, rivers and lakes, column materialization, decoration, and a
//! worker pool that generates chunks in the background.

mod async_generation;
mod context;
mod error;
mod generator;
mod landscape;
mod materialize;
mod river;

pub mod biome;
pub mod decorate;
pub mod height;
pub mod seed;
pub mod structure;

pub use async_generation::{
    AsyncChunkGenerator, GenerationResult, SubmitError, default_thread_count,
};
pub use biome::{BiomeDescriptor, BiomeId, BiomeRegistry, ClimateResolver, standard_catalog};
pub use context::WorldGenContext;
pub use error::{
    BiomeRegistryError, ContextError, GenerationError, GenerationWarning, WarningKind,
};
pub use generator::{ChunkGenerator, GeneratedChunk, generate_chunk};
pub use height::{HeightFunction, TerrainNoise, mountain_cap};
pub use landscape::ChunkLandscape;
pub use materialize::{BEACH_BAND, quantize_height, replace_pass, river_depth};
pub use river::{RIVER_THRESHOLD, RiverField, strength_from_interior};
pub use seed::hash_chunk_data;
pub use structure::{BlockTarget, PlanAction, PlanOutcome, PlanState, StructurePlan};
