//! Error and warning types for context construction and chunk generation.

use strata_config::ConfigError;

/// Reasons a biome catalog is rejected at registry construction.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    #[error("biome catalog is empty")]
    EmptyCatalog,

    #[error("duplicate biome id: {0}")]
    DuplicateId(u8),

    #[error("duplicate biome name: {0}")]
    DuplicateName(String),

    /// A river or beach variant names an id that is not in the catalog.
    #[error("biome `{biome}` references unknown {role} variant id {variant}")]
    DanglingVariant {
        biome: String,
        role: &'static str,
        variant: u8,
    },

    #[error("biome `{0}` has a negative or non-finite weight")]
    InvalidWeight(String),

    /// Primary selection needs at least one non-edge biome with positive weight.
    #[error("no non-edge biome has a positive weight")]
    NoSelectableBiome,

    #[error("biome `{name}` has an invalid height band {min}..{max}")]
    InvalidHeightBand { name: String, min: f64, max: f64 },
}

/// Fatal failure while building a [`WorldGenContext`](crate::WorldGenContext).
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] BiomeRegistryError),
}

/// Failure of a single chunk generation call. Never affects other chunks;
/// the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Some column of the chunk lies outside the `i32` world range.
    #[error("chunk ({chunk_x}, {chunk_z}) is outside the world coordinate range")]
    CoordinateOutOfRange { chunk_x: i32, chunk_z: i32 },

    #[error("failed to build generation context: {0}")]
    Context(#[from] ContextError),
}

/// Recoverable numerical problem, reported alongside the finished chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// A blended height was NaN or infinite; the column was set to sea level.
    NonFiniteHeight,
    /// A climate or selector sample was NaN or infinite; selection fell back to the first non-edge biome.
    NonFiniteClimate,
    /// The total selection weight was not positive; selection fell back to the first non-edge biome.
    DegenerateSelection,
    /// The weighted walk ended without reaching the target; selection fell back to the first non-edge biome.
    SelectorExhausted,
    /// No kernel sample had weight for the column; the nearest sample's biome was used.
    EmptyBlend,
    /// The river field was NaN or infinite; the column was treated as dry land.
    NonFiniteRiver,
}

/// One recoverable warning. Coordinates are chunk-local and may lie outside
/// `0..CHUNK_SIDE` for blend kernel samples taken in the padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationWarning {
    pub local_x: i32,
    pub local_z: i32,
    pub kind: WarningKind,
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} at local ({}, {})", self.kind, self.local_x, self.local_z)
    }
}
