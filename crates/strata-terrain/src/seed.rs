//! Deterministic seeded generation utilities.
//!
//! Every noise field and RNG stream in the generator derives its seed from the
//! world seed plus a fixed salt, so adding a field never shifts another one.
//! Power and root functions go through `libm` so results do not depend on the
//! platform libc. Seed mixing is SplitMix64 rather than the std hasher, whose
//! output may change between toolchains.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strata_voxel::{ChunkData, ChunkPos};

/// Salts for every seeded component. Values are arbitrary but frozen.
pub mod salt {
    pub const TEMPERATURE: u64 = 0x7465_6d70;
    pub const RAINFALL: u64 = 0x7261_696e;
    pub const SELECTOR: u64 = 0x7365_6c65;
    pub const SELECTOR_BROAD: u64 = 0x7365_6c62;
    pub const GROUND: u64 = 0x6772_6e64;
    pub const HILLS: u64 = 0x6869_6c6c;
    pub const RIDGE: u64 = 0x7269_6467;
    pub const PLATEAU: u64 = 0x706c_6174;
    pub const MESA: u64 = 0x6d65_7361;
    pub const PEAKS: u64 = 0x7065_616b;
    pub const RIVER: u64 = 0x7269_7672;
    pub const RIVER_BEND_LARGE: u64 = 0x626e_644c;
    pub const RIVER_BEND_SMALL: u64 = 0x626e_6453;
    pub const RIVER_SEPARATION: u64 = 0x7365_7061;
    pub const LAKE: u64 = 0x6c61_6b65;
    pub const FOLIAGE: u64 = 0x666f_6c69;
    pub const TREES: u64 = 0x7472_6565;
    pub const SNOW: u64 = 0x736e_6f77;
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive the seed of one generator component from the world seed.
pub fn derive_seed(world_seed: u64, salt: u64) -> u64 {
    splitmix64(world_seed ^ splitmix64(salt))
}

/// Derive a u64 seed for a chunk from a (salted) world seed and chunk position.
pub fn derive_chunk_seed(world_seed: u64, pos: ChunkPos) -> u64 {
    let h = splitmix64(world_seed ^ (pos.x as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
    splitmix64(h ^ (pos.z as i64 as u64).wrapping_mul(0x1656_67B1_9E37_79F9))
}

/// SplitMix64 finalizer. Fixed arithmetic, identical on every platform.
#[inline]
pub fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stable hash of a byte string.
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    bytes
        .chunks(8)
        .fold(splitmix64(bytes.len() as u64), |h, chunk| {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            splitmix64(h ^ u64::from_le_bytes(word))
        })
}

/// Deterministic RNG for a specific chunk.
///
/// Produces the same sequence for the same `(world_seed, pos)` pair regardless
/// of thread or of what was generated before.
pub fn chunk_rng(world_seed: u64, pos: ChunkPos) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_chunk_seed(world_seed, pos))
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic power using libm.
#[inline]
pub fn det_pow(x: f64, y: f64) -> f64 {
    libm::pow(x, y)
}

/// Deterministic sqrt using libm.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Hash the contents of a `ChunkData` for determinism comparison.
///
/// Covers the position, every column record, and every block.
pub fn hash_chunk_data(chunk: &ChunkData) -> u64 {
    let mut h = derive_chunk_seed(0, chunk.pos);
    for column in &chunk.columns {
        let packed = ((column.biome_id as u64) << 16) | column.surface_height as u16 as u64;
        h = splitmix64(h ^ packed);
    }
    for block in chunk.blocks.as_slice() {
        h = splitmix64(h ^ block.0 as u64);
    }
    h
}
