//! Seeded permutation table and integer lattice hashing.
//!
//! The permutation table drives gradient selection in [`Simplex`](crate::Simplex);
//! the lattice hash drives per-cell feature points and values in
//! [`Cellular`](crate::Cellular). Both are pure functions of the seed.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Number of distinct entries in a permutation table.
pub const TABLE_SIZE: usize = 256;

/// A shuffled `0..256` permutation, stored twice so that `p[i + p[j]]` never
/// needs a wrap for `i, j < 256`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    values: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    /// Builds the table with a Fisher-Yates shuffle driven by a ChaCha8 stream.
    ///
    /// ChaCha8 output is specified bit-for-bit, so the same seed produces the
    /// same table on every platform.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut base: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        base.shuffle(&mut rng);

        let mut values = [0u8; TABLE_SIZE * 2];
        values[..TABLE_SIZE].copy_from_slice(&base);
        values[TABLE_SIZE..].copy_from_slice(&base);
        Self { values }
    }

    /// Raw table lookup. `index` must be below 512.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.values[index] as usize
    }

    /// Hashes a 2D lattice corner into `0..256`.
    #[inline]
    pub fn hash2(&self, x: i64, y: i64) -> usize {
        let xi = (x & 255) as usize;
        let yi = (y & 255) as usize;
        self.get(xi + self.get(yi))
    }

    /// Hashes a 3D lattice corner into `0..256`.
    #[inline]
    pub fn hash3(&self, x: i64, y: i64, z: i64) -> usize {
        let xi = (x & 255) as usize;
        let yi = (y & 255) as usize;
        let zi = (z & 255) as usize;
        self.get(xi + self.get(yi + self.get(zi)))
    }
}

/// Mixes a seed, up to three lattice coordinates and a channel into 64 well
/// distributed bits (SplitMix64 finalizer applied per input word).
///
/// Unlike the permutation table this hash has no 256-cell period, which
/// matters for cellular fields whose cells are hundreds of blocks wide.
#[inline]
pub fn lattice_hash(seed: u64, coords: [i64; 3], channel: u64) -> u64 {
    let mut h = seed ^ channel.wrapping_mul(0xD6E8_FEB8_6659_FD93);
    for c in coords {
        h = splitmix(h ^ (c as u64));
    }
    splitmix(h)
}

/// [`lattice_hash`] mapped to `[0, 1)` using the top 53 bits.
#[inline]
pub fn lattice_unit(seed: u64, coords: [i64; 3], channel: u64) -> f64 {
    (lattice_hash(seed, coords, channel) >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

#[inline]
fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
