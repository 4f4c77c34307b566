//! Seeded noise primitives and combinators for terrain synthesis.
//!
//! Every primitive and combinator implements [`noise::NoiseFn`] for 2D and 3D
//! points, so fields compose recursively into trees such as
//! `Fractal<Scale<Simplex>>`. Construction builds all internal tables from a
//! seed; evaluation is read-only and safe to call concurrently.

mod cellular;
mod permutation;
mod simplex;

pub mod combinator;

pub use cellular::{CellSample, Cellular, CellularReturn};
pub use combinator::{Average, Fractal, Scale, Turbulence};
pub use noise::NoiseFn;
pub use permutation::{PermutationTable, lattice_hash, lattice_unit};
pub use simplex::Simplex;

/// Samples a 2D field and returns `None` for NaN or infinite results.
///
/// Primitives are total over finite input, but deep combinator trees with
/// extreme parameters can still overflow; callers fall back to a default.
#[inline]
pub fn sample_finite<N: NoiseFn<f64, 2> + ?Sized>(field: &N, point: [f64; 2]) -> Option<f64> {
    let value = field.get(point);
    value.is_finite().then_some(value)
}
