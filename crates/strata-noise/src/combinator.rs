//! Noise combinators: wrappers that transform or compose other fields.
//!
//! Each combinator is itself a [`NoiseFn`](noise::NoiseFn), so trees such as
//! `Turbulence<Fractal<Scale<Simplex>>, Scale<Simplex>>` evaluate through a
//! single `get` call. Sub-fields are owned and never mutated after
//! construction.

mod average;
mod fractal;
mod scale;
mod turbulence;

pub use average::Average;
pub use fractal::Fractal;
pub use scale::Scale;
pub use turbulence::Turbulence;
