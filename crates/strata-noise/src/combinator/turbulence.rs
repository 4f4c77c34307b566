//! Domain warping.

use noise::NoiseFn;

use crate::Simplex;
use crate::combinator::Scale;

/// Perturbs the input coordinate with one distortion field per axis before
/// delegating to the wrapped field.
///
/// `get(p) = source(p + power * [dx(p), dy(p), dz(p)])`. The 2D form uses the
/// first two distortion fields only.
#[derive(Clone, Debug)]
pub struct Turbulence<S, D> {
    source: S,
    distortions: [D; 3],
    power: f64,
}

impl<S, D> Turbulence<S, D> {
    pub fn new(source: S, distortions: [D; 3], power: f64) -> Self {
        Self {
            source,
            distortions,
            power,
        }
    }

    /// Maximum displacement in input units (for nominal `[-1, 1]` distortion).
    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Turbulence<S, Scale<Simplex>> {
    /// Distorts with three simplex fields of the given wavelength, seeded
    /// `seed`, `seed + 1` and `seed + 2`.
    pub fn simplex(source: S, seed: u64, wavelength: f64, power: f64) -> Self {
        let field =
            |offset: u64| Scale::wavelength(Simplex::new(seed.wrapping_add(offset)), wavelength);
        Self::new(source, [field(0), field(1), field(2)], power)
    }
}

impl<S, D: NoiseFn<f64, 2>> Turbulence<S, D> {
    /// The displaced 2D point this field forwards to its source.
    #[inline]
    pub fn warp2(&self, point: [f64; 2]) -> [f64; 2] {
        [
            point[0] + self.distortions[0].get(point) * self.power,
            point[1] + self.distortions[1].get(point) * self.power,
        ]
    }
}

impl<S, D: NoiseFn<f64, 3>> Turbulence<S, D> {
    #[inline]
    pub fn warp3(&self, point: [f64; 3]) -> [f64; 3] {
        [
            point[0] + self.distortions[0].get(point) * self.power,
            point[1] + self.distortions[1].get(point) * self.power,
            point[2] + self.distortions[2].get(point) * self.power,
        ]
    }
}

impl<S: NoiseFn<f64, 2>, D: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Turbulence<S, D> {
    #[inline]
    fn get(&self, point: [f64; 2]) -> f64 {
        self.source.get(self.warp2(point))
    }
}

impl<S: NoiseFn<f64, 3>, D: NoiseFn<f64, 3>> NoiseFn<f64, 3> for Turbulence<S, D> {
    #[inline]
    fn get(&self, point: [f64; 3]) -> f64 {
        self.source.get(self.warp3(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_power_is_identity() {
        let plain = Simplex::new(6);
        let warped = Turbulence::simplex(Simplex::new(6), 100, 50.0, 0.0);
        let p = [17.3, -4.2];
        let a: f64 = plain.get(p);
        let b: f64 = warped.get(p);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_displacement_bounded_by_power() {
        let warped = Turbulence::simplex(Simplex::new(0), 7, 80.0, 24.0);
        for i in 0..300 {
            let p = [i as f64 * 3.7, i as f64 * -1.9];
            let w = warped.warp2(p);
            let dx = (w[0] - p[0]).abs();
            let dz = (w[1] - p[1]).abs();
            assert!(dx <= 24.0 * 1.1 && dz <= 24.0 * 1.1, "Displacement too large at {p:?}");
        }
    }

    #[test]
    fn test_warp_feeds_source() {
        let warped = Turbulence::simplex(Simplex::new(12), 5, 40.0, 10.0);
        let p = [55.0, 66.0];
        let expected: f64 = warped.source().get(warped.warp2(p));
        let actual: f64 = warped.get(p);
        assert_eq!(expected.to_bits(), actual.to_bits());
    }

    #[test]
    fn test_3d_warp_moves_all_axes() {
        let warped = Turbulence::simplex(Simplex::new(1), 2, 30.0, 5.0);
        let p = [10.3, 20.7, 30.1];
        let w = warped.warp3(p);
        assert!(w.iter().zip(p.iter()).any(|(a, b)| (a - b).abs() > 1e-9));
    }
}
