//! Per-axis domain scaling.

use noise::NoiseFn;

/// Multiplies each input axis by its own factor before delegating.
#[derive(Clone, Debug)]
pub struct Scale<S> {
    source: S,
    /// Factor applied to the first axis.
    pub x: f64,
    /// Factor applied to the second axis.
    pub y: f64,
    /// Factor applied to the third axis (3D only).
    pub z: f64,
}

impl<S> Scale<S> {
    pub fn new(source: S, x: f64, y: f64, z: f64) -> Self {
        Self { source, x, y, z }
    }

    /// Same factor on every axis.
    pub fn uniform(source: S, factor: f64) -> Self {
        Self::new(source, factor, factor, factor)
    }

    /// Scales so that one unit of the source spans `wavelength` world units.
    pub fn wavelength(source: S, wavelength: f64) -> Self {
        Self::uniform(source, 1.0 / wavelength)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Scale<S> {
    #[inline]
    fn get(&self, point: [f64; 2]) -> f64 {
        self.source.get([point[0] * self.x, point[1] * self.y])
    }
}

impl<S: NoiseFn<f64, 3>> NoiseFn<f64, 3> for Scale<S> {
    #[inline]
    fn get(&self, point: [f64; 3]) -> f64 {
        self.source
            .get([point[0] * self.x, point[1] * self.y, point[2] * self.z])
    }
}
