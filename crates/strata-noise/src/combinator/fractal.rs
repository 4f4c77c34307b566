//! Multi-octave fractal summation.

use noise::NoiseFn;

/// Shift applied per octave so octaves do not share a lattice origin.
const OCTAVE_SHIFT: f64 = 31.337;

/// Sums the wrapped field at increasing frequency.
///
/// Octave `i` is sampled at `lacunarity^i` times the base frequency with weight
/// `(gain^i)^spectral_exponent`. A fractional octave count adds one last octave
/// at the fractional part of its weight. With normalization on (the default)
/// the sum is divided by the total weight, keeping output in the source's
/// nominal range.
#[derive(Clone, Debug)]
pub struct Fractal<S> {
    source: S,
    octaves: f64,
    lacunarity: f64,
    gain: f64,
    spectral_exponent: f64,
    normalize: bool,
    weights: Vec<f64>,
    total_weight: f64,
}

impl<S> Fractal<S> {
    /// Lacunarity 2, gain 0.5, spectral exponent 1, normalized.
    ///
    /// `octaves` below 1 is raised to 1.
    pub fn new(source: S, octaves: f64) -> Self {
        let mut fractal = Self {
            source,
            octaves: octaves.max(1.0),
            lacunarity: 2.0,
            gain: 0.5,
            spectral_exponent: 1.0,
            normalize: true,
            weights: Vec::new(),
            total_weight: 0.0,
        };
        fractal.rebuild_weights();
        fractal
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self.rebuild_weights();
        self
    }

    /// Raises every octave weight to `exponent`; values above 1 darken the
    /// high-frequency end of the spectrum.
    pub fn with_spectral_exponent(mut self, exponent: f64) -> Self {
        self.spectral_exponent = exponent;
        self.rebuild_weights();
        self
    }

    /// Return the raw weighted sum instead of dividing by the total weight.
    pub fn unnormalized(mut self) -> Self {
        self.normalize = false;
        self
    }

    /// Per-octave weights, including the fractional final octave if any.
    pub fn octave_weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all octave weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn octaves(&self) -> f64 {
        self.octaves
    }

    fn rebuild_weights(&mut self) {
        let full = self.octaves.floor() as usize;
        let fraction = self.octaves - full as f64;

        self.weights.clear();
        for octave in 0..full {
            self.weights.push(self.octave_weight(octave));
        }
        if fraction > 0.0 {
            self.weights.push(self.octave_weight(full) * fraction);
        }
        self.total_weight = self.weights.iter().sum();
    }

    fn octave_weight(&self, octave: usize) -> f64 {
        self.gain.powi(octave as i32).powf(self.spectral_exponent)
    }

    #[inline]
    fn finish(&self, sum: f64) -> f64 {
        if self.normalize && self.total_weight > 0.0 {
            sum / self.total_weight
        } else {
            sum
        }
    }
}

impl<S: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Fractal<S> {
    fn get(&self, point: [f64; 2]) -> f64 {
        let mut frequency = 1.0;
        let mut sum = 0.0;
        for (octave, weight) in self.weights.iter().enumerate() {
            let shift = octave as f64 * OCTAVE_SHIFT;
            let p = [point[0] * frequency + shift, point[1] * frequency + shift];
            sum += self.source.get(p) * weight;
            frequency *= self.lacunarity;
        }
        self.finish(sum)
    }
}

impl<S: NoiseFn<f64, 3>> NoiseFn<f64, 3> for Fractal<S> {
    fn get(&self, point: [f64; 3]) -> f64 {
        let mut frequency = 1.0;
        let mut sum = 0.0;
        for (octave, weight) in self.weights.iter().enumerate() {
            let shift = octave as f64 * OCTAVE_SHIFT;
            let p = [
                point[0] * frequency + shift,
                point[1] * frequency + shift,
                point[2] * frequency + shift,
            ];
            sum += self.source.get(p) * weight;
            frequency *= self.lacunarity;
        }
        self.finish(sum)
    }
}
