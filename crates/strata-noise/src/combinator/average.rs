//! Arithmetic mean of two fields.

use noise::NoiseFn;

/// `(a + b) / 2`. Used to smooth selector fields by blending a detailed
/// field with a broad one.
#[derive(Clone, Debug)]
pub struct Average<A, B> {
    a: A,
    b: B,
}

impl<A, B> Average<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: NoiseFn<f64, 2>, B: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Average<A, B> {
    #[inline]
    fn get(&self, point: [f64; 2]) -> f64 {
        (self.a.get(point) + self.b.get(point)) * 0.5
    }
}

impl<A: NoiseFn<f64, 3>, B: NoiseFn<f64, 3>> NoiseFn<f64, 3> for Average<A, B> {
    #[inline]
    fn get(&self, point: [f64; 3]) -> f64 {
        (self.a.get(point) + self.b.get(point)) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scale, Simplex};

    #[test]
    fn test_average_of_same_field_is_identity() {
        let avg = Average::new(Simplex::new(3), Simplex::new(3));
        let single = Simplex::new(3);
        let p = [1.25, 9.5];
        let a: f64 = avg.get(p);
        let b: f64 = single.get(p);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_average_lies_between_inputs() {
        let a = Simplex::new(1);
        let b = Scale::uniform(Simplex::new(2), 0.1);
        let avg = Average::new(Simplex::new(1), Scale::uniform(Simplex::new(2), 0.1));
        for i in 0..100 {
            let p = [i as f64 * 0.4, i as f64 * 0.9];
            let va: f64 = a.get(p);
            let vb: f64 = b.get(p);
            let v: f64 = avg.get(p);
            assert!(v >= va.min(vb) - 1e-12 && v <= va.max(vb) + 1e-12);
        }
    }
}
