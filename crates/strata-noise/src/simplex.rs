//! Gradient noise on a simplex lattice (2D triangles, 3D tetrahedra).

use noise::NoiseFn;

use crate::permutation::PermutationTable;

/// Skew factor for 2D: `(sqrt(3) - 1) / 2`.
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor for 2D: `(3 - sqrt(3)) / 6`.
const G2: f64 = 0.211_324_865_405_187_1;
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

/// Output scale that brings the 2D corner sum to roughly `[-1, 1]`.
const SCALE_2D: f64 = 70.0;
const SCALE_3D: f64 = 32.0;

/// Edge midpoints of a cube; 2D lookups use the first two components.
const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Seeded simplex noise.
///
/// Output is nominally in `[-1, 1]` but not strictly bounded; combinators and
/// height recipes clamp where they need hard limits.
#[derive(Clone, Debug)]
pub struct Simplex {
    seed: u64,
    perm: PermutationTable,
}

impl Simplex {
    /// Builds the permutation table for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            perm: PermutationTable::new(seed),
        }
    }

    /// The seed this instance was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    fn corner2(&self, hash: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = &GRADIENTS[hash % 12];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y)
    }

    #[inline]
    fn corner3(&self, hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let t = 0.6 - x * x - y * y - z * z;
        if t < 0.0 {
            return 0.0;
        }
        let g = &GRADIENTS[hash % 12];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y + g[2] * z)
    }
}

impl NoiseFn<f64, 2> for Simplex {
    fn get(&self, point: [f64; 2]) -> f64 {
        let [x, y] = point;

        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower or upper triangle of the skewed unit square.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let i = i as i64;
        let j = j as i64;
        let n0 = self.corner2(self.perm.hash2(i, j), x0, y0);
        let n1 = self.corner2(self.perm.hash2(i + i1, j + j1), x1, y1);
        let n2 = self.corner2(self.perm.hash2(i + 1, j + 1), x2, y2);

        SCALE_2D * (n0 + n1 + n2)
    }
}

impl NoiseFn<f64, 3> for Simplex {
    fn get(&self, point: [f64; 3]) -> f64 {
        let [x, y, z] = point;

        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Walk order through the six tetrahedra of the skewed cube.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let i = i as i64;
        let j = j as i64;
        let k = k as i64;
        let n0 = self.corner3(self.perm.hash3(i, j, k), x0, y0, z0);
        let n1 = self.corner3(self.perm.hash3(i + i1, j + j1, k + k1), x1, y1, z1);
        let n2 = self.corner3(self.perm.hash3(i + i2, j + j2, k + k2), x2, y2, z2);
        let n3 = self.corner3(self.perm.hash3(i + 1, j + 1, k + 1), x3, y3, z3);

        SCALE_3D * (n0 + n1 + n2 + n3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = Simplex::new(42);
        let b = Simplex::new(42);
        for i in 0..200 {
            let p = [i as f64 * 0.37 - 20.0, i as f64 * -0.11 + 3.0];
            assert_eq!(
                NoiseFn::<f64, 2>::get(&a, p).to_bits(),
                NoiseFn::<f64, 2>::get(&b, p).to_bits(),
                "2D simplex must be bit-identical for identical seeds at {p:?}"
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = Simplex::new(1);
        let b = Simplex::new(2);
        let differs = (0..50).any(|i| {
            let p = [i as f64 * 0.71, i as f64 * 0.29];
            (NoiseFn::<f64, 2>::get(&a, p) - NoiseFn::<f64, 2>::get(&b, p)).abs() > 1e-9
        });
        assert!(differs, "Different seeds should produce different fields");
    }

    #[test]
    fn test_zero_at_lattice_origin() {
        // The origin is a lattice corner: its own offset is zero and the other
        // two corners lie outside the falloff radius.
        let n = Simplex::new(9);
        let v: f64 = n.get([0.0, 0.0]);
        assert!(v.abs() < 1e-12, "Expected zero at the lattice origin, got {v}");
    }

    #[test]
    fn test_output_nominally_bounded() {
        let n = Simplex::new(1234);
        for xi in -100..100 {
            for zi in -20..20 {
                let v2: f64 = n.get([xi as f64 * 0.173, zi as f64 * 0.291]);
                let v3: f64 = n.get([xi as f64 * 0.173, 0.5, zi as f64 * 0.291]);
                assert!(v2.abs() <= 1.1, "2D simplex far out of range: {v2}");
                assert!(v3.abs() <= 1.1, "3D simplex far out of range: {v3}");
            }
        }
    }

    #[test]
    fn test_continuity() {
        let n = Simplex::new(77);
        let step = 0.001;
        for i in 0..5000 {
            let x = i as f64 * step;
            let a: f64 = n.get([x, 0.3]);
            let b: f64 = n.get([x + step, 0.3]);
            assert!((a - b).abs() < 0.05, "Discontinuity at x={x}: {a} -> {b}");
        }
    }

    #[test]
    fn test_negative_coordinates_finite() {
        let n = Simplex::new(5);
        let v: f64 = n.get([-1.0e6, -2.5e5]);
        let w: f64 = n.get([-1.0e6, 3.0, -2.5e5]);
        assert!(v.is_finite() && w.is_finite());
    }
}
