//! Biome blend kernel.
//!
//! Biomes are resolved on a coarse grid of sample points covering the chunk
//! plus `KERNEL_PADDING` blocks on every side. Each column mixes the biomes of
//! nearby samples with a fixed falloff weight, precomputed once.

use strata_voxel::{CHUNK_AREA, CHUNK_SIDE};

use crate::seed::{det_pow, det_sqrt};

/// Distance between sample points, in blocks.
pub const SAMPLE_SPACING: i32 = 8;
/// Kernel reach beyond each chunk edge: half a chunk.
pub const KERNEL_PADDING: i32 = (CHUNK_SIDE / 2) as i32;
pub const SAMPLES_PER_AXIS: usize =
    (CHUNK_SIDE + 2 * KERNEL_PADDING as usize) / SAMPLE_SPACING as usize + 1;
pub const SAMPLE_COUNT: usize = SAMPLES_PER_AXIS * SAMPLES_PER_AXIS;
/// `weight = max(0, 1 − distance^FALLOFF_EXPONENT / FALLOFF_LIMIT)`.
pub const FALLOFF_LIMIT: f64 = 60.0;
pub const FALLOFF_EXPONENT: f64 = 1.4;

/// Normalized biome weights for one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnBlend {
    /// `(catalog index, weight)` sorted by catalog index; weights sum to 1.
    entries: Vec<(usize, f64)>,
    dominant: usize,
}

impl ColumnBlend {
    /// A column owned entirely by one biome.
    pub fn single(index: usize) -> Self {
        Self {
            entries: vec![(index, 1.0)],
            dominant: index,
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Catalog index with the largest weight; ties go to the lower index.
    pub fn dominant(&self) -> usize {
        self.dominant
    }

    pub fn weight_of(&self, index: usize) -> f64 {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map_or(0.0, |(_, w)| *w)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Precomputed `column × sample` falloff weights.
pub struct BlendKernel {
    offsets: [(i32, i32); SAMPLE_COUNT],
    weights: Vec<f64>,
}

impl BlendKernel {
    pub fn new() -> Self {
        let mut offsets = [(0, 0); SAMPLE_COUNT];
        for sz in 0..SAMPLES_PER_AXIS {
            for sx in 0..SAMPLES_PER_AXIS {
                offsets[sz * SAMPLES_PER_AXIS + sx] = (
                    sx as i32 * SAMPLE_SPACING - KERNEL_PADDING,
                    sz as i32 * SAMPLE_SPACING - KERNEL_PADDING,
                );
            }
        }

        let mut weights = vec![0.0; CHUNK_AREA * SAMPLE_COUNT];
        for z in 0..CHUNK_SIDE {
            for x in 0..CHUNK_SIDE {
                let column = z * CHUNK_SIDE + x;
                for (sample, &(ox, oz)) in offsets.iter().enumerate() {
                    let dx = (x as i32 - ox) as f64;
                    let dz = (z as i32 - oz) as f64;
                    let distance = det_sqrt(dx * dx + dz * dz);
                    weights[column * SAMPLE_COUNT + sample] =
                        (1.0 - det_pow(distance, FALLOFF_EXPONENT) / FALLOFF_LIMIT).max(0.0);
                }
            }
        }

        Self { offsets, weights }
    }

    /// Chunk-local `(x, z)` offsets of the sample points.
    pub fn sample_offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    #[inline]
    pub fn weight(&self, column: usize, sample: usize) -> f64 {
        self.weights[column * SAMPLE_COUNT + sample]
    }

    /// Mixes the per-sample biomes (catalog indices) into normalized column weights.
    ///
    /// Returns `None` when no sample reaches the column.
    pub fn blend(&self, column: usize, sample_biomes: &[usize]) -> Option<ColumnBlend> {
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(4);
        let mut total = 0.0;
        for (sample, &biome) in sample_biomes.iter().enumerate().take(SAMPLE_COUNT) {
            let w = self.weight(column, sample);
            if w <= 0.0 {
                continue;
            }
            total += w;
            match entries.iter_mut().find(|(i, _)| *i == biome) {
                Some(entry) => entry.1 += w,
                None => entries.push((biome, w)),
            }
        }
        if total <= 0.0 {
            return None;
        }

        entries.sort_by_key(|(i, _)| *i);
        for entry in &mut entries {
            entry.1 /= total;
        }
        // Strict comparison over ascending indices keeps the lowest index on ties.
        let dominant = entries
            .iter()
            .fold(entries[0], |best, &entry| if entry.1 > best.1 { entry } else { best });

        Some(ColumnBlend {
            entries,
            dominant: dominant.0,
        })
    }

    /// Index of the sample nearest to `column`.
    pub fn nearest_sample(&self, column: usize) -> usize {
        let mut best = 0;
        for sample in 1..SAMPLE_COUNT {
            if self.weight(column, sample) > self.weight(column, best) {
                best = sample;
            }
        }
        best
    }
}

impl Default for BlendKernel {
    fn default() -> Self {
        Self::new()
    }
}
