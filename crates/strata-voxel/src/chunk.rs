//! Chunk coordinates and the dense block volume of one chunk.
//!
//! Blocks are stored in a flat `Vec<BlockId>` in Y-Z-X order
//! (`index = (y * CHUNK_SIDE + z) * CHUNK_SIDE + x`) so a single layer is
//! contiguous, which is what the replace pass and map previews walk.

use serde::{Deserialize, Serialize};

use crate::block::{BlockId, blocks};

/// Columns along each horizontal axis of a chunk.
pub const CHUNK_SIDE: usize = 16;
/// Columns per chunk.
pub const CHUNK_AREA: usize = CHUNK_SIDE * CHUNK_SIDE;
/// Vertical extent of the world, in blocks.
pub const WORLD_HEIGHT: usize = 256;

const CHUNK_VOLUME: usize = CHUNK_AREA * WORLD_HEIGHT;

/// Horizontal chunk coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World coordinates of local column `(0, 0)`.
    ///
    /// Returns `None` when any column of the chunk would fall outside the
    /// `i32` world range.
    pub fn world_origin(self) -> Option<(i32, i32)> {
        let side = CHUNK_SIDE as i32;
        let ox = self.x.checked_mul(side)?;
        let oz = self.z.checked_mul(side)?;
        ox.checked_add(side - 1)?;
        oz.checked_add(side - 1)?;
        Some((ox, oz))
    }

    /// Chunk containing world column `(wx, wz)`.
    pub fn containing(wx: i32, wz: i32) -> Self {
        let side = CHUNK_SIDE as i32;
        Self {
            x: wx.div_euclid(side),
            z: wz.div_euclid(side),
        }
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Dense block storage for a single chunk, initially all Air.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkBlocks {
    cells: Vec<BlockId>,
}

impl ChunkBlocks {
    pub fn new() -> Self {
        Self {
            cells: vec![blocks::AIR; CHUNK_VOLUME],
        }
    }

    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIDE + z) * CHUNK_SIDE + x
    }

    #[inline]
    fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_SIDE && y < WORLD_HEIGHT && z < CHUNK_SIDE
    }

    /// Returns the block at `(x, y, z)`, or Air (with a warning) when out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        if !Self::in_bounds(x, y, z) {
            tracing::warn!("ChunkBlocks::get out of bounds: ({}, {}, {})", x, y, z);
            return blocks::AIR;
        }
        self.cells[Self::index(x, y, z)]
    }

    /// Sets the block at `(x, y, z)`. No-op with a warning when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        if !Self::in_bounds(x, y, z) {
            tracing::warn!("ChunkBlocks::set out of bounds: ({}, {}, {})", x, y, z);
            return;
        }
        self.cells[Self::index(x, y, z)] = block;
    }

    /// Signed lookup used by structures; `None` outside the chunk.
    pub fn try_get(&self, x: i32, y: i32, z: i32) -> Option<BlockId> {
        let (x, y, z) = Self::signed_to_local(x, y, z)?;
        Some(self.cells[Self::index(x, y, z)])
    }

    /// Signed write used by structures. Writes outside the chunk are clipped;
    /// returns whether the block was written.
    pub fn try_set(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> bool {
        match Self::signed_to_local(x, y, z) {
            Some((x, y, z)) => {
                self.cells[Self::index(x, y, z)] = block;
                true
            }
            None => false,
        }
    }

    fn signed_to_local(x: i32, y: i32, z: i32) -> Option<(usize, usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let z = usize::try_from(z).ok()?;
        Self::in_bounds(x, y, z).then_some((x, y, z))
    }

    /// Fills `y_start..y_end` of column `(x, z)` with `block`, clipped to the world height.
    pub fn fill_column(&mut self, x: usize, z: usize, y_start: usize, y_end: usize, block: BlockId) {
        if x >= CHUNK_SIDE || z >= CHUNK_SIDE {
            tracing::warn!("ChunkBlocks::fill_column out of bounds: ({}, {})", x, z);
            return;
        }
        for y in y_start..y_end.min(WORLD_HEIGHT) {
            self.cells[Self::index(x, y, z)] = block;
        }
    }

    /// Y of the highest non-air block in column `(x, z)`.
    pub fn column_top(&self, x: usize, z: usize) -> Option<usize> {
        if x >= CHUNK_SIDE || z >= CHUNK_SIDE {
            return None;
        }
        (0..WORLD_HEIGHT)
            .rev()
            .find(|&y| self.cells[Self::index(x, y, z)] != blocks::AIR)
    }

    /// Raw Y-Z-X ordered cells.
    pub fn as_slice(&self) -> &[BlockId] {
        &self.cells
    }

    /// Number of non-air blocks.
    pub fn non_air_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b != blocks::AIR).count()
    }
}

impl Default for ChunkBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChunkBlocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBlocks")
            .field("non_air", &self.non_air_count())
            .finish()
    }
}
