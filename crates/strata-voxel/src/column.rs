//! Per-column metadata and the finished chunk record handed to consumers.

use serde::{Deserialize, Serialize};

use crate::chunk::{CHUNK_AREA, CHUNK_SIDE, ChunkBlocks, ChunkPos};

/// Biome and surface height recorded for one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Effective biome after river and beach substitution.
    pub biome_id: u8,
    /// Y of the topmost terrain block (before decoration).
    pub surface_height: i16,
}

/// Output of one chunk generation: column metadata plus the block volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    pub pos: ChunkPos,
    /// `CHUNK_AREA` entries, indexed `z * CHUNK_SIDE + x`.
    pub columns: Vec<ColumnInfo>,
    pub blocks: ChunkBlocks,
}

impl ChunkData {
    /// Empty chunk: all-air volume and zeroed columns.
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            columns: vec![ColumnInfo::default(); CHUNK_AREA],
            blocks: ChunkBlocks::new(),
        }
    }

    #[inline]
    pub fn column_index(x: usize, z: usize) -> usize {
        z * CHUNK_SIDE + x
    }

    /// Column at local `(x, z)`; `None` outside the chunk.
    pub fn column(&self, x: usize, z: usize) -> Option<&ColumnInfo> {
        if x >= CHUNK_SIDE || z >= CHUNK_SIDE {
            return None;
        }
        self.columns.get(Self::column_index(x, z))
    }

    pub fn heights(&self) -> Vec<i16> {
        self.columns.iter().map(|c| c.surface_height).collect()
    }

    pub fn biome_ids(&self) -> Vec<u8> {
        self.columns.iter().map(|c| c.biome_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_data_shape() {
        let data = ChunkData::new(ChunkPos::new(4, -1));
        assert_eq!(data.columns.len(), CHUNK_AREA);
        assert_eq!(data.heights().len(), CHUNK_AREA);
        assert_eq!(data.blocks.non_air_count(), 0);
    }

    #[test]
    fn test_column_indexing() {
        let mut data = ChunkData::new(ChunkPos::default());
        data.columns[ChunkData::column_index(3, 7)] = ColumnInfo {
            biome_id: 9,
            surface_height: 71,
        };
        let col = data.column(3, 7).unwrap();
        assert_eq!(col.biome_id, 9);
        assert_eq!(col.surface_height, 71);
        assert_eq!(data.column(7, 3).unwrap().biome_id, 0);
        assert!(data.column(16, 0).is_none());
    }
}
