//! Block identifiers, the standard block catalog, and per-chunk column storage.

pub mod block;
pub mod chunk;
pub mod column;

pub use block::{BlockDef, BlockId, BlockMask, BlockRegistry, RegistryError, blocks};
pub use chunk::{CHUNK_AREA, CHUNK_SIDE, ChunkBlocks, ChunkPos, WORLD_HEIGHT};
pub use column::{ChunkData, ColumnInfo};
