//! Block registry: maps compact [`BlockId`] values to [`BlockDef`] metadata.
//!
//! The standard catalog is fixed at compile time so generation code can refer
//! to blocks through the constants in [`blocks`]. Air is always ID 0 so that a
//! freshly allocated chunk volume is empty space.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored in every block cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u16);

/// Full descriptor for a block type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockDef {
    /// Human-readable name (e.g. "stone", "oak_leaves").
    pub name: String,
    /// Whether the block is a full solid cube.
    pub solid: bool,
    /// Whether structures and plants may grow into this cell (air, plants, snow layers).
    pub replaceable: bool,
    /// RGB colour used by top-down map previews.
    pub map_color: [u8; 3],
}

/// Errors that can occur during block registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A block with the same name has already been registered.
    #[error("duplicate block name: {0}")]
    DuplicateName(String),
    /// [`BlockMask`] covers 64 ids; the registry refuses to grow past that.
    #[error("block registry is full (max {} types)", BlockMask::CAPACITY)]
    RegistryFull,
}

/// Set of block ids, used by structure requirements ("trunk cell must be air or grass").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockMask(u64);

impl BlockMask {
    /// Number of distinct ids a mask can hold.
    pub const CAPACITY: usize = 64;

    pub const EMPTY: Self = Self(0);

    /// Builds a mask from a list of ids. Ids ≥ 64 are ignored.
    pub const fn of(ids: &[BlockId]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < ids.len() {
            let id = ids[i].0 as u32;
            if id < 64 {
                bits |= 1 << id;
            }
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub const fn contains(self, id: BlockId) -> bool {
        id.0 < 64 && self.0 & (1 << id.0) != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Ids in `self` but not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

// ---------------------------------------------------------------------------
// Standard catalog
// ---------------------------------------------------------------------------

/// Ids of the standard catalog, in registration order.
pub mod blocks {
    use super::BlockId;

    pub const AIR: BlockId = BlockId(0);
    pub const BEDROCK: BlockId = BlockId(1);
    pub const STONE: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const GRASS: BlockId = BlockId(4);
    pub const SAND: BlockId = BlockId(5);
    pub const RED_SAND: BlockId = BlockId(6);
    pub const GRAVEL: BlockId = BlockId(7);
    pub const CLAY: BlockId = BlockId(8);
    pub const SANDSTONE: BlockId = BlockId(9);
    pub const TERRACOTTA: BlockId = BlockId(10);
    pub const MUD: BlockId = BlockId(11);
    pub const PODZOL: BlockId = BlockId(12);
    pub const SNOW_BLOCK: BlockId = BlockId(13);
    pub const SNOW_LAYER: BlockId = BlockId(14);
    pub const ICE: BlockId = BlockId(15);
    pub const WATER: BlockId = BlockId(16);
    pub const BASALT: BlockId = BlockId(17);
    pub const MAGMA: BlockId = BlockId(18);
    pub const OAK_LOG: BlockId = BlockId(19);
    pub const OAK_LEAVES: BlockId = BlockId(20);
    pub const BIRCH_LOG: BlockId = BlockId(21);
    pub const BIRCH_LEAVES: BlockId = BlockId(22);
    pub const SPRUCE_LOG: BlockId = BlockId(23);
    pub const SPRUCE_LEAVES: BlockId = BlockId(24);
    pub const ACACIA_LOG: BlockId = BlockId(25);
    pub const ACACIA_LEAVES: BlockId = BlockId(26);
    pub const CACTUS: BlockId = BlockId(27);
    pub const TALL_GRASS: BlockId = BlockId(28);
    pub const FERN: BlockId = BlockId(29);
    pub const DANDELION: BlockId = BlockId(30);
    pub const POPPY: BlockId = BlockId(31);
    pub const DEAD_BUSH: BlockId = BlockId(32);
}

/// `(name, solid, replaceable, map_color)`; index == id.
const STANDARD_BLOCKS: [(&str, bool, bool, [u8; 3]); 33] = [
    ("air", false, true, [0, 0, 0]),
    ("bedrock", true, false, [40, 40, 40]),
    ("stone", true, false, [125, 125, 125]),
    ("dirt", true, false, [134, 96, 67]),
    ("grass", true, false, [95, 159, 53]),
    ("sand", true, false, [219, 207, 163]),
    ("red_sand", true, false, [190, 102, 33]),
    ("gravel", true, false, [136, 126, 126]),
    ("clay", true, false, [160, 166, 179]),
    ("sandstone", true, false, [216, 203, 155]),
    ("terracotta", true, false, [152, 94, 67]),
    ("mud", true, false, [60, 57, 61]),
    ("podzol", true, false, [91, 63, 24]),
    ("snow_block", true, false, [249, 254, 254]),
    ("snow_layer", false, true, [240, 251, 251]),
    ("ice", true, false, [145, 183, 253]),
    ("water", false, false, [63, 118, 228]),
    ("basalt", true, false, [73, 72, 77]),
    ("magma", true, false, [142, 63, 31]),
    ("oak_log", true, false, [109, 85, 50]),
    ("oak_leaves", true, false, [59, 122, 24]),
    ("birch_log", true, false, [216, 215, 210]),
    ("birch_leaves", true, false, [96, 161, 51]),
    ("spruce_log", true, false, [58, 37, 16]),
    ("spruce_leaves", true, false, [46, 77, 46]),
    ("acacia_log", true, false, [103, 96, 86]),
    ("acacia_leaves", true, false, [95, 128, 30]),
    ("cactus", true, false, [88, 130, 44]),
    ("tall_grass", false, true, [104, 170, 60]),
    ("fern", false, true, [88, 142, 52]),
    ("dandelion", false, true, [245, 220, 50]),
    ("poppy", false, true, [200, 30, 30]),
    ("dead_bush", false, true, [148, 116, 64]),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`BlockId`] → [`BlockDef`] with O(1) lookup by index and by name.
pub struct BlockRegistry {
    /// Dense array where `index == BlockId.0`.
    defs: Vec<BlockDef>,
    name_to_id: FxHashMap<String, BlockId>,
    replaceable: BlockMask,
}

impl BlockRegistry {
    /// Creates a registry holding only Air (ID 0).
    pub fn new() -> Self {
        let mut registry = Self {
            defs: Vec::new(),
            name_to_id: FxHashMap::default(),
            replaceable: BlockMask::EMPTY,
        };
        registry.push(BlockDef {
            name: "air".to_string(),
            solid: false,
            replaceable: true,
            map_color: [0, 0, 0],
        });
        registry
    }

    /// The standard catalog; ids match the constants in [`blocks`].
    pub fn standard() -> Self {
        let mut registry = Self {
            defs: Vec::with_capacity(STANDARD_BLOCKS.len()),
            name_to_id: FxHashMap::default(),
            replaceable: BlockMask::EMPTY,
        };
        for (name, solid, replaceable, map_color) in STANDARD_BLOCKS {
            registry.push(BlockDef {
                name: name.to_string(),
                solid,
                replaceable,
                map_color,
            });
        }
        registry
    }

    /// Registers a new block and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] if the name is taken,
    /// [`RegistryError::RegistryFull`] once [`BlockMask::CAPACITY`] ids exist.
    pub fn register(&mut self, def: BlockDef) -> Result<BlockId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.defs.len() >= BlockMask::CAPACITY {
            return Err(RegistryError::RegistryFull);
        }
        Ok(self.push(def))
    }

    fn push(&mut self, def: BlockDef) -> BlockId {
        let id = BlockId(self.defs.len() as u16);
        if def.replaceable {
            self.replaceable = self.replaceable.union(BlockMask::of(&[id]));
        }
        self.name_to_id.insert(def.name.clone(), id);
        self.defs.push(def);
        id
    }

    /// Returns the definition for `id`, or `None` for unknown ids.
    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        self.defs.get(id.0 as usize)
    }

    /// Block name, `"unknown"` for ids outside the registry.
    pub fn name(&self, id: BlockId) -> &str {
        self.get(id).map_or("unknown", |def| def.name.as_str())
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Every id flagged `replaceable`.
    pub fn replaceable_mask(&self) -> BlockMask {
        self.replaceable
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ids_match_constants() {
        let reg = BlockRegistry::standard();
        assert_eq!(reg.lookup_by_name("air"), Some(blocks::AIR));
        assert_eq!(reg.lookup_by_name("stone"), Some(blocks::STONE));
        assert_eq!(reg.lookup_by_name("water"), Some(blocks::WATER));
        assert_eq!(reg.lookup_by_name("oak_leaves"), Some(blocks::OAK_LEAVES));
        assert_eq!(reg.lookup_by_name("dead_bush"), Some(blocks::DEAD_BUSH));
        assert_eq!(reg.len(), STANDARD_BLOCKS.len());
    }

    #[test]
    fn test_air_is_zero_in_fresh_registry() {
        let reg = BlockRegistry::new();
        assert_eq!(reg.lookup_by_name("air"), Some(BlockId(0)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = BlockRegistry::standard();
        let result = reg.register(BlockDef {
            name: "stone".into(),
            solid: true,
            replaceable: false,
            map_color: [0, 0, 0],
        });
        assert!(matches!(result, Err(RegistryError::DuplicateName(_))));
    }

    #[test]
    fn test_registry_full() {
        let mut reg = BlockRegistry::new();
        for i in 1..BlockMask::CAPACITY {
            reg.register(BlockDef {
                name: format!("block_{i}"),
                solid: true,
                replaceable: false,
                map_color: [0, 0, 0],
            })
            .unwrap();
        }
        let overflow = reg.register(BlockDef {
            name: "one_too_many".into(),
            solid: true,
            replaceable: false,
            map_color: [0, 0, 0],
        });
        assert!(matches!(overflow, Err(RegistryError::RegistryFull)));
    }

    #[test]
    fn test_replaceable_mask() {
        let reg = BlockRegistry::standard();
        let mask = reg.replaceable_mask();
        assert!(mask.contains(blocks::AIR));
        assert!(mask.contains(blocks::TALL_GRASS));
        assert!(mask.contains(blocks::SNOW_LAYER));
        assert!(!mask.contains(blocks::STONE));
        assert!(!mask.contains(blocks::WATER));
    }

    #[test]
    fn test_block_mask_ignores_large_ids() {
        let mask = BlockMask::of(&[BlockId(3), BlockId(200)]);
        assert!(mask.contains(BlockId(3)));
        assert!(!mask.contains(BlockId(200)));
        assert!(!BlockMask::EMPTY.contains(BlockId(0)));
    }

    #[test]
    fn test_block_mask_difference() {
        let all = BlockMask::of(&[blocks::STONE, blocks::ICE, blocks::GRASS]);
        let rest = all.difference(BlockMask::of(&[blocks::ICE]));
        assert!(rest.contains(blocks::STONE) && rest.contains(blocks::GRASS));
        assert!(!rest.contains(blocks::ICE));
        assert!(all.difference(all).is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let reg = BlockRegistry::standard();
        assert_eq!(reg.name(BlockId(999)), "unknown");
        assert!(reg.get(BlockId(999)).is_none());
    }
}
