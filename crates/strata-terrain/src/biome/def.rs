//! Biome descriptor: identity, climate, height band, surface materials, and vegetation.

use strata_voxel::{BlockId, blocks};

use crate::decorate::TreeKind;
use crate::height::HeightFunction;

/// Stable biome identifier, persisted in every [`ColumnInfo`](strata_voxel::ColumnInfo).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u8);

/// Blocks written by the replace pass for a column of this biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceRule {
    /// Topmost block of a dry column.
    pub top: BlockId,
    /// Blocks between the top and the stone.
    pub filler: BlockId,
    pub filler_depth: u8,
    /// Top and filler block of a submerged column.
    pub underwater: BlockId,
    /// Whether the water surface above the column freezes.
    pub frozen_water: bool,
}

impl SurfaceRule {
    pub const GRASS: Self = Self {
        top: blocks::GRASS,
        filler: blocks::DIRT,
        filler_depth: 3,
        underwater: blocks::DIRT,
        frozen_water: false,
    };

    pub const SAND: Self = Self {
        top: blocks::SAND,
        filler: blocks::SANDSTONE,
        filler_depth: 4,
        underwater: blocks::SAND,
        frozen_water: false,
    };

    pub const SNOW: Self = Self {
        top: blocks::SNOW_BLOCK,
        filler: blocks::DIRT,
        filler_depth: 3,
        underwater: blocks::GRAVEL,
        frozen_water: true,
    };
}

/// Per-column chances used by the decorators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vegetation {
    pub grass: f64,
    pub flowers: f64,
    pub dead_bush: f64,
    pub trees: f64,
    /// Weighted tree species.
    pub tree_kinds: Vec<(TreeKind, u32)>,
    /// Chance of a snow layer on each exposed top.
    pub snow: f64,
}

/// Immutable description of one biome.
#[derive(Clone, Debug)]
pub struct BiomeDescriptor {
    pub id: BiomeId,
    /// Human-readable biome name (e.g., "plains").
    pub name: String,
    /// Climate coordinates matched against `|T|` and `|R|`, nominally in `[0, 1]`.
    pub temperature: f64,
    pub rainfall: f64,
    /// Heights produced by this biome's recipe are clamped into this band.
    pub min_height: f64,
    pub max_height: f64,
    /// Rarity weight for primary selection.
    pub weight: f64,
    pub allow_rivers: bool,
    /// Edge biomes are never chosen by the climate resolver.
    pub edge: bool,
    pub height: HeightFunction,
    /// Biome substituted where a river crosses this biome; may be itself.
    pub river_variant: BiomeId,
    /// Biome substituted on dry shore columns.
    pub beach_variant: Option<BiomeId>,
    /// `None` lets the registry pick one from the climate.
    pub surface: Option<SurfaceRule>,
    /// Map preview colour; `None` lets the registry derive one from the name.
    pub color: Option<[u8; 3]>,
    pub vegetation: Vegetation,
}

impl BiomeDescriptor {
    /// A selectable, river-carrying biome that is its own river variant.
    pub fn new(id: BiomeId, name: &str, height: HeightFunction) -> Self {
        Self {
            id,
            name: name.to_string(),
            temperature: 0.5,
            rainfall: 0.5,
            min_height: 1.0,
            max_height: 250.0,
            weight: 1.0,
            allow_rivers: true,
            edge: false,
            height,
            river_variant: id,
            beach_variant: None,
            surface: None,
            color: None,
            vegetation: Vegetation::default(),
        }
    }

    pub fn with_climate(mut self, temperature: f64, rainfall: f64) -> Self {
        self.temperature = temperature;
        self.rainfall = rainfall;
        self
    }

    pub fn with_band(mut self, min_height: f64, max_height: f64) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn without_rivers(mut self) -> Self {
        self.allow_rivers = false;
        self
    }

    /// Marks the biome as edge-only (substitution target).
    pub fn as_edge(mut self) -> Self {
        self.edge = true;
        self
    }

    pub fn with_river_variant(mut self, variant: BiomeId) -> Self {
        self.river_variant = variant;
        self
    }

    pub fn with_beach_variant(mut self, variant: BiomeId) -> Self {
        self.beach_variant = Some(variant);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceRule) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_vegetation(mut self, vegetation: Vegetation) -> Self {
        self.vegetation = vegetation;
        self
    }

    /// The resolved surface rule. Registries fill in a missing rule, so the
    /// grass fallback only applies to descriptors used outside a registry.
    pub fn surface_rule(&self) -> &SurfaceRule {
        self.surface.as_ref().unwrap_or(&SurfaceRule::GRASS)
    }

    /// Clamps a recipe height into the biome's band.
    #[inline]
    pub fn clamp_height(&self, height: f64) -> f64 {
        height.clamp(self.min_height, self.max_height)
    }
}
