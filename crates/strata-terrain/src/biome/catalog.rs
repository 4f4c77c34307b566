//! The standard biome catalog.
//!
//! Catalog order matters: the resolver walks selectable biomes in this order,
//! so neighbours in the list tend to border each other in the world and the
//! tail of the list (mountains, volcanoes) is rarest.

use strata_voxel::{WORLD_HEIGHT, blocks};

use super::def::{BiomeDescriptor, BiomeId, SurfaceRule, Vegetation};
use crate::decorate::TreeKind;
use crate::height::HeightFunction;

/// Ids of the standard catalog.
pub mod ids {
    use super::BiomeId;

    pub const OCEAN: BiomeId = BiomeId(0);
    pub const PLAINS: BiomeId = BiomeId(1);
    pub const FOREST: BiomeId = BiomeId(2);
    pub const GRASSLAND_FLATS: BiomeId = BiomeId(3);
    pub const GRASSLAND_HILLS: BiomeId = BiomeId(4);
    pub const TAIGA: BiomeId = BiomeId(5);
    pub const SWAMP: BiomeId = BiomeId(6);
    pub const SAVANNA: BiomeId = BiomeId(7);
    pub const DESERT: BiomeId = BiomeId(8);
    pub const HIGHLAND: BiomeId = BiomeId(9);
    pub const TUNDRA: BiomeId = BiomeId(10);
    pub const MESA: BiomeId = BiomeId(11);
    pub const PLATEAU: BiomeId = BiomeId(12);
    pub const GRASSLAND_MOUNTAINS: BiomeId = BiomeId(13);
    pub const EXTREME_HILLS: BiomeId = BiomeId(14);
    pub const LONELY_MOUNTAIN: BiomeId = BiomeId(15);
    pub const VOLCANO: BiomeId = BiomeId(16);
    pub const BEACH: BiomeId = BiomeId(17);
    pub const RIVER: BiomeId = BiomeId(18);
    pub const FROZEN_RIVER: BiomeId = BiomeId(19);
    pub const SNOWY_BEACH: BiomeId = BiomeId(20);
}

/// Height band relative to the sea level, kept inside the buildable world.
fn band(sea_level: f64, below: f64, above: f64) -> (f64, f64) {
    let top = (WORLD_HEIGHT - 2) as f64;
    ((sea_level - below).max(1.0), (sea_level + above).clamp(1.0, top))
}

fn with_band(biome: BiomeDescriptor, sea_level: f64, below: f64, above: f64) -> BiomeDescriptor {
    let (min, max) = band(sea_level, below, above);
    biome.with_band(min, max)
}

fn veg(grass: f64, flowers: f64, trees: f64, tree_kinds: &[(TreeKind, u32)]) -> Vegetation {
    Vegetation {
        grass,
        flowers,
        trees,
        tree_kinds: tree_kinds.to_vec(),
        ..Vegetation::default()
    }
}

/// Builds the standard catalog for a world with the given sea level.
pub fn standard_catalog(sea_level: f64) -> Vec<BiomeDescriptor> {
    use ids::*;
    let s = sea_level;

    vec![
        with_band(
            BiomeDescriptor::new(OCEAN, "ocean", HeightFunction::Ocean { depth: 24.0, ground: 4.0 })
                .with_climate(0.5, 0.5)
                .with_weight(3.0)
                .without_rivers()
                .with_beach_variant(BEACH)
                .with_surface(SurfaceRule {
                    top: blocks::SAND,
                    filler: blocks::SAND,
                    filler_depth: 3,
                    underwater: blocks::GRAVEL,
                    frozen_water: false,
                })
                .with_color([30, 70, 160]),
            s,
            44.0,
            -2.0,
        ),
        with_band(
            BiomeDescriptor::new(
                PLAINS,
                "plains",
                HeightFunction::Plains { base: 2.0, ground: 3.0, hills: 5.0 },
            )
            .with_climate(0.55, 0.4)
            .with_weight(2.0)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_color([120, 180, 80])
            .with_vegetation(veg(0.35, 0.04, 0.004, &[(TreeKind::Oak, 1)])),
            s,
            6.0,
            40.0,
        ),
        with_band(
            BiomeDescriptor::new(
                FOREST,
                "forest",
                HeightFunction::Plains { base: 3.0, ground: 3.5, hills: 8.0 },
            )
            .with_climate(0.5, 0.7)
            .with_weight(2.0)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_color([50, 120, 50])
            .with_vegetation(veg(
                0.25,
                0.02,
                0.08,
                &[(TreeKind::Oak, 3), (TreeKind::Birch, 2)],
            )),
            s,
            6.0,
            50.0,
        ),
        with_band(
            BiomeDescriptor::new(
                GRASSLAND_FLATS,
                "grassland_flats",
                HeightFunction::GrasslandFlats { ground: 2.0 },
            )
            .with_climate(0.6, 0.35)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_vegetation(veg(0.5, 0.06, 0.001, &[(TreeKind::Oak, 1)])),
            s,
            6.0,
            30.0,
        ),
        with_band(
            BiomeDescriptor::new(
                GRASSLAND_HILLS,
                "grassland_hills",
                HeightFunction::GrasslandHills { ground: 3.0, hills: 14.0 },
            )
            .with_climate(0.5, 0.45)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_vegetation(veg(
                0.4,
                0.03,
                0.01,
                &[(TreeKind::Oak, 2), (TreeKind::Birch, 1)],
            )),
            s,
            6.0,
            60.0,
        ),
        with_band(
            BiomeDescriptor::new(
                TAIGA,
                "taiga",
                HeightFunction::Plains { base: 4.0, ground: 4.0, hills: 12.0 },
            )
            .with_climate(0.2, 0.6)
            .with_weight(1.5)
            .with_river_variant(FROZEN_RIVER)
            .with_beach_variant(SNOWY_BEACH)
            .with_surface(SurfaceRule {
                top: blocks::PODZOL,
                ..SurfaceRule::GRASS
            })
            .with_color([45, 90, 70])
            .with_vegetation(Vegetation {
                snow: 0.35,
                ..veg(0.15, 0.0, 0.07, &[(TreeKind::Spruce, 1)])
            }),
            s,
            6.0,
            70.0,
        ),
        with_band(
            BiomeDescriptor::new(SWAMP, "swamp", HeightFunction::Marsh { ground: 1.5 })
                .with_climate(0.6, 0.9)
                .with_weight(0.8)
                .with_river_variant(RIVER)
                .with_beach_variant(BEACH)
                .with_surface(SurfaceRule {
                    underwater: blocks::MUD,
                    ..SurfaceRule::GRASS
                })
                .with_color([70, 90, 60])
                .with_vegetation(veg(0.3, 0.0, 0.02, &[(TreeKind::Oak, 1)])),
            s,
            8.0,
            12.0,
        ),
        with_band(
            BiomeDescriptor::new(
                SAVANNA,
                "savanna",
                HeightFunction::Plains { base: 2.0, ground: 3.0, hills: 6.0 },
            )
            .with_climate(0.75, 0.2)
            .with_weight(1.2)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_surface(SurfaceRule::GRASS)
            .with_color([180, 170, 90])
            .with_vegetation(veg(0.45, 0.0, 0.008, &[(TreeKind::Acacia, 1)])),
            s,
            6.0,
            50.0,
        ),
        with_band(
            BiomeDescriptor::new(
                DESERT,
                "desert",
                HeightFunction::Plains { base: 2.0, ground: 2.5, hills: 7.0 },
            )
            .with_climate(0.9, 0.05)
            .with_weight(1.5)
            .with_river_variant(RIVER)
            .with_beach_variant(BEACH)
            .with_color([230, 210, 150])
            .with_vegetation(Vegetation {
                dead_bush: 0.01,
                ..veg(0.0, 0.0, 0.006, &[(TreeKind::Cactus, 1)])
            }),
            s,
            6.0,
            50.0,
        ),
        with_band(
            BiomeDescriptor::new(
                HIGHLAND,
                "highland",
                HeightFunction::Highland { base: 14.0, ground: 4.0, hills: 12.0, ridge: 24.0 },
            )
            .with_climate(0.4, 0.5)
            .with_river_variant(RIVER)
            .with_vegetation(veg(
                0.2,
                0.01,
                0.01,
                &[(TreeKind::Spruce, 1), (TreeKind::Oak, 1)],
            )),
            s,
            4.0,
            100.0,
        ),
        with_band(
            BiomeDescriptor::new(
                TUNDRA,
                "tundra",
                HeightFunction::Plains { base: 3.0, ground: 3.0, hills: 8.0 },
            )
            .with_climate(0.05, 0.3)
            .with_river_variant(FROZEN_RIVER)
            .with_beach_variant(SNOWY_BEACH)
            .with_color([220, 230, 235])
            .with_vegetation(Vegetation {
                snow: 1.0,
                ..veg(0.02, 0.0, 0.002, &[(TreeKind::Spruce, 1)])
            }),
            s,
            6.0,
            60.0,
        ),
        with_band(
            BiomeDescriptor::new(
                MESA,
                "mesa",
                HeightFunction::Mesa {
                    base: 6.0,
                    ground: 2.0,
                    plateau: 36.0,
                    threshold: 0.45,
                    step: 7.0,
                },
            )
            .with_climate(0.85, 0.1)
            .with_weight(0.7)
            .with_river_variant(RIVER)
            .with_surface(SurfaceRule {
                top: blocks::RED_SAND,
                filler: blocks::TERRACOTTA,
                filler_depth: 6,
                underwater: blocks::RED_SAND,
                frozen_water: false,
            })
            .with_color([190, 100, 50])
            .with_vegetation(Vegetation {
                dead_bush: 0.02,
                ..Vegetation::default()
            }),
            s,
            4.0,
            90.0,
        ),
        with_band(
            BiomeDescriptor::new(
                PLATEAU,
                "plateau",
                HeightFunction::Plateau {
                    base: 8.0,
                    ground: 3.0,
                    bands: vec![(14.0, 0.35), (12.0, 0.55), (10.0, 0.7)],
                },
            )
            .with_climate(0.7, 0.3)
            .with_weight(0.7)
            .with_river_variant(RIVER)
            .with_vegetation(veg(0.3, 0.0, 0.01, &[(TreeKind::Acacia, 1)])),
            s,
            4.0,
            90.0,
        ),
        with_band(
            BiomeDescriptor::new(
                GRASSLAND_MOUNTAINS,
                "grassland_mountains",
                HeightFunction::GrasslandMountains { ground: 4.0, hills: 16.0, mountain: 70.0 },
            )
            .with_climate(0.35, 0.4)
            .with_weight(0.8)
            .with_river_variant(RIVER)
            .with_vegetation(veg(0.25, 0.01, 0.006, &[(TreeKind::Spruce, 1)])),
            s,
            4.0,
            130.0,
        ),
        with_band(
            BiomeDescriptor::new(
                EXTREME_HILLS,
                "extreme_hills",
                HeightFunction::RidgedExtremeHills { base: 12.0, ground: 5.0, ridge: 64.0 },
            )
            .with_climate(0.3, 0.4)
            .with_weight(0.8)
            .with_river_variant(RIVER)
            .with_vegetation(veg(0.1, 0.0, 0.01, &[(TreeKind::Spruce, 1)])),
            s,
            4.0,
            140.0,
        ),
        with_band(
            BiomeDescriptor::new(
                LONELY_MOUNTAIN,
                "lonely_mountain",
                HeightFunction::LonelyMountain { base: 4.0, ground: 3.0, peak: 110.0, radius: 0.5 },
            )
            .with_climate(0.4, 0.4)
            .with_weight(0.4)
            .with_river_variant(RIVER)
            .with_vegetation(veg(0.1, 0.0, 0.0, &[])),
            s,
            4.0,
            150.0,
        ),
        with_band(
            BiomeDescriptor::new(
                VOLCANO,
                "volcano",
                HeightFunction::Volcano {
                    base: 6.0,
                    ground: 3.0,
                    peak: 95.0,
                    radius: 0.6,
                    crater_radius: 0.07,
                    crater_depth: 28.0,
                },
            )
            .with_climate(0.8, 0.3)
            .with_weight(0.3)
            .without_rivers()
            .with_surface(SurfaceRule {
                top: blocks::BASALT,
                filler: blocks::BASALT,
                filler_depth: 5,
                underwater: blocks::MAGMA,
                frozen_water: false,
            })
            .with_color([60, 55, 55]),
            s,
            4.0,
            140.0,
        ),
        with_band(
            BiomeDescriptor::new(BEACH, "beach", HeightFunction::Beach { ground: 1.0 })
                .with_climate(0.6, 0.4)
                .as_edge()
                .with_river_variant(RIVER)
                .with_surface(SurfaceRule {
                    top: blocks::SAND,
                    filler: blocks::SAND,
                    filler_depth: 4,
                    underwater: blocks::SAND,
                    frozen_water: false,
                })
                .with_color([240, 230, 170]),
            s,
            6.0,
            6.0,
        ),
        with_band(
            BiomeDescriptor::new(RIVER, "river", HeightFunction::River { depth: 3.0, ground: 1.0 })
                .with_climate(0.5, 0.5)
                .as_edge()
                .with_surface(SurfaceRule {
                    top: blocks::SAND,
                    filler: blocks::DIRT,
                    filler_depth: 3,
                    underwater: blocks::CLAY,
                    frozen_water: false,
                })
                .with_color([50, 110, 220]),
            s,
            12.0,
            2.0,
        ),
        with_band(
            BiomeDescriptor::new(
                FROZEN_RIVER,
                "frozen_river",
                HeightFunction::River { depth: 3.0, ground: 1.0 },
            )
            .with_climate(0.05, 0.5)
            .as_edge()
            .with_surface(SurfaceRule {
                top: blocks::SNOW_BLOCK,
                filler: blocks::DIRT,
                filler_depth: 3,
                underwater: blocks::GRAVEL,
                frozen_water: true,
            })
            .with_color([160, 190, 240])
            .with_vegetation(Vegetation {
                snow: 0.5,
                ..Vegetation::default()
            }),
            s,
            12.0,
            2.0,
        ),
        with_band(
            BiomeDescriptor::new(SNOWY_BEACH, "snowy_beach", HeightFunction::Beach { ground: 1.0 })
                .with_climate(0.05, 0.3)
                .as_edge()
                .with_river_variant(FROZEN_RIVER)
                .with_surface(SurfaceRule {
                    top: blocks::SAND,
                    filler: blocks::SAND,
                    filler_depth: 4,
                    underwater: blocks::SAND,
                    frozen_water: true,
                })
                .with_vegetation(Vegetation {
                    snow: 1.0,
                    ..Vegetation::default()
                }),
            s,
            6.0,
            6.0,
        ),
    ]
}
