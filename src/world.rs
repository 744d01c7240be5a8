//! World data container and the generation pipeline
//!
//! `generate` runs the fixed stage order (elevation, climate,
//! classification, feature overlay) and returns the finished map. The
//! grid is built exactly once per run and is read-only by the time a
//! renderer sees it.

use log::info;

use crate::biomes::{self, BiomeKind};
use crate::climate;
use crate::config::WorldConfig;
use crate::features::{self, Feature, PlacedFeatures};
use crate::heightmap;
use crate::seeds::WorldSeeds;
use crate::tilemap::Tilemap;

/// One grid cell after classification.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainCell {
    /// Normalized elevation
    pub elevation: f32,
    /// Normalized temperature (1.0 on the warm midline)
    pub temperature: f32,
    /// Normalized moisture
    pub moisture: f32,
    pub biome: BiomeKind,
    /// At most one overlay feature
    pub feature: Option<Feature>,
}

/// All generated world data bundled together.
pub struct WorldMap {
    /// Seeds used for generation (allows recreation)
    pub seeds: WorldSeeds,
    /// Map width in cells
    pub width: usize,
    /// Map height in cells
    pub height: usize,
    pub cells: Tilemap<TerrainCell>,
    /// What the feature stages placed, kept for reporting and verification
    pub features: PlacedFeatures,
}

impl WorldMap {
    /// Total cell count.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Generate a complete world from a validated config.
///
/// The config carries its own validation, so generation cannot fail:
/// stages run strictly in order with no retries or backward transitions.
pub fn generate(config: &WorldConfig) -> WorldMap {
    let seeds = WorldSeeds::from_master(config.seed);
    let (width, height) = (config.width, config.height);

    info!("generating {}x{} world (seed {})", width, height, seeds.master);

    let elevation = heightmap::generate_heightmap(width, height, seeds.heightmap, config.scale);
    let temperature = climate::generate_temperature(width, height, seeds.temperature, config.scale);
    let moisture = climate::generate_moisture(width, height, seeds.moisture, config.scale);

    let mut cells = Tilemap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let e = *elevation.get(x, y);
            let t = *temperature.get(x, y);
            let m = *moisture.get(x, y);
            cells.set(
                x,
                y,
                TerrainCell {
                    elevation: e,
                    temperature: t,
                    moisture: m,
                    biome: biomes::classify(e, t, m),
                    feature: None,
                },
            );
        }
    }

    let mut world = WorldMap {
        seeds,
        width,
        height,
        cells,
        features: PlacedFeatures::default(),
    };
    let placed = features::place_features(&mut world);
    world.features = placed;
    world
}
