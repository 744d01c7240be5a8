//! Feature overlay
//!
//! Places cities, rivers, roads and volcanoes onto the classified grid, in
//! that fixed order. Claim precedence is encoded as data on [`Feature`]
//! rather than implied by call sequence, so a cell's occupant can only be
//! replaced by a strictly higher-precedence feature and the rule is
//! testable in isolation.

pub mod cities;
pub mod rivers;
pub mod roads;
pub mod volcanoes;

use log::info;

pub use roads::RoadSegment;

use crate::world::WorldMap;

/// Discrete overlay feature. At most one per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    City,
    River,
    Road,
    Volcano,
}

impl Feature {
    /// Claim precedence; higher values hold their cell against lower ones.
    pub fn precedence(self) -> u8 {
        match self {
            Feature::City => 3,
            Feature::River => 2,
            Feature::Road => 1,
            Feature::Volcano => 0,
        }
    }

    /// Whether this feature may claim a cell currently held by `occupant`.
    pub fn can_claim(self, occupant: Option<Feature>) -> bool {
        match occupant {
            None => true,
            Some(existing) => self.precedence() > existing.precedence(),
        }
    }

    /// Overlay RGB color, shared by the text and raster renderers.
    pub fn color(self) -> [u8; 3] {
        match self {
            Feature::City => [232, 220, 64],
            Feature::River => [70, 130, 220],
            Feature::Road => [150, 110, 70],
            Feature::Volcano => [204, 58, 36],
        }
    }
}

/// Everything the feature stages placed, kept for reporting and verification.
#[derive(Clone, Debug, Default)]
pub struct PlacedFeatures {
    pub cities: Vec<(usize, usize)>,
    pub rivers: Vec<Vec<(usize, usize)>>,
    pub roads: Vec<RoadSegment>,
    pub volcanoes: Vec<(usize, usize)>,
}

/// Run all feature stages in claim-precedence order.
///
/// A world with no viable city site yields no features at all: the
/// remaining stages are skipped, which is a logged outcome, not an error.
pub fn place_features(world: &mut WorldMap) -> PlacedFeatures {
    let seeds = world.seeds.clone();

    let cities = cities::place_cities(world, seeds.cities);
    if cities.is_empty() {
        info!("no viable city sites; skipping rivers, roads and volcanoes");
        return PlacedFeatures {
            cities,
            ..Default::default()
        };
    }

    let rivers = rivers::trace_rivers(world, seeds.rivers);
    let roads = roads::build_road_network(world, &cities);
    let volcanoes = volcanoes::place_volcanoes(world, seeds.volcanoes);

    info!(
        "placed {} cities, {} rivers, {} roads, {} volcanoes",
        cities.len(),
        rivers.len(),
        roads.len(),
        volcanoes.len()
    );

    PlacedFeatures {
        cities,
        rivers,
        roads,
        volcanoes,
    }
}
