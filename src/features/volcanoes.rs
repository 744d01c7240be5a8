//! Volcano placement: a small seeded random subset of mountain cells.

use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::Feature;
use crate::biomes::BiomeKind;
use crate::world::WorldMap;

/// One volcano per this many mountain cells.
const MOUNTAIN_CELLS_PER_VOLCANO: usize = 40;
const MAX_VOLCANOES: usize = 8;

/// Mark volcanoes on mountain cells and return the chosen coordinates.
pub fn place_volcanoes(world: &mut WorldMap, seed: u64) -> Vec<(usize, usize)> {
    let mountains: Vec<(usize, usize)> = world
        .cells
        .iter()
        .filter(|(_, _, cell)| cell.biome == BiomeKind::Mountain)
        .map(|(x, y, _)| (x, y))
        .collect();
    if mountains.is_empty() {
        debug!("no mountain cells; no volcanoes placed");
        return Vec::new();
    }

    let count = (mountains.len() / MOUNTAIN_CELLS_PER_VOLCANO).clamp(1, MAX_VOLCANOES);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut placed = Vec::new();
    for &(x, y) in mountains.choose_multiple(&mut rng, count) {
        let cell = world.cells.get_mut(x, y);
        if Feature::Volcano.can_claim(cell.feature) {
            cell.feature = Some(Feature::Volcano);
            placed.push((x, y));
        }
    }
    placed
}
