//! River tracing
//!
//! Spawns rivers on high terrain and walks each one downhill to drainage.
//! Movement is D8 steepest-descent: always the lowest-elevation unvisited
//! neighbor, ties broken by the fixed scan order below. A trace ends at
//! ocean, the map boundary, its step bound, or a local minimum (a recovered
//! condition, logged and kept).

use std::collections::HashSet;

use log::{debug, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::Feature;
use crate::biomes::BiomeKind;
use crate::world::WorldMap;

/// D8 neighbor scan order:
/// 7 0 1
/// 6 X 2
/// 5 4 3
pub const DX: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];
pub const DY: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Minimum elevation for a spawn cell.
const HIGHLAND_MIN: f32 = 0.60;
/// One spawn attempt per this many cells of map area.
const CELLS_PER_RIVER: usize = 500;

/// Trace all rivers and return their paths in trace order.
pub fn trace_rivers(world: &mut WorldMap, seed: u64) -> Vec<Vec<(usize, usize)>> {
    let spawn_target = (world.area() / CELLS_PER_RIVER).max(1);
    let spawns = select_spawns(world, spawn_target, seed);
    let step_bound = world.width + world.height;

    let mut rivers = Vec::new();
    for (x, y) in spawns {
        let path = trace_one(world, x, y, step_bound);
        if !path.is_empty() {
            rivers.push(path);
        }
    }
    rivers
}

/// Pick spawn cells at or above the highland threshold, favoring higher
/// ground through seeded elevation-weighted sampling, spaced apart so
/// rivers do not braid out of one ridge.
fn select_spawns(world: &WorldMap, count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut candidates: Vec<(usize, usize, f32)> = world
        .cells
        .iter()
        .filter(|(_, _, cell)| cell.elevation >= HIGHLAND_MIN)
        .map(|(x, y, cell)| (x, y, cell.elevation))
        .collect();
    if candidates.is_empty() {
        debug!("no highland cells; no rivers spawned");
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let spacing = ((world.width + world.height) / 8).max(3) as f32;
    let spacing_sq = spacing * spacing;

    let mut spawns: Vec<(usize, usize)> = Vec::new();
    while spawns.len() < count && !candidates.is_empty() {
        let weights = candidates.iter().map(|&(_, _, e)| (e as f64 * e as f64).max(1e-6));
        let Ok(dist) = WeightedIndex::new(weights) else {
            break;
        };
        let (x, y, _) = candidates.swap_remove(dist.sample(&mut rng));
        let clear = spawns.iter().all(|&(sx, sy)| {
            let dx = sx as f32 - x as f32;
            let dy = sy as f32 - y as f32;
            dx * dx + dy * dy >= spacing_sq
        });
        if clear {
            spawns.push((x, y));
        }
    }
    spawns
}

/// Walk one river downhill from its spawn. Returns the traversed cells in
/// order; elevation along the path never increases.
fn trace_one(
    world: &mut WorldMap,
    spawn_x: usize,
    spawn_y: usize,
    step_bound: usize,
) -> Vec<(usize, usize)> {
    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut path = Vec::new();
    let (mut x, mut y) = (spawn_x, spawn_y);

    for _ in 0..step_bound {
        visited.insert((x, y));
        let cell = world.cells.get_mut(x, y);
        if Feature::River.can_claim(cell.feature) {
            cell.feature = Some(Feature::River);
        }
        path.push((x, y));

        let current = world.cells.get(x, y).elevation;

        // Lowest unvisited neighbor; earlier scan positions win ties.
        let mut next: Option<(usize, usize, f32)> = None;
        for dir in 0..8 {
            let nx = x as i32 + DX[dir];
            let ny = y as i32 + DY[dir];
            if !world.cells.in_bounds(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if visited.contains(&(nx, ny)) {
                continue;
            }
            let elevation = world.cells.get(nx, ny).elevation;
            if next.map_or(true, |(_, _, best)| elevation < best) {
                next = Some((nx, ny, elevation));
            }
        }

        match next {
            None => {
                // Boxed in: on the border that is drainage off the map,
                // in the interior it is a dead end among visited cells.
                if x == 0 || y == 0 || x == world.width - 1 || y == world.height - 1 {
                    debug!("river from ({spawn_x},{spawn_y}) drains off the map at ({x},{y})");
                } else {
                    warn!("river from ({spawn_x},{spawn_y}) stalled at ({x},{y})");
                }
                break;
            }
            Some((nx, ny, elevation)) => {
                if elevation > current {
                    warn!("river from ({spawn_x},{spawn_y}) stalled in a basin at ({x},{y})");
                    break;
                }
                if world.cells.get(nx, ny).biome == BiomeKind::Ocean {
                    debug!("river from ({spawn_x},{spawn_y}) reached the sea near ({nx},{ny})");
                    break;
                }
                x = nx;
                y = ny;
            }
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PlacedFeatures;
    use crate::seeds::WorldSeeds;
    use crate::tilemap::Tilemap;
    use crate::world::TerrainCell;

    /// Build a world from explicit elevations; ocean below 0.3, grassland above.
    fn world_from_elevations(rows: &[Vec<f32>]) -> WorldMap {
        let height = rows.len();
        let width = rows[0].len();
        let mut cells = Tilemap::new_with(width, height, TerrainCell::default());
        for (y, row) in rows.iter().enumerate() {
            for (x, &elevation) in row.iter().enumerate() {
                let biome = if elevation < 0.3 {
                    BiomeKind::Ocean
                } else {
                    BiomeKind::Grassland
                };
                cells.set(
                    x,
                    y,
                    TerrainCell {
                        elevation,
                        temperature: 0.5,
                        moisture: 0.5,
                        biome,
                        feature: None,
                    },
                );
            }
        }
        WorldMap {
            seeds: WorldSeeds::from_master(1),
            width,
            height,
            cells,
            features: PlacedFeatures::default(),
        }
    }

    fn ramp_world() -> WorldMap {
        // Elevation falls left to right into an ocean column.
        let rows: Vec<Vec<f32>> = (0..6)
            .map(|_| (0..8).map(|x| 0.95 - x as f32 * 0.1).collect())
            .collect();
        world_from_elevations(&rows)
    }

    #[test]
    fn test_paths_never_climb() {
        let mut world = ramp_world();
        let rivers = trace_rivers(&mut world, 42);
        assert!(!rivers.is_empty());
        for path in &rivers {
            for pair in path.windows(2) {
                let a = world.cells.get(pair[0].0, pair[0].1).elevation;
                let b = world.cells.get(pair[1].0, pair[1].1).elevation;
                assert!(b <= a, "river climbed from {} to {}", a, b);
            }
        }
    }

    #[test]
    fn test_paths_are_bounded_and_connected() {
        let mut world = ramp_world();
        let bound = world.width + world.height;
        for path in trace_rivers(&mut world, 42) {
            assert!(path.len() <= bound);
            for pair in path.windows(2) {
                let dx = (pair[0].0 as i32 - pair[1].0 as i32).abs();
                let dy = (pair[0].1 as i32 - pair[1].1 as i32).abs();
                assert!(dx <= 1 && dy <= 1);
            }
        }
    }

    #[test]
    fn test_rivers_stop_before_ocean() {
        let mut world = ramp_world();
        for path in trace_rivers(&mut world, 42) {
            for &(x, y) in &path {
                assert_ne!(world.cells.get(x, y).biome, BiomeKind::Ocean);
            }
        }
    }

    #[test]
    fn test_flat_lowland_world_spawns_nothing() {
        let rows = vec![vec![0.4f32; 10]; 10];
        let mut world = world_from_elevations(&rows);
        assert!(trace_rivers(&mut world, 9).is_empty());
    }

    #[test]
    fn test_deterministic_traces() {
        let mut a = ramp_world();
        let mut b = ramp_world();
        assert_eq!(trace_rivers(&mut a, 5), trace_rivers(&mut b, 5));
    }
}
