//! Road network generation
//!
//! Connects city sites along a minimum spanning tree, routing each link
//! with Dijkstra over the 8-connected grid. Ocean is impassable and
//! elevation change is penalized, so roads hug low, even ground.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::debug;

use super::Feature;
use crate::biomes::BiomeKind;
use crate::world::WorldMap;

/// Cost added per unit of elevation change between adjacent cells.
const ELEVATION_COST: f32 = 8.0;

/// A routed road between two cities.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSegment {
    pub start: (usize, usize),
    pub end: (usize, usize),
    /// Every cell on the route, endpoints included.
    pub path: Vec<(usize, usize)>,
}

/// Node for the Dijkstra priority queue.
#[derive(Clone, Copy)]
struct PathNode {
    x: usize,
    y: usize,
    cost: f32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for PathNode {}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for a min-heap
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}

/// Route roads along the city MST and mark their cells.
pub fn build_road_network(world: &mut WorldMap, cities: &[(usize, usize)]) -> Vec<RoadSegment> {
    let mut segments = Vec::new();
    if cities.len() < 2 {
        return segments;
    }

    for (i, j) in compute_city_mst(cities) {
        let start = cities[i];
        let end = cities[j];
        match find_path(world, start, end) {
            Some(path) => {
                for &(x, y) in &path {
                    let cell = world.cells.get_mut(x, y);
                    if Feature::Road.can_claim(cell.feature) {
                        cell.feature = Some(Feature::Road);
                    }
                }
                segments.push(RoadSegment { start, end, path });
            }
            // Cities on different landmasses stay unconnected.
            None => debug!("no overland route between {:?} and {:?}", start, end),
        }
    }
    segments
}

/// Minimum spanning tree over city sites using Prim's algorithm.
fn compute_city_mst(cities: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let n = cities.len();
    let mut in_mst = vec![false; n];
    let mut edges = Vec::new();

    // Priority queue: (negative squared distance, from, to)
    let mut pq: BinaryHeap<(i64, usize, usize)> = BinaryHeap::new();

    in_mst[0] = true;
    for j in 1..n {
        pq.push((-distance_sq(cities[0], cities[j]), 0, j));
    }

    while edges.len() < n - 1 {
        let Some((_, from, to)) = pq.pop() else {
            break;
        };
        if in_mst[to] {
            continue;
        }
        in_mst[to] = true;
        edges.push((from, to));

        for j in 0..n {
            if !in_mst[j] {
                pq.push((-distance_sq(cities[to], cities[j]), to, j));
            }
        }
    }
    edges
}

fn distance_sq(a: (usize, usize), b: (usize, usize)) -> i64 {
    let dx = a.0 as i64 - b.0 as i64;
    let dy = a.1 as i64 - b.1 as i64;
    dx * dx + dy * dy
}

/// Dijkstra over the grid graph. Returns the cheapest route, or `None`
/// when every route would cross ocean.
fn find_path(
    world: &WorldMap,
    start: (usize, usize),
    end: (usize, usize),
) -> Option<Vec<(usize, usize)>> {
    let mut cost_map: HashMap<(usize, usize), f32> = HashMap::new();
    let mut came_from: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    let mut pq = BinaryHeap::new();

    cost_map.insert(start, 0.0);
    pq.push(PathNode {
        x: start.0,
        y: start.1,
        cost: 0.0,
    });

    while let Some(PathNode { x, y, cost }) = pq.pop() {
        if (x, y) == end {
            let mut path = vec![(x, y)];
            let mut current = (x, y);
            while let Some(&previous) = came_from.get(&current) {
                path.push(previous);
                current = previous;
            }
            path.reverse();
            return Some(path);
        }

        // Stale queue entry for a node already settled cheaper.
        if let Some(&best) = cost_map.get(&(x, y)) {
            if cost > best {
                continue;
            }
        }

        for (nx, ny) in world.cells.neighbors_8(x, y) {
            let mut step = step_cost(world, (x, y), (nx, ny));
            if !step.is_finite() {
                continue;
            }
            if nx != x && ny != y {
                step *= 1.414;
            }

            let new_cost = cost + step;
            let current_cost = cost_map.get(&(nx, ny)).copied().unwrap_or(f32::INFINITY);
            if new_cost < current_cost {
                cost_map.insert((nx, ny), new_cost);
                came_from.insert((nx, ny), (x, y));
                pq.push(PathNode {
                    x: nx,
                    y: ny,
                    cost: new_cost,
                });
            }
        }
    }

    None
}

/// Cost of stepping onto a cell.
fn step_cost(world: &WorldMap, from: (usize, usize), to: (usize, usize)) -> f32 {
    let to_cell = world.cells.get(to.0, to.1);
    if to_cell.biome == BiomeKind::Ocean {
        return f32::INFINITY;
    }
    let from_elevation = world.cells.get(from.0, from.1).elevation;
    1.0 + (to_cell.elevation - from_elevation).abs() * ELEVATION_COST
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PlacedFeatures;
    use crate::seeds::WorldSeeds;
    use crate::tilemap::Tilemap;
    use crate::world::TerrainCell;

    fn land_world(width: usize, height: usize) -> WorldMap {
        let cell = TerrainCell {
            elevation: 0.5,
            temperature: 0.5,
            moisture: 0.5,
            biome: BiomeKind::Grassland,
            feature: None,
        };
        WorldMap {
            seeds: WorldSeeds::from_master(1),
            width,
            height,
            cells: Tilemap::new_with(width, height, cell),
            features: PlacedFeatures::default(),
        }
    }

    fn mark_city(world: &mut WorldMap, x: usize, y: usize) {
        world.cells.get_mut(x, y).feature = Some(Feature::City);
    }

    #[test]
    fn test_single_city_builds_no_roads() {
        let mut world = land_world(10, 10);
        mark_city(&mut world, 5, 5);
        assert!(build_road_network(&mut world, &[(5, 5)]).is_empty());
    }

    #[test]
    fn test_road_links_both_cities() {
        let mut world = land_world(12, 6);
        mark_city(&mut world, 1, 3);
        mark_city(&mut world, 10, 3);
        let segments = build_road_network(&mut world, &[(1, 3), (10, 3)]);
        assert_eq!(segments.len(), 1);

        let path = &segments[0].path;
        assert_eq!(*path.first().unwrap(), (1, 3));
        assert_eq!(*path.last().unwrap(), (10, 3));
        for pair in path.windows(2) {
            let dx = (pair[0].0 as i32 - pair[1].0 as i32).abs();
            let dy = (pair[0].1 as i32 - pair[1].1 as i32).abs();
            assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0));
        }
        // Interior cells are marked Road; endpoints keep their City claim.
        for &(x, y) in &path[1..path.len() - 1] {
            assert_eq!(world.cells.get(x, y).feature, Some(Feature::Road));
        }
        assert_eq!(world.cells.get(1, 3).feature, Some(Feature::City));
    }

    #[test]
    fn test_roads_route_around_ocean() {
        let mut world = land_world(11, 11);
        // A vertical ocean wall with a single land gap at the bottom row.
        for y in 0..10 {
            let cell = world.cells.get_mut(5, y);
            cell.biome = BiomeKind::Ocean;
            cell.elevation = 0.1;
        }
        mark_city(&mut world, 1, 1);
        mark_city(&mut world, 9, 1);
        let segments = build_road_network(&mut world, &[(1, 1), (9, 1)]);
        assert_eq!(segments.len(), 1);
        for &(x, y) in &segments[0].path {
            assert_ne!(world.cells.get(x, y).biome, BiomeKind::Ocean);
        }
    }

    #[test]
    fn test_islands_stay_unconnected() {
        let mut world = land_world(11, 5);
        for y in 0..5 {
            let cell = world.cells.get_mut(5, y);
            cell.biome = BiomeKind::Ocean;
            cell.elevation = 0.1;
        }
        mark_city(&mut world, 1, 2);
        mark_city(&mut world, 9, 2);
        assert!(build_road_network(&mut world, &[(1, 2), (9, 2)]).is_empty());
    }

    #[test]
    fn test_mst_spans_all_cities() {
        let cities = [(0, 0), (10, 0), (0, 10), (10, 10), (5, 5)];
        let edges = compute_city_mst(&cities);
        assert_eq!(edges.len(), cities.len() - 1);
    }
}
