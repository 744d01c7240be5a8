//! Elevation synthesis
//!
//! Blends noise stacks sampled at three frequency multiples, then min-max
//! rescales so the grid always covers the full [0, 1] range. Biome
//! thresholds are ratios of that range, keeping them comparable across
//! seeds and scales regardless of raw noise amplitude.

use rayon::prelude::*;

use crate::noise_field::NoiseField;
use crate::tilemap::Tilemap;

/// Blend weights for the 1x/2x/4x frequency stacks.
const BLEND_WEIGHTS: [f64; 3] = [0.60, 0.25, 0.15];
const FREQUENCY_STEPS: [f64; 3] = [1.0, 2.0, 4.0];

/// Generate the normalized elevation map. Rows are computed in parallel;
/// every cell is a pure function of its coordinates, so the result is
/// identical to a serial fill.
pub fn generate_heightmap(width: usize, height: usize, seed: u64, scale: f64) -> Tilemap<f32> {
    let fields: Vec<NoiseField> = FREQUENCY_STEPS
        .iter()
        .map(|&step| NoiseField::new(seed, scale * step))
        .collect();

    let data: Vec<f32> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            let fields = &fields;
            (0..width).map(move |x| {
                let mut blended = 0.0;
                for (field, weight) in fields.iter().zip(BLEND_WEIGHTS) {
                    blended += weight * field.sample(x as f64, y as f64);
                }
                blended as f32
            })
        })
        .collect();

    let mut map = Tilemap::from_vec(width, height, data);
    normalize(&mut map);
    map
}

/// Min-max rescale to exactly [0, 1]. A flat field (for example a 1x1 map)
/// has no range to stretch and becomes uniform mid elevation instead.
pub fn normalize(map: &mut Tilemap<f32>) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for (_, _, &v) in map.iter() {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    let range = max - min;
    if range <= f32::EPSILON {
        map.fill(0.5);
        return;
    }
    for (_, _, v) in map.iter_mut() {
        *v = (*v - min) / range;
    }
}
