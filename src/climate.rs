//! Latitude-driven climate synthesis
//!
//! Temperature peaks at the map's vertical midpoint and falls toward both
//! edges, perturbed by noise so climate bands are not perfectly straight.
//! Moisture is an independent noise field. Both are pure functions of
//! position and their sub-seeds, computed before (and independent of) any
//! elevation data, so terrain shape never feeds back into climate.

use rayon::prelude::*;

use crate::noise_field::NoiseField;
use crate::tilemap::Tilemap;

/// Weight of the noise perturbation on latitude temperature.
const TEMPERATURE_NOISE_BLEND: f32 = 0.15;

/// Generate the temperature map. Row 0 and the last row are the cold
/// pole-analog edges; the midline is warmest.
pub fn generate_temperature(width: usize, height: usize, seed: u64, scale: f64) -> Tilemap<f32> {
    let field = NoiseField::new(seed, scale);
    let mid = (height as f32 - 1.0) / 2.0;

    let data: Vec<f32> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            let field = &field;
            (0..width).map(move |x| {
                // A single-row map sits on the warm midline.
                let latitude = if mid > 0.0 {
                    1.0 - (y as f32 - mid).abs() / mid
                } else {
                    1.0
                };
                let perturbation = (field.sample(x as f64, y as f64) as f32 - 0.5)
                    * 2.0
                    * TEMPERATURE_NOISE_BLEND;
                (latitude + perturbation).clamp(0.0, 1.0)
            })
        })
        .collect();

    Tilemap::from_vec(width, height, data)
}

/// Generate the moisture map from its own noise field.
pub fn generate_moisture(width: usize, height: usize, seed: u64, scale: f64) -> Tilemap<f32> {
    let field = NoiseField::new(seed, scale);

    let data: Vec<f32> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            let field = &field;
            (0..width).map(move |x| field.sample(x as f64, y as f64) as f32)
        })
        .collect();

    Tilemap::from_vec(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_peaks_at_midline() {
        let map = generate_temperature(16, 21, 3, 0.1);
        let row_avg = |y: usize| -> f32 {
            (0..16).map(|x| *map.get(x, y)).sum::<f32>() / 16.0
        };
        // Mid row is at least 0.85 before clamping, edges at most 0.15.
        assert!(row_avg(10) > row_avg(0));
        assert!(row_avg(10) > row_avg(20));
    }

    #[test]
    fn test_climate_values_in_unit_range() {
        let temperature = generate_temperature(12, 12, 9, 0.1);
        let moisture = generate_moisture(12, 12, 10, 0.1);
        for (_, _, &t) in temperature.iter() {
            assert!((0.0..=1.0).contains(&t));
        }
        for (_, _, &m) in moisture.iter() {
            assert!((0.0..=1.0).contains(&m));
        }
    }

    #[test]
    fn test_single_row_map_is_warm() {
        let map = generate_temperature(8, 1, 4, 0.1);
        for (_, _, &t) in map.iter() {
            assert!(t >= 0.85);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let a = generate_moisture(10, 10, 77, 0.1);
        let b = generate_moisture(10, 10, 77, 0.1);
        for (x, y, &v) in a.iter() {
            assert_eq!(v, *b.get(x, y));
        }
    }
}
