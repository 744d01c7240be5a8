//! Deterministic scalar noise fields
//!
//! Two interchangeable strategies share the sampling contract: coherent
//! gradient noise (multi-octave Perlin) when the `gradient-noise` capability
//! is compiled in, and a seeded hash field smoothed over a 3x3 neighborhood
//! otherwise. The strategy is chosen once at construction; the rest of the
//! pipeline only sees `sample`, which never fails.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[cfg(feature = "gradient-noise")]
use noise::{NoiseFn, Perlin};

/// Octave count for the gradient strategy.
pub const OCTAVES: u32 = 4;
/// Amplitude decay per octave.
#[cfg(feature = "gradient-noise")]
const PERSISTENCE: f64 = 0.5;
/// Frequency multiplier per octave.
#[cfg(feature = "gradient-noise")]
const LACUNARITY: f64 = 2.0;

/// Whether coherent gradient noise was compiled in.
pub fn gradient_available() -> bool {
    cfg!(feature = "gradient-noise")
}

/// A seeded scalar field over grid coordinates.
///
/// `sample(x, y)` lies in [0, 1] and depends only on (seed, frequency, x, y).
pub struct NoiseField {
    frequency: f64,
    strategy: Strategy,
}

enum Strategy {
    #[cfg(feature = "gradient-noise")]
    Gradient(Perlin),
    Fallback { seed: u64 },
}

impl NoiseField {
    /// Build a field for `seed` at the given base frequency, preferring the
    /// gradient strategy when available.
    pub fn new(seed: u64, frequency: f64) -> Self {
        #[cfg(feature = "gradient-noise")]
        {
            Self {
                frequency,
                strategy: Strategy::Gradient(Perlin::new(seed as u32)),
            }
        }
        #[cfg(not(feature = "gradient-noise"))]
        {
            Self::fallback(seed, frequency)
        }
    }

    /// Build a field pinned to the hash fallback strategy.
    pub fn fallback(seed: u64, frequency: f64) -> Self {
        Self {
            frequency,
            strategy: Strategy::Fallback { seed },
        }
    }

    /// Sample the field at a grid coordinate. Deterministic, in [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        match &self.strategy {
            #[cfg(feature = "gradient-noise")]
            Strategy::Gradient(perlin) => {
                let mut total = 0.0;
                let mut amplitude = 1.0;
                let mut frequency = self.frequency;
                let mut max_value = 0.0;
                for _ in 0..OCTAVES {
                    total += amplitude * perlin.get([x * frequency, y * frequency]);
                    max_value += amplitude;
                    amplitude *= PERSISTENCE;
                    frequency *= LACUNARITY;
                }
                ((total / max_value) * 0.5 + 0.5).clamp(0.0, 1.0)
            }
            Strategy::Fallback { seed } => {
                // Average the 3x3 cell neighborhood so the field is not pure static.
                let xi = x.floor() as i64;
                let yi = y.floor() as i64;
                let mixed = seed ^ self.frequency.to_bits();
                let mut sum = 0.0;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        sum += cell_hash(mixed, xi + dx, yi + dy);
                    }
                }
                sum / 9.0
            }
        }
    }
}

/// Hash one lattice cell to a value in [0, 1).
fn cell_hash(seed: u64, x: i64, y: i64) -> f64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    x.hash(&mut hasher);
    y.hash(&mut hasher);
    (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64
}
