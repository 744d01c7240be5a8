//! Seed management for world generation
//!
//! Provides separate seeds for each pipeline stage, derived deterministically
//! from the master seed. Stages stay independently reproducible: adding or
//! removing one feature stage never perturbs the random sequence of another.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all generation stages.
#[derive(Clone, Debug)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Elevation synthesis
    pub heightmap: u64,
    /// Temperature perturbation noise
    pub temperature: u64,
    /// Moisture field noise
    pub moisture: u64,
    /// City site tie-breaking
    pub cities: u64,
    /// River spawn selection
    pub rivers: u64,
    /// Volcano subset selection
    pub volcanoes: u64,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            heightmap: derive_seed(master, "heightmap"),
            temperature: derive_seed(master, "temperature"),
            moisture: derive_seed(master, "moisture"),
            cities: derive_seed(master, "cities"),
            rivers: derive_seed(master, "rivers"),
            volcanoes: derive_seed(master, "volcanoes"),
        }
    }
}

/// Derive a sub-seed from a master seed and a stage name.
/// Uses hashing to ensure different stages get different but deterministic seeds.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}
