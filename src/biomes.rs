//! Biome classification
//!
//! Maps (elevation, temperature, moisture) to a discrete biome through a
//! fixed sequence of threshold rules. Elevation bands are checked first:
//! water and peaks ignore climate entirely, and only the interior band is
//! split by the temperature/moisture quadrant. The rules are total over
//! [0,1]^3 and monotonic in elevation across the Ocean/Coast/interior/peak
//! bands.

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Elevation below this is open water.
pub const SEA_LEVEL: f32 = 0.30;
/// Elevation in [SEA_LEVEL, COAST_BAND) is shoreline.
pub const COAST_BAND: f32 = 0.37;
/// Elevation at or above this is peak terrain.
pub const PEAK_LEVEL: f32 = 0.75;
/// Peaks colder than this are permanently iced over.
pub const PEAK_COLD: f32 = 0.20;

// Interior climate quadrant cutoffs.
const COLD: f32 = 0.25;
const HOT: f32 = 0.60;
const ARID: f32 = 0.25;
const WET: f32 = 0.70;
const DAMP: f32 = 0.45;
const WARM: f32 = 0.50;

/// Discrete terrain classification for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BiomeKind {
    #[default]
    Ocean,
    Coast,
    Desert,
    Grassland,
    Forest,
    Swamp,
    Tundra,
    Mountain,
    IceCap,
}

impl BiomeKind {
    /// Base RGB color, shared by the text and raster renderers.
    pub fn color(self) -> [u8; 3] {
        match self {
            BiomeKind::Ocean => [18, 60, 140],
            BiomeKind::Coast => [194, 178, 128],
            BiomeKind::Desert => [210, 188, 120],
            BiomeKind::Grassland => [88, 152, 66],
            BiomeKind::Forest => [34, 102, 42],
            BiomeKind::Swamp => [66, 90, 60],
            BiomeKind::Tundra => [148, 160, 150],
            BiomeKind::Mountain => [136, 132, 128],
            BiomeKind::IceCap => [228, 236, 244],
        }
    }
}

/// Classify one cell. Total over [0,1]^3; the rule order is fixed and
/// elevation bands always win over climate.
pub fn classify(elevation: f32, temperature: f32, moisture: f32) -> BiomeKind {
    if elevation < SEA_LEVEL {
        return BiomeKind::Ocean;
    }
    if elevation < COAST_BAND {
        return BiomeKind::Coast;
    }
    if elevation >= PEAK_LEVEL {
        return if temperature < PEAK_COLD {
            BiomeKind::IceCap
        } else {
            BiomeKind::Mountain
        };
    }

    // Interior band: climate quadrant.
    if temperature < COLD {
        return BiomeKind::Tundra;
    }
    if moisture < ARID && temperature > HOT {
        return BiomeKind::Desert;
    }
    if moisture > WET {
        return if temperature > WARM {
            BiomeKind::Swamp
        } else {
            BiomeKind::Forest
        };
    }
    if moisture > DAMP {
        return BiomeKind::Forest;
    }
    BiomeKind::Grassland
}
