//! ANSI text rendering
//!
//! Maps each cell to a glyph and a 24-bit color pair from the shared biome
//! lookup; an overlay feature replaces the glyph of the biome it sits on.
//! Every row renders to exactly `width` printable characters plus escapes.

use crate::biomes::BiomeKind;
use crate::features::Feature;
use crate::world::{TerrainCell, WorldMap};

/// Get the glyph for a biome.
pub fn biome_char(biome: BiomeKind) -> char {
    match biome {
        BiomeKind::Ocean => '~',
        BiomeKind::Coast => '.',
        BiomeKind::Desert => 'd',
        BiomeKind::Grassland => '"',
        BiomeKind::Forest => 'T',
        BiomeKind::Swamp => 'S',
        BiomeKind::Tundra => ':',
        BiomeKind::Mountain => '^',
        BiomeKind::IceCap => '#',
    }
}

/// Get the glyph for an overlay feature.
pub fn feature_char(feature: Feature) -> char {
    match feature {
        Feature::City => '@',
        Feature::River => '≈',
        Feature::Road => '+',
        Feature::Volcano => '▲',
    }
}

/// Glyph and color pair for one cell.
fn cell_glyph(cell: &TerrainCell) -> (char, [u8; 3], [u8; 3]) {
    let bg = cell.biome.color();
    match cell.feature {
        Some(feature) => (feature_char(feature), feature.color(), bg),
        None => (biome_char(cell.biome), contrast_color(bg), bg),
    }
}

/// Contrasting foreground for a background color, chosen by luminance.
fn contrast_color(color: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = color;
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luminance > 128.0 {
        [
            r.saturating_sub(60),
            g.saturating_sub(60),
            b.saturating_sub(60),
        ]
    } else {
        [
            r.saturating_add(80),
            g.saturating_add(80),
            b.saturating_add(80),
        ]
    }
}

/// Format a single character with ANSI true color (24-bit), foreground and background.
pub fn ansi_colored_char(ch: char, fg: [u8; 3], bg: [u8; 3]) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg[0], fg[1], fg[2], bg[0], bg[1], bg[2], ch
    )
}

/// Render the colored map, one line per grid row.
pub fn render(world: &WorldMap) -> String {
    // Each cell needs ~40 bytes of ANSI codes.
    let mut result = String::with_capacity(world.area() * 45);
    for y in 0..world.height {
        for x in 0..world.width {
            let (ch, fg, bg) = cell_glyph(world.cells.get(x, y));
            result.push_str(&ansi_colored_char(ch, fg, bg));
        }
        result.push('\n');
    }
    result
}

/// Render without color codes, for tests and dumb terminals.
pub fn render_plain(world: &WorldMap) -> String {
    let mut result = String::with_capacity((world.width + 1) * world.height);
    for y in 0..world.height {
        for x in 0..world.width {
            let cell = world.cells.get(x, y);
            let ch = match cell.feature {
                Some(feature) => feature_char(feature),
                None => biome_char(cell.biome),
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}
