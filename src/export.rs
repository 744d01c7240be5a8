//! Raster rendering and PNG export
//!
//! Builds an RGB pixel buffer from the same biome/feature color lookup the
//! text renderer uses, then upscales and encodes it. The encoder is an
//! optional capability: without the `raster` feature, `save_png` reports
//! what is missing instead of writing anything, and generation itself is
//! unaffected.

use crate::error::WorldGenError;
use crate::world::{TerrainCell, WorldMap};

/// Nearest-neighbor upscale factor for saved images.
pub const PIXEL_SCALE: u32 = 4;

/// RGB color of one cell; an overlay feature wins over the biome.
pub fn cell_color(cell: &TerrainCell) -> [u8; 3] {
    match cell.feature {
        Some(feature) => feature.color(),
        None => cell.biome.color(),
    }
}

/// Flat RGB8 pixel buffer at grid resolution, row-major like the grid.
pub fn render_pixels(world: &WorldMap) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(world.area() * 3);
    for y in 0..world.height {
        for x in 0..world.width {
            pixels.extend_from_slice(&cell_color(world.cells.get(x, y)));
        }
    }
    pixels
}

/// Encode the world as a PNG at `PIXEL_SCALE` times grid resolution.
#[cfg(feature = "raster")]
pub fn save_png(world: &WorldMap, path: &std::path::Path) -> Result<(), WorldGenError> {
    use image::imageops::FilterType;
    use image::{ImageBuffer, Rgb, RgbImage};

    let mut img: RgbImage = ImageBuffer::new(world.width as u32, world.height as u32);
    for y in 0..world.height {
        for x in 0..world.width {
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb(cell_color(world.cells.get(x, y))),
            );
        }
    }

    let scaled = image::imageops::resize(
        &img,
        world.width as u32 * PIXEL_SCALE,
        world.height as u32 * PIXEL_SCALE,
        FilterType::Nearest,
    );
    scaled.save(path)?;
    Ok(())
}

/// Raster writer stub compiled when the capability is absent. Fails before
/// touching the filesystem so no partial file is ever written.
#[cfg(not(feature = "raster"))]
pub fn save_png(_world: &WorldMap, _path: &std::path::Path) -> Result<(), WorldGenError> {
    Err(WorldGenError::CapabilityMissing {
        capability: "raster",
        hint: "recompile with the `raster` cargo feature (enabled by default) to write PNG images",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::world;

    #[test]
    fn test_pixel_buffer_matches_grid_size() {
        let config = WorldConfig::new(10, 6, 2, 0.1).unwrap();
        let map = world::generate(&config);
        assert_eq!(render_pixels(&map).len(), 10 * 6 * 3);
    }

    #[test]
    fn test_pixel_buffer_is_reproducible() {
        let config = WorldConfig::new(16, 12, 42, 0.1).unwrap();
        let a = world::generate(&config);
        let b = world::generate(&config);
        assert_eq!(render_pixels(&a), render_pixels(&b));
    }

    #[cfg(not(feature = "raster"))]
    #[test]
    fn test_missing_raster_capability_is_reported() {
        let config = WorldConfig::new(4, 4, 1, 0.1).unwrap();
        let map = world::generate(&config);
        let err = save_png(&map, std::path::Path::new("unwritten.png")).unwrap_err();
        assert!(matches!(err, WorldGenError::CapabilityMissing { .. }));
        assert!(!std::path::Path::new("unwritten.png").exists());
    }
}
