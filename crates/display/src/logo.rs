use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use image::{imageops::FilterType, GrayImage};
use std::path::Path;
use ticker_core::{Rect, Result, TickerError};

/// Pixels darker than this become ink.
const INK_THRESHOLD: u8 = 128;

/// Load an image file and turn it into ink pixels filling `area`.
pub fn load_logo(path: &Path, area: Rect) -> Result<Vec<Pixel<BinaryColor>>> {
    let image = image::open(path)
        .map_err(|e| TickerError::Config(format!("cannot load logo '{}': {e}", path.display())))?
        .to_luma8();
    Ok(rasterize(&image, area))
}

/// Scale `image` to `area` and threshold it to 1 bit.
pub fn rasterize(image: &GrayImage, area: Rect) -> Vec<Pixel<BinaryColor>> {
    if area.size.width == 0 || area.size.height == 0 {
        return Vec::new();
    }
    let scaled = image::imageops::resize(
        image,
        area.size.width,
        area.size.height,
        FilterType::Triangle,
    );

    scaled
        .enumerate_pixels()
        .filter(|(_, _, px)| px.0[0] < INK_THRESHOLD)
        .map(|(x, y, _)| {
            Pixel(
                Point::new(area.origin.x + x as i32, area.origin.y + y as i32),
                BinaryColor::On,
            )
        })
        .collect()
}
