use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use std::convert::Infallible;

/// In-memory 1-bit frame. `BinaryColor::On` is ink (black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width:  u32,
    height: u32,
    pixels: Vec<BinaryColor>,
}

impl Framebuffer {
    /// Blank (all white) frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BinaryColor::Off; (width as usize).saturating_mul(height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Colour at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y) == Some(BinaryColor::On)
    }

    /// Number of pixels that differ from `other` (which must be the same size).
    pub fn diff_count(&self, other: &[BinaryColor]) -> usize {
        self.pixels
            .iter()
            .zip(other)
            .filter(|(a, b)| a != b)
            .count()
    }

    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    /// Pixels outside the frame are clipped.
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point.x, point.y) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}
