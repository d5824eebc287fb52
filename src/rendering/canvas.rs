//! Software rasterizer for headless frame capture.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::BarLayout;
use crate::emitter::BarRenderer;
use crate::engine::Highlight;
use crate::params::Palette;

/// CPU-side canvas that draws bars into an RGBA image
pub struct FrameCanvas {
    image: RgbaImage,
    layout: BarLayout,
    palette: Palette,
    max_value: u32,
}

impl FrameCanvas {
    pub fn new(layout: BarLayout, palette: Palette, max_value: u32) -> Self {
        let mut canvas = Self {
            image: RgbaImage::new(layout.canvas_width.max(1), layout.canvas_height.max(1)),
            layout,
            palette,
            max_value,
        };
        canvas.clear();
        canvas
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the current frame as PNG
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save(path)
    }

    fn clear(&mut self) {
        let background = Rgba(self.palette.background);
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }
}

impl BarRenderer for FrameCanvas {
    fn draw(&mut self, bars: &[u32], highlight: Option<Highlight>) {
        self.clear();

        let (width, height) = self.image.dimensions();
        for rect in self.layout.rects(bars, self.max_value, highlight) {
            let color = Rgba(rect.color(&self.palette));
            let x_end = (rect.x + rect.width).min(width);
            let y_end = (rect.y + rect.height).min(height);

            for y in rect.y..y_end {
                for x in rect.x..x_end {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }
}
