use crate::raster::{RasterSink, Rgb, effective_stroke};
use glam::Vec2;
use std::path::Path;

/// Persistent CPU drawing surface.
///
/// Row-major RGB8 pixel buffer. Segments from every generation accumulate
/// here until [`Canvas::clear`] wipes the surface back to black; the
/// buffer is the only artifact that outlives a tree.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates an all-black canvas of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB8 pixel data, row-major, no padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fills the whole surface with black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reads one pixel.
    ///
    /// ### Panics
    /// Panics if `x` or `y` is outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height);
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Encodes the surface as an RGB8 PNG at `path`.
    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgb8,
        )
    }

    /// Writes one pixel, silently dropping coordinates off the canvas.
    #[inline]
    fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 3;
        self.pixels[i] = color[0];
        self.pixels[i + 1] = color[1];
        self.pixels[i + 2] = color[2];
    }

    /// Single-pixel Bresenham walk between two integer endpoints.
    ///
    /// Runs in `i64` so endpoints far outside the canvas cannot overflow
    /// the error terms.
    fn line_px(&mut self, mut x0: i64, mut y0: i64, x1: i64, y1: i64, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl RasterSink for Canvas {
    /// Draws a segment of the requested width.
    ///
    /// The stroke is resolved through [`effective_stroke`] first, then a
    /// width of `w` units stacks `w` single-pixel Bresenham lines offset
    /// along the minor axis, centered on the ideal line. Segments whose
    /// bounding box cannot touch the canvas are skipped outright; pixels
    /// that land outside are dropped one by one.
    fn draw_line(&mut self, p1: Vec2, p2: Vec2, color: Rgb, width: f32) {
        let (color, width) = effective_stroke(color, width);

        let margin = width as f32;
        if p1.x.max(p2.x) < -margin
            || p1.y.max(p2.y) < -margin
            || p1.x.min(p2.x) >= self.width as f32 + margin
            || p1.y.min(p2.y) >= self.height as f32 + margin
        {
            return;
        }

        let (x0, y0) = (p1.x as i64, p1.y as i64);
        let (x1, y1) = (p2.x as i64, p2.y as i64);
        let steep = (y1 - y0).abs() > (x1 - x0).abs();

        let w = width as i64;
        for off in -(w / 2)..(w - w / 2) {
            if steep {
                self.line_px(x0 + off, y0, x1 + off, y1, color);
            } else {
                self.line_px(x0, y0 + off, x1, y1 + off, color);
            }
        }
    }
}
