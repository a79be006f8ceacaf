//! Fixed-resolution RGBA raster that the charts draw into.
//!
//! The buffer is laid out exactly like a `pixels` frame (row-major, four bytes
//! per pixel) so the host can copy it straight into the GPU texture, which is
//! then magnified with nearest-neighbor sampling.

use crate::error::{ChartError, ChartResult};
use crate::palette::Color;

/// Logical pixel grid of a surface. Fixed for the lifetime of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    pub(crate) const fn new_unchecked(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn width(self) -> u32 {
        self.width
    }

    pub const fn height(self) -> u32 {
        self.height
    }

    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

pub struct PixelSurface {
    resolution: Resolution,
    background: Color,
    frame: Vec<u8>,
}

impl PixelSurface {
    pub fn new(resolution: Resolution, background: Color) -> Self {
        let mut surface = Self {
            resolution,
            background,
            frame: vec![0; resolution.pixel_count() * 4],
        };
        surface.clear();
        surface
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> i32 {
        self.resolution.width as i32
    }

    pub fn height(&self) -> i32 {
        self.resolution.height as i32
    }

    /// Paint every pixel with the background color.
    pub fn clear(&mut self) {
        let rgba = self.background.to_rgba();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Fill the axis-aligned rectangle at integer origin `(x, y)`.
    ///
    /// Parts outside the surface are clipped; a non-positive width or height
    /// draws nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width).min(self.width());
        let y1 = y.saturating_add(height).min(self.height());
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let rgba = color.to_rgba();
        let stride = self.resolution.width as usize * 4;
        for row in y0 as usize..y1 as usize {
            let start = row * stride + x0 as usize * 4;
            let end = row * stride + x1 as usize * 4;
            for chunk in self.frame[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.resolution.width as usize + x as usize) * 4;
        let px = &self.frame[idx..idx + 4];
        Some(Color::new(px[0], px[1], px[2]))
    }

    /// Raw RGBA bytes, row-major.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Color) -> usize {
        let rgba = color.to_rgba();
        self.frame
            .chunks_exact(4)
            .filter(|px| **px == rgba[..])
            .count()
    }
}
