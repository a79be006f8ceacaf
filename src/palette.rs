use std::sync::Arc;

use crate::config::CHART_COLORS;
use crate::error::{ChartError, ChartResult};

/// Flat RGB color. Every pixel written to a surface is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// Ordered, non-empty list of chart colors, indexed cyclically.
///
/// Cloning is cheap and clones share the same read-only storage, so one
/// palette can back any number of charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Arc<[Color]>,
}

impl Palette {
    pub fn new(colors: impl Into<Vec<Color>>) -> ChartResult<Self> {
        let colors: Vec<Color> = colors.into();
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.into(),
        })
    }

    /// Color for `index`, wrapping around the end of the palette.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: Arc::from(&CHART_COLORS[..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            Palette::new(Vec::<Color>::new()),
            Err(ChartError::EmptyPalette)
        ));
    }

    #[test]
    fn index_wraps_cyclically() {
        let red = Color::new(0xff, 0, 0);
        let blue = Color::new(0, 0, 0xff);
        let palette = Palette::new(vec![red, blue]).unwrap();
        assert_eq!(palette.color(0), red);
        assert_eq!(palette.color(1), blue);
        assert_eq!(palette.color(2), red);
        assert_eq!(palette.color(1_000_001), blue);
    }

    #[test]
    fn default_palette_has_five_chart_colors() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.color(1), Color::new(0xf9, 0x73, 0x16));
    }

    #[test]
    fn clones_share_storage() {
        let palette = Palette::default();
        let other = palette.clone();
        assert!(std::ptr::eq(palette.colors(), other.colors()));
    }
}
