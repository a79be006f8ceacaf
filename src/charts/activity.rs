use super::ChartRenderer;
use crate::config::{ActivityGridConfig, GRID_COLOR};
use crate::palette::{Color, Palette};
use crate::surface::PixelSurface;

/// Contribution-style grid whose cells shimmer with the frame counter.
/// It takes no series; the pattern is a pure function of the frame.
pub struct ActivityGridRenderer {
    layout: ActivityGridConfig,
    idle: Color,
    hot: Color,
}

impl ActivityGridRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            layout: ActivityGridConfig::default(),
            idle: GRID_COLOR,
            hot: palette.color(2),
        }
    }

    pub fn with_layout(mut self, layout: ActivityGridConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Noise driving cell `(column, row)` at `frame`.
    pub fn noise(column: usize, row: usize, frame: u64) -> f64 {
        (column as f64 * 0.5 + frame as f64 * 0.05).sin() + (row as f64 * 0.5).cos()
    }
}

impl ChartRenderer for ActivityGridRenderer {
    fn draw(&mut self, surface: &mut PixelSurface, frame: u64) {
        let cell_w = f64::from(surface.width()) / self.layout.columns as f64;
        let cell_h = f64::from(surface.height()) / self.layout.rows as f64;

        for row in 0..self.layout.rows {
            for column in 0..self.layout.columns {
                let noise = Self::noise(column, row, frame);
                if noise <= self.layout.active_threshold {
                    continue;
                }
                let color = if noise > self.layout.hot_threshold {
                    self.hot
                } else {
                    self.idle
                };
                surface.fill_rect(
                    (column as f64 * cell_w).floor() as i32,
                    (row as f64 * cell_h).floor() as i32,
                    cell_w.floor() as i32 - 1,
                    cell_h.floor() as i32 - 1,
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{pixel_scale, BACKGROUND, CHART_COLORS};

    fn render(frame: u64) -> PixelSurface {
        let mut chart = ActivityGridRenderer::new(Palette::default());
        let mut surface = PixelSurface::new(pixel_scale::ACTIVITY, BACKGROUND);
        chart.draw(&mut surface, frame);
        surface
    }

    #[test]
    fn cells_are_three_by_three_with_gutters() {
        // 48x20 split 12x5 gives 4x4 cells, drawn 3x3.
        let surface = render(1);
        let noise = ActivityGridRenderer::noise(1, 0, 1);
        assert!(noise > 1.2);
        assert_eq!(surface.pixel(4, 0), Some(CHART_COLORS[2]));
        assert_eq!(surface.pixel(6, 2), Some(CHART_COLORS[2]));
        assert_eq!(surface.pixel(7, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(4, 3), Some(BACKGROUND));
    }

    #[test]
    fn inactive_cells_stay_background() {
        // sin(3) + cos(2) is negative.
        let surface = render(0);
        assert!(ActivityGridRenderer::noise(6, 4, 0) <= 0.5);
        assert_eq!(surface.pixel(24, 16), Some(BACKGROUND));
    }

    #[test]
    fn pattern_moves_with_the_frame() {
        assert_ne!(render(1).frame(), render(40).frame());
        assert_eq!(render(7).frame(), render(7).frame());
    }

    #[test]
    fn idle_cells_use_grid_color() {
        // Column 2 row 3 at frame 0: sin(1) + cos(1.5) is about 0.91.
        let noise = ActivityGridRenderer::noise(2, 3, 0);
        assert!(noise > 0.5 && noise <= 1.2);
        assert_eq!(render(0).pixel(8, 12), Some(GRID_COLOR));
    }

    #[test]
    fn custom_layout_changes_cell_size() {
        let layout = ActivityGridConfig {
            columns: 1,
            rows: 1,
            active_threshold: -10.0,
            hot_threshold: 10.0,
        };
        let mut chart = ActivityGridRenderer::new(Palette::default()).with_layout(layout);
        let mut surface = PixelSurface::new(pixel_scale::ACTIVITY, BACKGROUND);
        chart.draw(&mut surface, 1);
        // One idle cell covering everything but the last row and column.
        assert_eq!(surface.count(GRID_COLOR), 47 * 19);
    }
}
