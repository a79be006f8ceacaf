use tracing::debug;

use super::{max_magnitude, ChartRenderer};
use crate::animator::{AnimatedSeries, ValueAnimator};
use crate::config::{BAR_GAP, SHADOW_COLOR};
use crate::palette::{Color, Palette};
use crate::surface::PixelSurface;

/// Vertical bars with a one pixel drop shadow.
pub struct BarChartRenderer {
    palette: Palette,
    color_offset: usize,
    shadow: Color,
    animator: ValueAnimator,
    series: Vec<f64>,
    values: AnimatedSeries,
}

impl BarChartRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            color_offset: 0,
            shadow: SHADOW_COLOR,
            animator: ValueAnimator::new_unchecked(0.1, 0.1),
            series: Vec::new(),
            values: AnimatedSeries::new(),
        }
    }

    pub fn with_animator(mut self, animator: ValueAnimator) -> Self {
        self.animator = animator;
        self
    }

    pub fn with_color_offset(mut self, offset: usize) -> Self {
        self.color_offset = offset;
        self
    }

    pub fn values(&self) -> &AnimatedSeries {
        &self.values
    }

    /// Width that tiles `count` bars plus their gaps across `surface_width`.
    /// Never below one pixel; overflow in that case is accepted.
    pub fn bar_width(surface_width: i32, count: usize) -> i32 {
        if count == 0 {
            return 0;
        }
        let count = count as i32;
        ((surface_width - BAR_GAP * (count - 1)) / count).max(1)
    }

    /// Pixel height of a bar showing `current` against `max`, floored and
    /// kept within `[0, surface_height]`.
    pub fn bar_height(current: f64, max: f64, surface_height: i32) -> i32 {
        let h = f64::from(surface_height);
        (current / max * h).min(h).floor().max(0.0) as i32
    }
}

impl ChartRenderer for BarChartRenderer {
    fn set_series(&mut self, series: &[f64]) {
        debug!(len = series.len(), "bar series updated");
        self.series.clear();
        self.series.extend_from_slice(series);
    }

    fn set_color_offset(&mut self, offset: usize) {
        self.color_offset = offset;
    }

    fn draw(&mut self, surface: &mut PixelSurface, _frame: u64) {
        self.values.retarget(&self.series);
        self.values.step_all(&self.animator);

        let w = surface.width();
        let h = surface.height();
        let max = max_magnitude(&self.series);
        let bar_w = Self::bar_width(w, self.values.len());

        for (i, current) in self.values.currents().enumerate() {
            let x = i as i32 * (bar_w + BAR_GAP);
            let bar_h = Self::bar_height(current, max, h);
            let y = h - bar_h;

            surface.fill_rect(x + 1, y + 1, bar_w, bar_h, self.shadow);
            surface.fill_rect(x, y, bar_w, bar_h, self.palette.color(i + self.color_offset));
        }
    }
}
