use std::f64::consts::TAU;

use tracing::debug;

use super::ChartRenderer;
use crate::animator::{AnimatedValue, ValueAnimator};
use crate::config::PIE_MARGIN;
use crate::palette::Palette;
use crate::surface::PixelSurface;

/// Filled disc split into contiguous wedges, one per sample, starting at
/// angle 0 and running in series order. The disc grows out from the center
/// every time the series changes.
pub struct PieChartRenderer {
    palette: Palette,
    animator: ValueAnimator,
    series: Vec<f64>,
    boundaries: Vec<f64>,
    grow: AnimatedValue,
}

impl PieChartRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            animator: ValueAnimator::new_unchecked(0.05, 0.001),
            series: Vec::new(),
            boundaries: Vec::new(),
            grow: AnimatedValue::new(0.0, 1.0),
        }
    }

    pub fn with_animator(mut self, animator: ValueAnimator) -> Self {
        self.animator = animator;
        self
    }

    /// Fraction of the full radius currently drawn.
    pub fn grow_progress(&self) -> f64 {
        self.grow.current
    }
}

/// Angular span of every slice. All zero when the series sums to zero.
pub fn slice_spans(series: &[f64]) -> Vec<f64> {
    let total: f64 = series.iter().sum();
    series
        .iter()
        .map(|&v| if total > 0.0 { TAU * v / total } else { 0.0 })
        .collect()
}

/// Cumulative end angle of every slice.
///
/// Boundaries from the last non-empty slice onward are pinned to exactly
/// `TAU` so that rounding in the running sum cannot leave a sliver of the
/// disc unassigned.
pub fn slice_boundaries(series: &[f64]) -> Vec<f64> {
    let spans = slice_spans(series);
    let mut acc = 0.0;
    let mut boundaries: Vec<f64> = spans
        .iter()
        .map(|span| {
            acc += span;
            acc
        })
        .collect();

    if let Some(last) = spans.iter().rposition(|&span| span > 0.0) {
        for boundary in &mut boundaries[last..] {
            *boundary = TAU;
        }
    }
    boundaries
}

/// First slice whose boundary lies strictly beyond `angle`.
pub fn slice_index(angle: f64, boundaries: &[f64]) -> Option<usize> {
    boundaries.iter().position(|&boundary| angle < boundary)
}

/// Angle of `(dx, dy)` in `[0, TAU)`, measured clockwise on screen from the
/// positive x axis.
pub fn polar_angle(dx: f64, dy: f64) -> f64 {
    let mut angle = dy.atan2(dx);
    if angle < 0.0 {
        angle += TAU;
    }
    if angle >= TAU {
        angle -= TAU;
    }
    angle
}

impl ChartRenderer for PieChartRenderer {
    fn set_series(&mut self, series: &[f64]) {
        debug!(len = series.len(), "pie series replaced, restarting growth");
        self.series.clear();
        self.series.extend_from_slice(series);
        self.boundaries = slice_boundaries(&self.series);
        self.grow = AnimatedValue::new(0.0, 1.0);
    }

    fn draw(&mut self, surface: &mut PixelSurface, _frame: u64) {
        self.animator.step(&mut self.grow);

        let w = surface.width();
        let h = surface.height();
        let cx = f64::from(w) / 2.0;
        let cy = f64::from(h) / 2.0;
        let radius = f64::from(w.min(h)) / 2.0 - PIE_MARGIN;
        let reach = radius * self.grow.current;

        for y in 0..h {
            for x in 0..w {
                let dx = f64::from(x) - cx;
                let dy = f64::from(y) - cy;
                if dx.hypot(dy) >= reach {
                    continue;
                }
                if let Some(slice) = slice_index(polar_angle(dx, dy), &self.boundaries) {
                    surface.fill_rect(x, y, 1, 1, self.palette.color(slice));
                }
            }
        }
    }
}
