use tracing::debug;

use super::{max_magnitude, ChartRenderer};
use crate::animator::{AnimatedSeries, ValueAnimator};
use crate::config::{GRID_COLOR, GRID_COLUMN_SPACING, GRID_ROW_SPACING, LINE_STAMP};
use crate::palette::{Color, Palette};
use crate::surface::PixelSurface;

/// Trend line over a static grid, rasterized as chunky 2x2 stamps.
pub struct LineChartRenderer {
    line: Color,
    grid: Color,
    animator: ValueAnimator,
    series: Vec<f64>,
    values: AnimatedSeries,
}

impl LineChartRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            line: palette.color(1),
            grid: GRID_COLOR,
            animator: ValueAnimator::new_unchecked(0.05, 0.1),
            series: Vec::new(),
            values: AnimatedSeries::new(),
        }
    }

    pub fn with_animator(mut self, animator: ValueAnimator) -> Self {
        self.animator = animator;
        self
    }

    pub fn values(&self) -> &AnimatedSeries {
        &self.values
    }

    fn draw_grid(&self, surface: &mut PixelSurface) {
        let w = surface.width();
        let h = surface.height();
        for y in (0..h).step_by(GRID_ROW_SPACING) {
            surface.fill_rect(0, y, w, 1, self.grid);
        }
        for x in (0..w).step_by(GRID_COLUMN_SPACING) {
            surface.fill_rect(x, 0, 1, h, self.grid);
        }
    }
}

/// Narrow `[t0, t1]` to the parameters where `start + delta * t` stays
/// within `[lo, hi]`. Returns false once the range is empty.
fn clip_axis(start: f64, delta: f64, lo: f64, hi: f64, t0: &mut f64, t1: &mut f64) -> bool {
    if delta == 0.0 {
        return start >= lo && start <= hi;
    }
    let a = (lo - start) / delta;
    let b = (hi - start) / delta;
    *t0 = t0.max(a.min(b));
    *t1 = t1.min(a.max(b));
    *t0 <= *t1
}

/// Grid cells visited when walking from `from` to `to` at roughly one
/// sample per pixel of length, keeping only those whose stamp can touch a
/// `width` x `height` surface.
///
/// The walk is clipped to the surface before sampling, so the work stays
/// proportional to the visible part of the segment. Both endpoints are
/// included when visible; a zero-length segment yields its single point.
pub fn segment_samples(
    from: (f64, f64),
    to: (f64, f64),
    width: i32,
    height: i32,
) -> Vec<(i32, i32)> {
    let visible = |(x, y): (i32, i32)| {
        x > -LINE_STAMP && y > -LINE_STAMP && x < width && y < height
    };
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.hypot(dy).ceil();
    if !steps.is_finite() {
        return Vec::new();
    }
    if steps == 0.0 {
        let point = (from.0.floor() as i32, from.1.floor() as i32);
        return if visible(point) { vec![point] } else { Vec::new() };
    }

    let margin = f64::from(LINE_STAMP);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    if !clip_axis(from.0, dx, -margin, f64::from(width), &mut t0, &mut t1)
        || !clip_axis(from.1, dy, -margin, f64::from(height), &mut t0, &mut t1)
    {
        return Vec::new();
    }

    // The clipped span never needs more samples than the padded diagonal.
    let first = (t0 * steps).floor();
    let last = (t1 * steps).ceil().min(steps);
    let diagonal = f64::from(width + 2 * LINE_STAMP).hypot(f64::from(height + 2 * LINE_STAMP));
    let count = (last - first).max(0.0).min(diagonal.ceil() + 2.0) as usize;

    let mut samples = Vec::with_capacity(count + 1);
    for k in 0..=count {
        let t = (first + k as f64) / steps;
        let point = (
            (from.0 + dx * t).floor() as i32,
            (from.1 + dy * t).floor() as i32,
        );
        if visible(point) {
            samples.push(point);
        }
    }
    samples
}

impl ChartRenderer for LineChartRenderer {
    fn set_series(&mut self, series: &[f64]) {
        debug!(len = series.len(), "line series updated");
        self.series.clear();
        self.series.extend_from_slice(series);
    }

    fn draw(&mut self, surface: &mut PixelSurface, _frame: u64) {
        self.values.retarget(&self.series);
        self.values.step_all(&self.animator);

        self.draw_grid(surface);

        let w = f64::from(surface.width());
        let h = f64::from(surface.height());
        let max = max_magnitude(&self.series);
        let step_x = w / self.values.len().saturating_sub(1).max(1) as f64;

        let points: Vec<(f64, f64)> = self
            .values
            .currents()
            .enumerate()
            .map(|(i, current)| (i as f64 * step_x, h - current / max * h))
            .collect();

        let (width, height) = (surface.width(), surface.height());
        for pair in points.windows(2) {
            for (x, y) in segment_samples(pair[0], pair[1], width, height) {
                surface.fill_rect(x, y, LINE_STAMP, LINE_STAMP, self.line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{pixel_scale, BACKGROUND, CHART_COLORS};

    fn run(series: &[f64], frames: u64) -> (LineChartRenderer, PixelSurface) {
        let mut chart = LineChartRenderer::new(Palette::default());
        let mut surface = PixelSurface::new(pixel_scale::MD, BACKGROUND);
        chart.set_series(series);
        for f in 1..=frames {
            surface.clear();
            chart.draw(&mut surface, f);
        }
        (chart, surface)
    }

    fn grid_only(surface: &PixelSurface) -> bool {
        (0..surface.height()).all(|y| {
            (0..surface.width()).all(|x| {
                let on_grid = y as usize % GRID_ROW_SPACING == 0
                    || x as usize % GRID_COLUMN_SPACING == 0;
                let expected = if on_grid { GRID_COLOR } else { BACKGROUND };
                surface.pixel(x, y) == Some(expected)
            })
        })
    }

    #[test]
    fn samples_cover_both_endpoints() {
        let samples = segment_samples((0.0, 0.0), (4.0, 0.0), 64, 32);
        assert_eq!(samples, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn samples_floor_fractional_points() {
        let samples = segment_samples((0.5, 1.9), (3.5, 5.9), 64, 32);
        assert_eq!(samples.first(), Some(&(0, 1)));
        assert_eq!(samples.last(), Some(&(3, 5)));
        assert_eq!(samples.len(), 6);
    }

    #[test]
    fn zero_length_segment_yields_one_point() {
        assert_eq!(segment_samples((2.7, 3.2), (2.7, 3.2), 64, 32), vec![(2, 3)]);
    }

    #[test]
    fn samples_outside_the_surface_are_skipped() {
        assert!(segment_samples((0.0, 40.0), (64.0, 3.2e7), 64, 32).is_empty());
        assert!(segment_samples((9.0, -9.0), (9.0, -9.0), 64, 32).is_empty());
        assert!(segment_samples((-1.5, 0.0), (-1.5, 0.0), 64, 32).is_empty());
        // A stamp one pixel above and left of the surface still shows.
        assert_eq!(segment_samples((-0.5, -0.5), (-0.5, -0.5), 64, 32), vec![(-1, -1)]);
    }

    #[test]
    fn steep_segment_only_walks_the_visible_span() {
        let samples = segment_samples((0.0, -1e7), (64.0, 1e7), 64, 32);
        assert!(!samples.is_empty());
        assert!(samples.len() <= 64, "walked {} samples", samples.len());
        assert!(samples.iter().all(|&(x, y)| (31..=32).contains(&x) && (-1..32).contains(&y)));
    }

    #[test]
    fn huge_negative_sample_still_draws_quickly() {
        let (_, surface) = run(&[-1e9, 10.0], 3);
        assert!(surface.count(CHART_COLORS[1]) > 0);
    }

    #[test]
    fn empty_and_single_point_series_draw_only_the_grid() {
        let (_, surface) = run(&[], 3);
        assert!(grid_only(&surface));
        let (_, surface) = run(&[42.0], 3);
        assert!(grid_only(&surface));
    }

    #[test]
    fn all_zero_series_runs_along_the_bottom() {
        let (_, surface) = run(&[0.0, 0.0, 0.0], 1);
        let line = CHART_COLORS[1];
        // Points sit at y = height, so only stamps clipped to nothing remain
        // above the bottom edge.
        assert_eq!(surface.count(line), 0);
        assert!(grid_only(&surface));
    }

    #[test]
    fn settled_line_is_drawn_on_top_of_grid() {
        let (chart, surface) = run(&[0.0, 10.0], 300);
        assert!(chart.values().is_settled());
        let line = CHART_COLORS[1];
        // Diagonal from bottom left to top right; the origin column is grid.
        assert_eq!(surface.pixel(0, 31), Some(line));
        assert_eq!(surface.pixel(63, 0), Some(line));
        assert!(surface.count(line) > 64);
    }

    #[test]
    fn line_animates_slower_than_bars() {
        let (chart, _) = run(&[0.0, 10.0], 10);
        let current = chart.values().get(1).unwrap().current;
        assert!(current > 0.0 && current < 5.0);
    }
}
