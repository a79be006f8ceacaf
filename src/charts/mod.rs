//! Per-frame chart rasterizers.

mod activity;
mod bar;
mod line;
mod pie;

use std::fmt;
use std::str::FromStr;

pub use activity::ActivityGridRenderer;
pub use bar::BarChartRenderer;
pub use line::{segment_samples, LineChartRenderer};
pub use pie::{polar_angle, slice_boundaries, slice_index, slice_spans, PieChartRenderer};

use crate::animator::ValueAnimator;
use crate::config::{pixel_scale, ActivityGridConfig, EasingConfig};
use crate::error::{ChartError, ChartResult};
use crate::palette::Palette;
use crate::surface::{PixelSurface, Resolution};

/// A chart that owns its animation state and redraws itself every frame.
pub trait ChartRenderer {
    /// Replace the series being displayed. The renderer keeps its own copy.
    fn set_series(&mut self, _series: &[f64]) {}

    /// Shift the palette index used for the first element.
    fn set_color_offset(&mut self, _offset: usize) {}

    /// Advance animation by one tick and rasterize into an already cleared
    /// surface.
    fn draw(&mut self, surface: &mut PixelSurface, frame: u64);
}

/// Scale reference for bar heights and line points: the largest sample,
/// but never below 1.
pub(crate) fn max_magnitude(series: &[f64]) -> f64 {
    series.iter().copied().fold(1.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Activity,
}

impl ChartKind {
    pub fn default_resolution(self) -> Resolution {
        match self {
            ChartKind::Bar | ChartKind::Line => pixel_scale::MD,
            ChartKind::Pie => pixel_scale::SM,
            ChartKind::Activity => pixel_scale::ACTIVITY,
        }
    }

    pub fn build(
        self,
        palette: Palette,
        color_offset: usize,
        easing: &EasingConfig,
        activity: &ActivityGridConfig,
    ) -> ChartResult<Box<dyn ChartRenderer>> {
        let chart: Box<dyn ChartRenderer> = match self {
            ChartKind::Bar => Box::new(
                BarChartRenderer::new(palette)
                    .with_animator(ValueAnimator::new(easing.bar_rate, easing.value_epsilon)?)
                    .with_color_offset(color_offset),
            ),
            ChartKind::Line => Box::new(
                LineChartRenderer::new(palette)
                    .with_animator(ValueAnimator::new(easing.line_rate, easing.value_epsilon)?),
            ),
            ChartKind::Pie => Box::new(
                PieChartRenderer::new(palette)
                    .with_animator(ValueAnimator::new(easing.grow_rate, easing.grow_epsilon)?),
            ),
            ChartKind::Activity => {
                Box::new(ActivityGridRenderer::new(palette).with_layout(activity.clone()))
            }
        };
        Ok(chart)
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "activity" | "grid" => Ok(ChartKind::Activity),
            other => Err(ChartError::UnknownChartKind(other.to_string())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Activity => "activity",
        })
    }
}
