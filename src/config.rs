use crate::palette::Color;
use crate::surface::Resolution;

// ============================================================================
// COLORS
// ============================================================================

/// Dashboard background, used to clear every surface.
pub const BACKGROUND: Color = Color::new(0x1e, 0x1e, 0x2e);

/// Default chart colors: blue, orange, pink, emerald, violet.
pub const CHART_COLORS: [Color; 5] = [
    Color::new(0x3b, 0x82, 0xf6),
    Color::new(0xf9, 0x73, 0x16),
    Color::new(0xec, 0x48, 0x99),
    Color::new(0x10, 0xb9, 0x81),
    Color::new(0x8b, 0x5c, 0xf6),
];

/// Drop shadow drawn one pixel behind each bar.
pub const SHADOW_COLOR: Color = Color::new(0x11, 0x18, 0x27);
/// Line chart backdrop and idle activity cells.
pub const GRID_COLOR: Color = Color::new(0x33, 0x41, 0x55);

// ============================================================================
// GEOMETRY
// ============================================================================

/// Logical resolutions. Lower means chunkier pixels.
pub mod pixel_scale {
    use super::Resolution;

    pub const SM: Resolution = Resolution::new_unchecked(32, 32);
    pub const MD: Resolution = Resolution::new_unchecked(64, 32);
    pub const LG: Resolution = Resolution::new_unchecked(64, 64);
    pub const XL: Resolution = Resolution::new_unchecked(128, 64);
    pub const ACTIVITY: Resolution = Resolution::new_unchecked(48, 20);

    pub fn by_name(name: &str) -> Option<Resolution> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sm" => Some(SM),
            "md" => Some(MD),
            "lg" => Some(LG),
            "xl" => Some(XL),
            _ => None,
        }
    }
}

pub const BAR_GAP: i32 = 1;
pub const GRID_ROW_SPACING: usize = 8;
pub const GRID_COLUMN_SPACING: usize = 16;
/// Side of the square block stamped at every line sample.
pub const LINE_STAMP: i32 = 2;
/// Distance kept between the pie disc and the surface edge.
pub const PIE_MARGIN: f64 = 2.0;

// ============================================================================
// ANIMATION
// ============================================================================

/// Per-chart easing rates and snap thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct EasingConfig {
    pub bar_rate: f64,
    pub line_rate: f64,
    pub grow_rate: f64,
    /// Snap threshold for bar and line values, in series units.
    pub value_epsilon: f64,
    /// Snap threshold for the pie grow progress, which lives in [0, 1].
    pub grow_epsilon: f64,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self {
            bar_rate: 0.1,
            line_rate: 0.05,
            grow_rate: 0.05,
            value_epsilon: 0.1,
            grow_epsilon: 0.001,
        }
    }
}

/// Layout of the procedural activity grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityGridConfig {
    pub columns: usize,
    pub rows: usize,
    /// Noise level above which a cell lights up.
    pub active_threshold: f64,
    /// Noise level above which a lit cell uses the accent color.
    pub hot_threshold: f64,
}

impl Default for ActivityGridConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 5,
            active_threshold: 0.5,
            hot_threshold: 1.2,
        }
    }
}
