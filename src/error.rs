/// Convenience result type used across the crate.
pub type ChartResult<T> = Result<T, ChartError>;

/// Everything that can go wrong at the boundary of the renderer.
///
/// Nothing inside a render tick returns an error; degenerate series are
/// handled by policy. These variants cover construction and the desktop host.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("resolution must be positive in both dimensions, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("easing rate must lie strictly between 0 and 1, got {0}")]
    InvalidEasingRate(f64),

    #[error("snap epsilon must be positive, got {0}")]
    InvalidEpsilon(f64),

    #[error("frame rate must be positive, got {0}")]
    InvalidFramerate(f64),

    #[error("unknown chart kind `{0}` (expected bar, line, pie or activity)")]
    UnknownChartKind(String),

    #[error("invalid sample `{0}` in series")]
    InvalidSample(String),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Pixels(#[from] pixels::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ChartError::InvalidResolution {
            width: 0,
            height: 32,
        };
        assert_eq!(
            err.to_string(),
            "resolution must be positive in both dimensions, got 0x32"
        );
        assert!(ChartError::InvalidEasingRate(1.5).to_string().contains("1.5"));
        assert!(ChartError::UnknownChartKind("radar".into())
            .to_string()
            .contains("`radar`"));
    }
}
