// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animator;
pub mod charts;
pub mod config;
pub mod error;
pub mod palette;
pub mod render_loop;
pub mod series;
pub mod surface;

// External crate imports
use bon::Builder;
use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, info, warn};

// Standard library imports
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use animator::{AnimatedSeries, AnimatedValue, ValueAnimator};
pub use charts::{
    ActivityGridRenderer, BarChartRenderer, ChartKind, ChartRenderer, LineChartRenderer,
    PieChartRenderer,
};
pub use config::{ActivityGridConfig, EasingConfig};
pub use error::{ChartError, ChartResult};
pub use palette::{Color, Palette};
pub use render_loop::{FrameQueue, RenderLoop, Scheduler, TickHandle};
pub use series::parse_series;
pub use surface::{PixelSurface, Resolution};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Updates a host can push into a running chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCommand {
    SetSeries(Vec<f64>),
    SetColorOffset(usize),
}

#[derive(Debug, Clone, Builder)]
pub struct ChartConfig {
    #[builder(default = "Voxelboard".to_string())]
    pub title: String,
    #[builder(default = ChartKind::Bar)]
    pub kind: ChartKind,
    /// Logical pixel grid; falls back to the natural size for `kind`.
    pub resolution: Option<Resolution>,

    // Window configuration
    /// On-screen pixels per logical pixel when the window opens.
    #[builder(default = 10)]
    pub scale: u32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Colors
    #[builder(default)]
    pub palette: Palette,
    #[builder(default)]
    pub color_offset: usize,
    #[builder(default = config::BACKGROUND)]
    pub background: Color,

    // Animation
    #[builder(default)]
    pub easing: EasingConfig,
    #[builder(default)]
    pub activity: ActivityGridConfig,
}

impl ChartConfig {
    pub fn resolution(&self) -> Resolution {
        self.resolution
            .unwrap_or_else(|| self.kind.default_resolution())
    }
}

/// A chart bound to its surface and redraw loop, driven one frame at a time.
///
/// The desktop window advances it once per redraw; anything else (tests,
/// offscreen export) can call [`ChartSession::advance`] directly.
pub struct ChartSession {
    queue: FrameQueue,
    surface: Rc<RefCell<PixelSurface>>,
    chart: Rc<RefCell<Box<dyn ChartRenderer>>>,
    render_loop: RenderLoop<FrameQueue>,
}

impl ChartSession {
    pub fn new(config: &ChartConfig) -> ChartResult<Self> {
        let chart = config.kind.build(
            config.palette.clone(),
            config.color_offset,
            &config.easing,
            &config.activity,
        )?;
        let chart = Rc::new(RefCell::new(chart));
        let surface = Rc::new(RefCell::new(PixelSurface::new(
            config.resolution(),
            config.background,
        )));

        let queue = FrameQueue::new();
        let mut render_loop = RenderLoop::new(queue.clone());
        let drawn = Rc::clone(&chart);
        render_loop.start(Rc::clone(&surface), move |surface, frame| {
            drawn.borrow_mut().draw(surface, frame);
        });

        Ok(Self {
            queue,
            surface,
            chart,
            render_loop,
        })
    }

    pub fn apply(&mut self, command: ChartCommand) {
        let mut chart = self.chart.borrow_mut();
        match command {
            ChartCommand::SetSeries(series) => chart.set_series(&series),
            ChartCommand::SetColorOffset(offset) => chart.set_color_offset(offset),
        }
    }

    /// Apply every queued command without blocking.
    pub fn drain(&mut self, receiver: &Receiver<ChartCommand>) {
        while let Ok(command) = receiver.try_recv() {
            self.apply(command);
        }
    }

    /// Fire the pending tick. Returns the number of draws performed.
    pub fn advance(&mut self) -> usize {
        self.queue.run_frame()
    }

    pub fn surface(&self) -> Ref<'_, PixelSurface> {
        self.surface.borrow()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.render_loop.frames_drawn()
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn stop(&mut self) {
        self.render_loop.stop();
    }
}

/// Desktop window showing a single chart, magnified without smoothing.
#[derive(Debug, Clone)]
pub struct ChartWindow {
    config: ChartConfig,
    series: Vec<f64>,
}

impl ChartWindow {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    /// Series shown when the window opens.
    pub fn set_series(&mut self, series: impl Into<Vec<f64>>) {
        self.series = series.into();
    }

    pub fn show(&mut self) -> ChartResult<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(&mut self, receiver: Receiver<ChartCommand>) -> ChartResult<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(&self, receiver: Option<Receiver<ChartCommand>>) -> ChartResult<()> {
        if !(self.config.max_framerate > 0.0) {
            return Err(ChartError::InvalidFramerate(self.config.max_framerate));
        }

        let resolution = self.config.resolution();
        let scale = self.config.scale.max(1);

        let mut session = ChartSession::new(&self.config)?;
        session.apply(ChartCommand::SetSeries(self.series.clone()));

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                f64::from(resolution.width() * scale),
                f64::from(resolution.height() * scale),
            ))
            .with_min_inner_size(LogicalSize::new(
                f64::from(resolution.width()),
                f64::from(resolution.height()),
            ))
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        // The buffer stays at the logical resolution; pixels magnifies it to
        // the window with nearest-neighbor sampling.
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(resolution.width(), resolution.height(), surface_texture)?;

        info!(
            kind = %self.config.kind,
            width = resolution.width(),
            height = resolution.height(),
            "chart window opened"
        );

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::WaitUntil(last_frame + frame_duration));
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        session.stop();
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!(%err, "failed to resize surface");
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            session.drain(receiver);
                        }
                        session.advance();

                        pixels.frame_mut().copy_from_slice(session.surface().frame());
                        if let Err(err) = pixels.render() {
                            tracing::error!(%err, "failed to present frame");
                            session.stop();
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                Event::LoopExiting => {
                    debug!(frames = session.frames_drawn(), "event loop exiting");
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
