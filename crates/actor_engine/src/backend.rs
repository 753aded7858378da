//! Platform backend seam
//!
//! A backend is whatever owns the window: it produces input snapshots and
//! receives draw calls. [`HeadlessBackend`] replays scripted input into a
//! [`RecordingSurface`] and is what tests and the demo run on.

use crate::core::config::WindowConfig;
use crate::assets::Texture;
use crate::foundation::math::{Color, Rect};
use crate::input::{InputSnapshot, InputSource, ScriptedInput};
use crate::render::{RecordingSurface, RenderError, RenderSurface};

/// Window, input and renderer in one
pub trait Backend: InputSource + RenderSurface {
    /// Open the window and renderer.
    ///
    /// An error aborts startup; the frame loop never runs.
    fn initialize(&mut self, window: &WindowConfig) -> Result<(), RenderError>;

    /// Release the window and renderer
    fn shutdown(&mut self) {}
}

/// Backend without a window
#[derive(Debug, Default)]
pub struct HeadlessBackend<I = ScriptedInput> {
    input: I,
    surface: RecordingSurface,
    window: Option<WindowConfig>,
    init_failure: Option<String>,
    shut_down: bool,
}

impl<I: InputSource> HeadlessBackend<I> {
    /// Create a backend reading from `input` and recording every frame
    pub fn new(input: I) -> Self {
        Self {
            input,
            surface: RecordingSurface::new(),
            window: None,
            init_failure: None,
            shut_down: false,
        }
    }

    /// Record into a preconfigured surface (builder style)
    pub fn with_surface(mut self, surface: RecordingSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Make `initialize` fail with the given reason (builder style)
    pub fn failing_init(mut self, reason: impl Into<String>) -> Self {
        self.init_failure = Some(reason.into());
        self
    }

    /// Recorded frames
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Input source
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Window the backend was initialized with
    pub fn window(&self) -> Option<&WindowConfig> {
        self.window.as_ref()
    }

    /// Whether `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl<I: InputSource> InputSource for HeadlessBackend<I> {
    fn poll_input(&mut self) -> InputSnapshot {
        self.input.poll_input()
    }
}

impl<I> RenderSurface for HeadlessBackend<I> {
    fn clear(&mut self, color: Color) {
        self.surface.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface.fill_rect(rect, color);
    }

    fn blit(&mut self, texture: &Texture, source: Option<Rect>, dest: Rect, angle_degrees: f32) {
        self.surface.blit(texture, source, dest, angle_degrees);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.surface.present()
    }
}

impl<I: InputSource> Backend for HeadlessBackend<I> {
    fn initialize(&mut self, window: &WindowConfig) -> Result<(), RenderError> {
        if let Some(reason) = &self.init_failure {
            return Err(RenderError::Backend(reason.clone()));
        }
        log::info!(
            "Headless backend ready for '{}' ({}x{})",
            window.title,
            window.width,
            window.height
        );
        self.window = Some(window.clone());
        Ok(())
    }

    fn shutdown(&mut self) {
        log::info!(
            "Headless backend shut down after {} frame(s)",
            self.surface.frame_count()
        );
        self.shut_down = true;
    }
}
