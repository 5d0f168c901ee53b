//=========================================================================
// Platform Subsystem
//
// Hosts a sketch in a Winit window and drives an `EventSink` from it.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────────┐
//  │  Winit Event Loop                          │
//  │   ├─ CursorMoved / MouseInput / Wheel      │
//  │   ├─ KeyboardInput / Touch / Resized       │
//  │   │     ↓                                  │
//  │   │  InputTranslator → SceneEvent(s)       │
//  │   │     ↓                                  │
//  │   │  EventSink::emit ──→ SceneManager      │
//  │   │                      ::dispatch_event  │
//  │   └─ RedrawRequested                       │
//  │         ↓                                  │
//  │      EventSink::emit_draw ──→ SceneManager │
//  │                               ::tick       │
//  └────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame**: one draw tick per redraw, and the next
//   redraw is requested immediately (continuous animation)
// - **Input is forwarded immediately**: events reach scenes in arrival
//   order, between frames
// - **First listener error ends the run**: the loop exits and `run`
//   returns the error
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Sketch::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_translator;

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::SketchConfig;
use crate::core::error::SceneError;
use crate::core::input::SceneEvent;
use crate::core::platform_bridge::{wire, EventSink, SharedSceneManager};
use input_translator::InputTranslator;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    /// The OS refused to open the sketch window.
    #[error("Window creation failed: {0}")]
    WindowCreation(#[source] OsError),

    /// A scene hook or host listener failed.
    #[error(transparent)]
    Scene(#[from] anyhow::Error),
}

//=== Sketch ==============================================================

/// A window that drives an [`EventSink`].
///
/// # Lifecycle
///
/// 1. **Construction**: `Sketch::new(config, sink)` or `Sketch::wired(..)`
/// 2. **Execution**: `sketch.run()` opens the window and blocks
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window closed or a listener failed
///
/// # Thread Safety
///
/// Not Send/Sync; listeners and the shared scene manager stay on the
/// main thread.
///
/// # Examples
///
/// ```no_run
/// use sketch_scenes::prelude::*;
///
/// struct Blank;
/// impl Scene for Blank {}
/// impl SceneFactory for Blank {
///     fn create(_init: SceneInit<'_, ()>) -> Self { Blank }
/// }
///
/// let manager = SceneManager::new().into_shared();
/// manager.borrow_mut().activate::<Blank>()?;
///
/// Sketch::wired(SketchConfig::default(), &manager)?.run()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Sketch {
    /// Window and input settings.
    config: SketchConfig,

    /// Receives the draw tick and translated input.
    sink: EventSink,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Converts Winit input to scene events.
    translator: InputTranslator,

    /// Error that ended the run, reported by `run()`.
    failure: Option<PlatformError>,
}

impl Sketch {
    //--- Construction -----------------------------------------------------

    /// Creates a sketch around an existing sink.
    ///
    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(config: SketchConfig, sink: EventSink) -> Self {
        info!(target: "platform", "Sketch \"{}\" initialized", config.title);
        let translator = InputTranslator::new(Duration::from_millis(config.double_click_ms));
        Self {
            config,
            sink,
            window: None,
            translator,
            failure: None,
        }
    }

    /// Creates a sketch with `manager` wired for the standard events and
    /// the config's `extra_events`.
    ///
    /// # Errors
    ///
    /// [`SceneError::ManagerBusy`] if `manager` is mutably borrowed.
    pub fn wired<C: 'static>(
        config: SketchConfig,
        manager: &SharedSceneManager<C>,
    ) -> Result<Self, SceneError> {
        let mut sink = EventSink::new();
        wire(manager, &mut sink, &config.extra_event_names())?;
        Ok(Self::new(config, sink))
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs the event loop until it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop or window cannot be
    /// created, or [`PlatformError::Scene`] with the first listener error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, Window::scale_factor)
    }

    fn logical(&self, position: PhysicalPosition<f64>) -> (f64, f64) {
        let logical = position.to_logical::<f64>(self.scale_factor());
        (logical.x, logical.y)
    }

    fn emit_all(&mut self, event_loop: &ActiveEventLoop, events: Vec<SceneEvent>) {
        for event in events {
            self.emit(event_loop, event);
        }
    }

    fn emit(&mut self, event_loop: &ActiveEventLoop, event: SceneEvent) {
        if self.failure.is_some() {
            return;
        }

        trace!(target: "platform::input", "Emitting {}", event.name());
        if let Err(e) = self.sink.emit(&event) {
            self.fail(event_loop, e.into());
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: PlatformError) {
        error!(target: "platform", "Stopping sketch: {}", failure);
        self.failure = Some(failure);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Sketch {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, PlatformError::WindowCreation(e)),
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.logical(position);
                let event = self.translator.cursor_moved(x, y);
                self.emit(event_loop, event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let events = self.translator.mouse_button(button, state, Instant::now());
                self.emit_all(event_loop, events);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.translator.mouse_wheel(delta);
                self.emit(event_loop, event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let events = self.translator.key(
                    key_event.physical_key,
                    key_event.state,
                    key_event.text.as_deref(),
                );
                if events.is_empty() {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
                self.emit_all(event_loop, events);
            }

            WindowEvent::Touch(touch) => {
                let (x, y) = self.logical(touch.location);
                let event = self.translator.touch(touch.phase, touch.id, x, y);
                self.emit(event_loop, event);
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<u32>(self.scale_factor());
                let event = self.translator.resized(logical.width, logical.height);
                self.emit(event_loop, event);
            }

            WindowEvent::RedrawRequested => {
                if self.failure.is_some() {
                    return;
                }

                if let Err(e) = self.sink.emit_draw() {
                    self.fail(event_loop, e.into());
                    return;
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Focused, Moved, ScaleFactorChanged, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
