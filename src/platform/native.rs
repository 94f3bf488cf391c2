//! Native backend: a winit window presented through wgpu
//!
//! winit is driven with `pump_app_events`, so the game keeps its own loop and
//! drains events once per frame instead of living inside `run_app`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::{Backend, Event};
use crate::renderer::{PresentState, Surface, SurfaceErrorAction};
use crate::settings::Tuning;

/// How long to wait for the platform to hand over the window at startup
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Collects winit callbacks between pumps
struct Handler {
    title: String,
    size: LogicalSize<f64>,
    frame_size: (u32, u32),

    window: Option<Arc<Window>>,
    create_error: Option<anyhow::Error>,

    events: Vec<Event>,
    /// Last pointer position inside the window, physical pixels
    cursor: Option<PhysicalPosition<f64>>,
    resized: Option<PhysicalSize<u32>>,
}

impl Handler {
    fn new(tuning: &Tuning) -> Self {
        Self {
            title: tuning.title.clone(),
            size: LogicalSize::new(tuning.screen_width as f64, tuning.screen_height as f64),
            frame_size: (tuning.screen_width, tuning.screen_height),
            window: None,
            create_error: None,
            events: Vec::new(),
            cursor: None,
            resized: None,
        }
    }

    fn mouse_released(&mut self) {
        // No pointer position yet: nothing to aim at
        let (Some(cursor), Some(window)) = (self.cursor, self.window.as_ref()) else {
            return;
        };
        let (x, y) = to_frame_coords(cursor, window.inner_size(), self.frame_size);
        self.events.push(Event::MouseReleased { x, y });
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(anyhow::Error::new(e).context("failed to create window")),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push(Event::Quit),
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(position),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } => self.mouse_released(),
            WindowEvent::Resized(size) => self.resized = Some(size),
            _ => {}
        }
    }
}

/// Map a physical pointer position onto the fixed-size frame
fn to_frame_coords(
    pos: PhysicalPosition<f64>,
    inner: PhysicalSize<u32>,
    frame: (u32, u32),
) -> (f32, f32) {
    if inner.width == 0 || inner.height == 0 {
        return (pos.x as f32, pos.y as f32);
    }
    let sx = frame.0 as f64 / inner.width as f64;
    let sy = frame.1 as f64 / inner.height as f64;
    ((pos.x * sx) as f32, (pos.y * sy) as f32)
}

/// winit window + wgpu presenter
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    handler: Handler,
    window: Arc<Window>,
    present: PresentState,
}

impl WinitBackend {
    /// Open the window and set up presentation for frames of the tuned screen size
    pub fn new(tuning: &Tuning) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut handler = Handler::new(tuning);

        // The window is created from `resumed`, which arrives during a pump
        let window = loop {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);
            if let Some(err) = handler.create_error.take() {
                return Err(err);
            }
            if let Some(window) = handler.window.clone() {
                break window;
            }
            if let PumpStatus::Exit(code) = status {
                bail!("event loop exited with code {code} before the window opened");
            }
        };

        let present = pollster::block_on(PresentState::new(
            window.clone(),
            tuning.screen_width,
            tuning.screen_height,
        ))
        .context("failed to initialize GPU presentation")?;

        log::info!(
            "Window open: {}x{} frame, {}x{} surface",
            tuning.screen_width,
            tuning.screen_height,
            present.size.0,
            present.size.1
        );

        Ok(Self {
            event_loop,
            handler,
            window,
            present,
        })
    }
}

impl Backend for WinitBackend {
    fn poll_events(&mut self) -> Vec<Event> {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited with code {code}");
            self.handler.events.push(Event::Quit);
        }

        if let Some(size) = self.handler.resized.take() {
            self.present.resize(size.width, size.height);
        }

        std::mem::take(&mut self.handler.events)
    }

    fn present(&mut self, frame: &Surface) -> Result<()> {
        let Err(err) = self.present.render(frame) else {
            return Ok(());
        };

        match self.present.handle_surface_error(&err) {
            SurfaceErrorAction::Reconfigured => {
                log::warn!("Surface {err}; reconfigured");
                Ok(())
            }
            SurfaceErrorAction::SkipFrame => {
                log::warn!("Render error: {err:?}");
                Ok(())
            }
            SurfaceErrorAction::Fatal => {
                log::error!("Render error: {err:?}");
                bail!("unrecoverable surface error: {err}")
            }
        }
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn shutdown(self) {
        log::info!("Shutting down window");
        // Surface before the window it was created from
        drop(self.present);
        drop(self.handler);
        drop(self.window);
        drop(self.event_loop);
    }
}
