//! Platform abstraction layer
//!
//! The loop only talks to a [`Backend`]: drain input events, present a
//! composed frame, pause between frames, and shut down. The native
//! implementation lives in [`native`].

use std::time::Duration;

use anyhow::Result;

use crate::renderer::Surface;

pub mod native;

pub use native::WinitBackend;

/// Input the game reacts to; everything else is dropped by the backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Window close requested
    Quit,
    /// A mouse button was released with the pointer at `(x, y)` in frame pixels
    MouseReleased { x: f32, y: f32 },
}

/// Window, input and presentation collaborator
pub trait Backend {
    /// Every event that arrived since the last call, oldest first
    fn poll_events(&mut self) -> Vec<Event>;

    /// Show `frame` in the window
    fn present(&mut self, frame: &Surface) -> Result<()>;

    fn sleep(&mut self, duration: Duration);

    /// Close the window and release platform resources
    fn shutdown(self)
    where
        Self: Sized;
}
