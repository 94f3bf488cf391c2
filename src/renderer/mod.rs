//! Rendering module
//!
//! Frames are composed on the CPU and handed to the WebGPU presenter as a
//! single texture.

pub mod pipeline;
pub mod scene;
pub mod surface;

pub use pipeline::{PresentState, SurfaceErrorAction};
pub use surface::{ColorKey, Region, Surface};
