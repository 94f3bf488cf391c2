//! Bowl Table - a single ball on a table, flicked with the mouse
//!
//! Core modules:
//! - `sim`: Deterministic ball kinematics (step, flick)
//! - `world`: Loaded assets and the running/over phase
//! - `game`: Frame loop controller (events, physics, render, pacing)
//! - `renderer`: CPU surfaces, scene composition, WebGPU presentation
//! - `platform`: Backend abstraction and the native winit backend
//! - `settings`: Data-driven tuning

pub mod assets;
pub mod game;
pub mod logging;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod time;
pub mod world;

pub use game::{Game, run};
pub use settings::Tuning;
pub use world::World;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (logical pixels)
    pub const SCREEN_WIDTH: u32 = 1288;
    pub const SCREEN_HEIGHT: u32 = 725;

    /// Side of the ball sprite in the sheet
    pub const BALL_SIZE: u32 = 42;

    /// Click displacement to velocity scale
    pub const SPEED_COEF: f32 = 0.1;
    /// Fraction of velocity lost each frame
    pub const FRICTION_COEF: f32 = 0.05;

    /// Pause between frames (ms), caps the loop near 100 fps
    pub const FRAME_DELAY_MS: u64 = 10;

    /// Sprite sheet transparency key (magenta)
    pub const COLOR_KEY: [u8; 3] = [255, 0, 255];

    /// Asset paths, relative to the working directory
    pub const TABLE_PATH: &str = "resources/table.bmp";
    pub const BALL_SHEET_PATH: &str = "resources/balls.bmp";

    pub const WINDOW_TITLE: &str = "bowl-table";
}
