//! Simulation state types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whole-program phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames are being simulated and rendered
    #[default]
    Running,
    /// A quit was requested; terminal
    Over,
}

/// The ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left of the sprite, in screen pixels
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    /// Ball at rest in the middle of a `width` x `height` screen
    pub fn centered(width: u32, height: u32) -> Self {
        Self::new(Vec2::new(width as f32 / 2.0, height as f32 / 2.0))
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
