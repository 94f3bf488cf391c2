//! Game tuning
//!
//! Every constant the loop depends on, gathered in one serializable struct.
//! The binary always runs with [`Tuning::default`], which matches `consts`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::ColorKey;

/// Tunable parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Window ===
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,

    // === Physics ===
    /// Click displacement to velocity scale
    pub speed_coefficient: f32,
    /// Fraction of velocity removed each frame
    pub friction_coefficient: f32,

    // === Pacing ===
    pub frame_delay_ms: u64,

    // === Assets ===
    pub table_path: PathBuf,
    pub ball_sheet_path: PathBuf,
    /// Side of the square ball sprite at the sheet origin
    pub ball_size: u32,
    /// RGB treated as transparent on the ball sheet
    pub color_key: [u8; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            speed_coefficient: SPEED_COEF,
            friction_coefficient: FRICTION_COEF,

            frame_delay_ms: FRAME_DELAY_MS,

            table_path: PathBuf::from(TABLE_PATH),
            ball_sheet_path: PathBuf::from(BALL_SHEET_PATH),
            ball_size: BALL_SIZE,
            color_key: COLOR_KEY,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid tuning JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize tuning")
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn color_key(&self) -> ColorKey {
        let [r, g, b] = self.color_key;
        ColorKey::new(r, g, b)
    }
}
