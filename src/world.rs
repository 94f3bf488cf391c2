//! Session world: loaded assets and the running/over phase

use anyhow::Result;

use crate::assets::load_image;
use crate::renderer::Surface;
use crate::settings::Tuning;
use crate::sim::{Ball, GamePhase};

/// Everything the loop needs across frames, apart from the ball itself
#[derive(Debug)]
pub struct World {
    table: Surface,
    ball_sheet: Surface,
    phase: GamePhase,
}

impl World {
    /// Load both assets and place a resting ball at the screen center.
    ///
    /// Fails on the first asset that cannot be loaded.
    pub fn initialize(tuning: &Tuning) -> Result<(World, Ball)> {
        let table = load_image(&tuning.table_path)?;
        let ball_sheet = load_image(&tuning.ball_sheet_path)?;

        let world = World::from_surfaces(table, ball_sheet);
        let ball = Ball::centered(tuning.screen_width, tuning.screen_height);
        Ok((world, ball))
    }

    /// Running world from already loaded surfaces
    pub fn from_surfaces(table: Surface, ball_sheet: Surface) -> Self {
        Self {
            table,
            ball_sheet,
            phase: GamePhase::Running,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Enter the terminal `Over` phase
    pub fn finish(&mut self) {
        if self.phase != GamePhase::Over {
            log::info!("Quit requested");
            self.phase = GamePhase::Over;
        }
    }

    pub fn table(&self) -> &Surface {
        &self.table
    }

    pub fn ball_sheet(&self) -> &Surface {
        &self.ball_sheet
    }

    pub fn ball_sheet_mut(&mut self) -> &mut Surface {
        &mut self.ball_sheet
    }

    /// Free both images. Consumes the world, so it can only happen once.
    pub fn release(self) {
        log::info!("Releasing world assets");
        drop(self.table);
        drop(self.ball_sheet);
    }
}
