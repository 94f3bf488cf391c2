//! Scene composition
//!
//! Draws the world into the screen frame: table first, then the ball sprite.

use super::surface::{Region, Surface};
use crate::sim::Ball;
use crate::world::World;

/// Compose one frame of `world` and `ball` into `frame`
pub fn draw(frame: &mut Surface, world: &World, ball: &Ball, ball_size: u32) {
    frame.blit(world.table(), 0, 0);

    // Sprite sheet origin holds the only ball frame used
    let sprite = Region::new(0, 0, ball_size, ball_size);
    let (x, y) = screen_position(ball);
    frame.blit_region(world.ball_sheet(), sprite, x, y);
}

/// Ball position in whole pixels, truncated toward zero
#[inline]
pub fn screen_position(ball: &Ball) -> (i32, i32) {
    (ball.pos.x as i32, ball.pos.y as i32)
}
