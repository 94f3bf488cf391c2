//! Fixed timestep ball kinematics
//!
//! One call to [`step`] is one frame. Velocity is in pixels per frame, so there
//! is no `dt` parameter.

use glam::Vec2;

use super::state::Ball;

/// Advance the ball by one frame: move, then apply friction.
pub fn step(ball: &mut Ball, friction: f32) {
    ball.pos += ball.vel;
    ball.vel -= ball.vel * friction;
}

/// Throw the ball toward `target`.
///
/// Velocity is proportional to the displacement, so the ball does not stop on
/// the target. Any previous velocity is discarded.
pub fn flick(ball: &mut Ball, target: Vec2, speed: f32) {
    ball.vel = (target - ball.pos) * speed;
}
