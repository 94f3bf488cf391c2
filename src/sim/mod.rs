//! Deterministic simulation module
//!
//! Ball kinematics only. This module must stay pure:
//! - One step per frame, no wall clock
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Ball, GamePhase};
pub use tick::{flick, step};
