//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - One invocation = one fixed logical step (no wall-clock time)
//! - Seeded RNG only
//! - Stable insertion-order iteration
//! - No rendering or platform dependencies

pub mod state;
pub mod step;

pub use state::{Circle, MotionModel, PointerState, SimConfig, SimState, Viewport, spawn_circle};
pub use step::{step, step_gravity, step_reactive, tick};
