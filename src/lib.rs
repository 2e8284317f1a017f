//! Motes - animated circle demos on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion models, store lifecycle)
//! - `driver`: Frame scheduling and debounced reset handling
//! - `renderer`: Drawing-surface abstraction + canvas backend
//! - `settings`: Demo presets and data-driven tuning overrides

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::DemoKind;
pub use sim::{Circle, MotionModel, SimConfig, SimState, Viewport};

/// Demo tuning constants
pub mod consts {
    /// Downward acceleration added to vy each frame (gravity demo)
    pub const GRAVITY: f32 = 0.98;
    /// Velocity scale applied on bounce (gravity demo)
    pub const FRICTION: f32 = 0.69;

    /// Gravity demo population
    pub const BALL_COUNT: usize = 100;
    pub const BALL_MIN_RADIUS: f32 = 5.0;
    pub const BALL_MAX_RADIUS: f32 = 30.0;
    /// Horizontal spawn velocity range
    pub const BALL_VEL_X: (f32, f32) = (-1.0, 1.0);
    /// Vertical spawn velocity range (always downward)
    pub const BALL_VEL_Y: (f32, f32) = (1.0, 3.0);
    pub const BALL_PALETTE: [u32; 5] = [0xBF0B3B, 0xD50DD9, 0x238C2A, 0xF2B90C, 0xF27405];

    /// Breathing demo population
    pub const CIRCLE_COUNT: usize = 2000;
    /// Resting radius spawns in [1, CIRCLE_MIN_RADIUS + 1)
    pub const CIRCLE_MIN_RADIUS: f32 = 5.0;
    /// Ceiling the pointer can grow a circle to
    pub const CIRCLE_MAX_RADIUS: f32 = 40.0;
    pub const CIRCLE_MAX_SPEED: f32 = 2.0;
    /// Half-width of the square pointer interaction zone
    pub const INTERACTIVITY_DISTANCE: f32 = 50.0;
    /// Radius change per frame while growing or relaxing
    pub const RADIUS_STEP: f32 = 1.0;
    pub const CIRCLE_PALETTE: [u32; 5] = [0x146152, 0x44803F, 0xB4CF66, 0xFFEC5C, 0xFF5A33];

    /// Resize bursts quieter than this coalesce into a single store rebuild
    pub const RESIZE_DEBOUNCE_MS: u32 = 150;
}
