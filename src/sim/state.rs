//! Entities, simulation context, and store lifecycle
//!
//! The whole mutable state of one demo lives in [`SimState`]: viewport
//! bounds, pointer state, and the circle store. The store is only ever
//! replaced as a whole batch; circles are never added or removed one at
//! a time.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current drawable width/height plus the device pixel-density scale.
///
/// The simulation reads this only at reset time, never mid-frame.
/// Coordinates are logical (CSS) pixels; `dpr` matters only to the
/// canvas backing store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, dpr: 1.0 }
    }

    pub fn with_dpr(width: f32, height: f32, dpr: f32) -> Self {
        Self { width, height, dpr }
    }

    /// True if the full disc at `pos` with `radius` lies inside the bounds
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

/// Most recent known pointer location, or inactive.
///
/// Inactive means no pointer event has landed yet, or the pointer left
/// the window / the window lost focus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pos: Option<Vec2>,
}

impl PointerState {
    pub fn set(&mut self, pos: Vec2) {
        self.pos = Some(pos);
    }

    pub fn clear(&mut self) {
        self.pos = None;
    }

    pub fn get(&self) -> Option<Vec2> {
        self.pos
    }

    pub fn is_active(&self) -> bool {
        self.pos.is_some()
    }
}

/// Which per-step rule set a demo runs under.
///
/// The two models deliberately disagree on boundary-check timing
/// (projected vs. current position); see `sim::step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionModel {
    /// Falling balls with a damped floor/wall bounce
    Gravity { gravity: f32, friction: f32 },
    /// Four-wall bounce plus pointer-driven radius breathing
    PointerReactive {
        /// Half-width of the square interaction zone around the pointer
        reach: f32,
        /// Radius ceiling while the pointer is near
        max_radius: f32,
        /// Radius change per frame while growing or relaxing
        growth_step: f32,
    },
}

/// One simulated circle. Plain data; all behavior lives in `sim::step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Resting radius the circle relaxes back toward (pointer-reactive
    /// model); equal to `radius` at spawn
    pub base_radius: f32,
    /// 0xRRGGBB, drawn once from the palette at spawn
    pub color: u32,
}

/// Spawn-time tuning for one demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Circles per store rebuild
    pub count: usize,
    /// Spawn radius range [min, max)
    pub radius_range: (f32, f32),
    /// Spawn velocity range [min, max) per axis
    pub vel_x_range: (f32, f32),
    pub vel_y_range: (f32, f32),
    /// 0xRRGGBB entries, picked uniformly at spawn
    pub palette: Vec<u32>,
    pub model: MotionModel,
}

/// Uniform sample in [min, max); degenerate ranges collapse to `min`
fn sample(rng: &mut impl Rng, range: (f32, f32)) -> f32 {
    if range.1 > range.0 {
        rng.random_range(range.0..range.1)
    } else {
        range.0
    }
}

/// Generate one circle fully inside the viewport.
///
/// The radius is capped at half the smaller viewport dimension so the
/// in-bounds guarantee holds even for tiny windows.
pub fn spawn_circle(rng: &mut impl Rng, config: &SimConfig, viewport: Viewport) -> Circle {
    let max_fit = (viewport.width.min(viewport.height) / 2.0).max(1.0);
    let radius = sample(rng, config.radius_range).min(max_fit);

    let pos = Vec2::new(
        sample(rng, (radius, viewport.width - radius)),
        sample(rng, (radius, viewport.height - radius)),
    );
    let vel = Vec2::new(
        sample(rng, config.vel_x_range),
        sample(rng, config.vel_y_range),
    );
    let color = config.palette.choose(rng).copied().unwrap_or(0xFF_FFFF);

    Circle { pos, vel, radius, base_radius: radius, color }
}

/// The simulation context: viewport, pointer, and the circle store.
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    pub viewport: Viewport,
    pub pointer: PointerState,
    /// Insertion-ordered; order has no semantic effect but stays stable
    /// for deterministic replay
    pub circles: Vec<Circle>,
    /// Bumped on every store rebuild
    pub generation: u64,
    rng: Pcg32,
}

impl SimState {
    /// Create an empty state; call [`SimState::reset`] to populate it.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            pointer: PointerState::default(),
            circles: Vec::new(),
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Discard the whole store and regenerate it against fresh bounds.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.circles.clear();
        self.circles.reserve(self.config.count);
        for _ in 0..self.config.count {
            let circle = spawn_circle(&mut self.rng, &self.config, viewport);
            self.circles.push(circle);
        }
        self.generation += 1;
        log::debug!(
            "store rebuilt: {} circles in {}x{} (gen {})",
            self.circles.len(),
            viewport.width,
            viewport.height,
            self.generation
        );
    }
}
