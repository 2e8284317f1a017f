//! Demo selection and data-driven tuning
//!
//! Which demo a page runs, and any per-page tuning, comes from
//! attributes on the canvas element: `data-demo` picks a preset,
//! `data-config` holds a JSON [`Overrides`] object applied on top.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{MotionModel, SimConfig};

/// The two shipped demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DemoKind {
    /// Balls falling under gravity with a damped floor bounce
    Gravity,
    /// Breathing circle field that reacts to the pointer
    #[default]
    Breathing,
}

impl DemoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::Gravity => "gravity",
            DemoKind::Breathing => "breathing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gravity" | "balls" => Some(DemoKind::Gravity),
            "breathing" | "circles" => Some(DemoKind::Breathing),
            _ => None,
        }
    }

    /// Preset reproducing the demo's original tuning
    pub fn config(&self) -> SimConfig {
        match self {
            DemoKind::Gravity => SimConfig {
                count: BALL_COUNT,
                radius_range: (BALL_MIN_RADIUS, BALL_MAX_RADIUS),
                vel_x_range: BALL_VEL_X,
                vel_y_range: BALL_VEL_Y,
                palette: BALL_PALETTE.to_vec(),
                model: MotionModel::Gravity {
                    gravity: GRAVITY,
                    friction: FRICTION,
                },
            },
            DemoKind::Breathing => SimConfig {
                count: CIRCLE_COUNT,
                radius_range: (1.0, CIRCLE_MIN_RADIUS + 1.0),
                vel_x_range: (-CIRCLE_MAX_SPEED, CIRCLE_MAX_SPEED),
                vel_y_range: (-CIRCLE_MAX_SPEED, CIRCLE_MAX_SPEED),
                palette: CIRCLE_PALETTE.to_vec(),
                model: MotionModel::PointerReactive {
                    reach: INTERACTIVITY_DISTANCE,
                    max_radius: CIRCLE_MAX_RADIUS,
                    growth_step: RADIUS_STEP,
                },
            },
        }
    }
}

/// Partial overrides parsed from the canvas `data-config` attribute.
/// Absent fields keep the preset's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub count: Option<usize>,
    /// Lower bound of the spawn radius range
    pub min_radius: Option<f32>,
    /// Radius ceiling: the model's `max_radius` for the breathing demo,
    /// the spawn range's top for the gravity demo
    pub max_radius: Option<f32>,
    /// Symmetric per-axis velocity cap
    pub max_speed: Option<f32>,
    pub interactivity_distance: Option<f32>,
    /// "#RRGGBB" entries replacing the palette
    pub palette: Option<Vec<String>>,
}

impl Overrides {
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(min) = self.min_radius {
            config.radius_range.0 = min;
        }
        if let Some(max) = self.max_radius {
            match &mut config.model {
                MotionModel::PointerReactive { max_radius, .. } => *max_radius = max,
                MotionModel::Gravity { .. } => config.radius_range.1 = max,
            }
        }
        if let Some(speed) = self.max_speed {
            config.vel_x_range = (-speed, speed);
            config.vel_y_range = (-speed, speed);
        }
        if let Some(distance) = self.interactivity_distance {
            if let MotionModel::PointerReactive { reach, .. } = &mut config.model {
                *reach = distance;
            }
        }
        if let Some(palette) = &self.palette {
            let parsed: Vec<u32> = palette.iter().filter_map(|s| parse_hex_color(s)).collect();
            if !parsed.is_empty() {
                config.palette = parsed;
            }
        }
    }
}

/// "#RRGGBB" (leading '#' optional) -> 0xRRGGBB
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
