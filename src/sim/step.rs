//! Per-frame motion integration
//!
//! One call advances one circle by exactly one logical step; there is no
//! delta-time compensation anywhere. Each circle is a pure function of
//! itself plus viewport, pointer, and model - circles never interact
//! with each other.

use glam::Vec2;

use super::state::{Circle, MotionModel, SimState, Viewport};

/// Advance one circle by one step under the given model.
pub fn step(circle: &mut Circle, viewport: Viewport, pointer: Option<Vec2>, model: MotionModel) {
    match model {
        MotionModel::Gravity { gravity, friction } => {
            step_gravity(circle, viewport, gravity, friction);
        }
        MotionModel::PointerReactive { reach, max_radius, growth_step } => {
            step_reactive(circle, viewport, pointer, reach, max_radius, growth_step);
        }
    }
}

/// Gravity model: damped floor/wall bounce.
///
/// Boundary tests use the projected position (current + pending
/// velocity), so the reflection lands one frame before the geometric
/// edge is crossed and a circle may overlap the boundary for a single
/// frame. That overlap is the intended motion, not drift to correct.
pub fn step_gravity(c: &mut Circle, vp: Viewport, gravity: f32, friction: f32) {
    if c.pos.y + c.radius + c.vel.y > vp.height {
        c.vel.y = -c.vel.y * friction;
    } else {
        c.vel.y += gravity;
    }

    if c.pos.x + c.radius + c.vel.x > vp.width || c.pos.x - c.radius <= 0.0 {
        c.vel.x = -c.vel.x * friction;
    }

    c.pos += c.vel;
}

/// Pointer-reactive model: undamped four-wall bounce plus radius
/// breathing.
///
/// Unlike the gravity model, wall tests here use the current position.
/// The interaction zone is a square: both axis distances must be under
/// `reach` (not the Euclidean distance).
pub fn step_reactive(
    c: &mut Circle,
    vp: Viewport,
    pointer: Option<Vec2>,
    reach: f32,
    max_radius: f32,
    growth_step: f32,
) {
    if c.pos.x + c.radius > vp.width || c.pos.x - c.radius < 0.0 {
        c.vel.x = -c.vel.x;
    }
    if c.pos.y + c.radius > vp.height || c.pos.y - c.radius < 0.0 {
        c.vel.y = -c.vel.y;
    }

    c.pos += c.vel;

    let near = pointer
        .is_some_and(|p| (p.x - c.pos.x).abs() < reach && (p.y - c.pos.y).abs() < reach);

    // At max radius the near branch is skipped and the circle shrinks a
    // step, so a held pointer makes it oscillate: that is the breathing.
    if near && c.radius < max_radius {
        c.radius = (c.radius + growth_step).min(max_radius);
    } else if c.radius > c.base_radius {
        c.radius = (c.radius - growth_step).max(c.base_radius);
    }
}

/// Advance every circle in the store by one step, in insertion order.
pub fn tick(state: &mut SimState) {
    let viewport = state.viewport;
    let pointer = state.pointer.get();
    let model = state.config.model;
    for circle in &mut state.circles {
        step(circle, viewport, pointer, model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DemoKind;
    use proptest::prelude::*;

    const VP: Viewport = Viewport { width: 800.0, height: 500.0, dpr: 1.0 };

    fn ball(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Circle {
        Circle {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius,
            base_radius: radius,
            color: 0xBF0B3B,
        }
    }

    #[test]
    fn test_gravity_accumulates_until_floor() {
        // Reference drop: vy goes 1 -> 1.98 on the first step
        let mut c = ball(100.0, 100.0, 0.0, 1.0, 10.0);
        step_gravity(&mut c, VP, 0.98, 0.69);
        assert!((c.vel.y - 1.98).abs() < 1e-4);
        assert!((c.pos.y - 101.98).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_floor_bounce_flips_and_damps() {
        let mut c = ball(100.0, 100.0, 0.0, 1.0, 10.0);
        for _ in 0..10_000 {
            let pre = c.vel.y;
            let projected_floor = c.pos.y + c.radius + c.vel.y > VP.height;
            step_gravity(&mut c, VP, 0.98, 0.69);
            if projected_floor {
                assert!(pre > 0.0);
                assert!((c.vel.y + pre * 0.69).abs() < 1e-3, "vy = -vy * friction");
                return;
            }
        }
        panic!("never reached the floor");
    }

    #[test]
    fn test_gravity_wall_bounce_both_sides() {
        // Projected past the right wall
        let mut c = ball(VP.width - 10.0, 100.0, 6.0, 0.0, 10.0);
        step_gravity(&mut c, VP, 0.98, 0.69);
        assert!((c.vel.x + 6.0 * 0.69).abs() < 1e-4);

        // Touching the left wall
        let mut c = ball(10.0, 100.0, -2.0, 0.0, 10.0);
        step_gravity(&mut c, VP, 0.98, 0.69);
        assert!((c.vel.x - 2.0 * 0.69).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_bounce_is_projected_not_actual() {
        // 20px of headroom but 25px of pending fall: the reflection must
        // fire this frame, before the edge is actually crossed
        let mut c = ball(100.0, VP.height - 30.0, 0.0, 25.0, 10.0);
        step_gravity(&mut c, VP, 0.98, 0.69);
        assert!(c.vel.y < 0.0);
    }

    #[test]
    fn test_reactive_bounce_uses_current_position() {
        // Far from the wall but moving fast: no flip (current-position rule)
        let mut c = ball(100.0, 100.0, 50.0, 0.0, 5.0);
        step_reactive(&mut c, VP, None, 50.0, 40.0, 1.0);
        assert_eq!(c.vel.x, 50.0);

        // Edge at the wall: flip, magnitude unchanged
        let mut c = ball(VP.width - 5.0, 100.0, 2.0, 0.0, 6.0);
        step_reactive(&mut c, VP, None, 50.0, 40.0, 1.0);
        assert_eq!(c.vel.x, -2.0);
    }

    #[test]
    fn test_reactive_vertical_bounce() {
        let mut c = ball(100.0, 3.0, 0.0, -1.5, 5.0);
        step_reactive(&mut c, VP, None, 50.0, 40.0, 1.0);
        assert_eq!(c.vel.y, 1.5);
    }

    #[test]
    fn test_growth_is_exactly_one_step_per_frame() {
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        let pointer = Some(Vec2::new(210.0, 210.0));
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 6.0);
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 7.0);
    }

    #[test]
    fn test_shrink_is_exactly_one_step_per_frame() {
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        c.radius = 9.0;
        step_reactive(&mut c, VP, None, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 8.0);
    }

    #[test]
    fn test_radius_rests_at_base() {
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        step_reactive(&mut c, VP, None, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 5.0, "no-op at base radius with inactive pointer");
    }

    #[test]
    fn test_interaction_zone_is_square_not_circular() {
        // Offset (40, 40): Chebyshev distance 40 < 50, Euclidean ~56.6 > 50.
        // The square zone grows here; a circular zone would not.
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        let pointer = Some(Vec2::new(240.0, 240.0));
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 6.0);

        // Within reach on x only: shrink branch
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        c.radius = 10.0;
        let pointer = Some(Vec2::new(210.0, 300.0));
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 9.0);
    }

    #[test]
    fn test_breathing_oscillation_at_max_radius() {
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        c.radius = 40.0;
        let pointer = Some(Vec2::new(200.0, 200.0));
        // At the ceiling the grow branch is skipped and it shrinks a step
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 39.0);
        // ...then grows back
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
        assert_eq!(c.radius, 40.0);
    }

    #[test]
    fn test_growth_step_clamps_to_ceiling_and_base() {
        let mut c = ball(200.0, 200.0, 0.0, 0.0, 5.0);
        c.radius = 39.5;
        let pointer = Some(Vec2::new(200.0, 200.0));
        step_reactive(&mut c, VP, pointer, 50.0, 40.0, 2.0);
        assert_eq!(c.radius, 40.0);

        c.radius = 5.5;
        step_reactive(&mut c, VP, None, 50.0, 40.0, 2.0);
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn test_no_cross_entity_interaction() {
        let mut state = SimState::new(DemoKind::Breathing.config(), 11);
        state.reset(Viewport::new(800.0, 500.0));
        state.pointer.set(Vec2::new(123.0, 77.0));

        // Step circle 0 alone, with the exact same context
        let mut alone = state.circles[0];
        step(&mut alone, state.viewport, state.pointer.get(), state.config.model);

        tick(&mut state);
        assert_eq!(state.circles[0], alone);
    }

    #[test]
    fn test_tick_advances_every_circle() {
        let mut state = SimState::new(DemoKind::Gravity.config(), 5);
        state.reset(Viewport::new(800.0, 500.0));
        let before: Vec<_> = state.circles.iter().map(|c| c.vel).collect();
        tick(&mut state);
        // Gravity touches every vy (accumulate or bounce)
        for (c, vel) in state.circles.iter().zip(before) {
            assert_ne!(c.vel.y, vel.y);
        }
    }

    proptest! {
        #[test]
        fn prop_radius_never_leaves_bounds(
            frames in proptest::collection::vec(
                (any::<bool>(), -100.0_f32..900.0, -100.0_f32..600.0),
                1..200,
            )
        ) {
            let mut c = ball(400.0, 250.0, 1.0, -1.0, 5.0);
            for (active, px, py) in frames {
                let pointer = active.then(|| Vec2::new(px, py));
                step_reactive(&mut c, VP, pointer, 50.0, 40.0, 1.0);
                prop_assert!(c.radius >= c.base_radius);
                prop_assert!(c.radius <= 40.0);
            }
        }

        #[test]
        fn prop_gravity_bounce_flips_sign(
            x in 15.0_f32..850.0,
            y in 300.0_f32..520.0,
            vx in -40.0_f32..40.0,
            vy in -30.0_f32..60.0,
        ) {
            let mut c = ball(x, y, vx, vy, 10.0);
            let floor = c.pos.y + c.radius + c.vel.y > VP.height;
            let wall = c.pos.x + c.radius + c.vel.x > VP.width || c.pos.x - c.radius <= 0.0;
            let (pre_vx, pre_vy) = (c.vel.x, c.vel.y);
            step_gravity(&mut c, VP, 0.98, 0.69);
            if floor && pre_vy != 0.0 {
                prop_assert!(c.vel.y.signum() == -pre_vy.signum());
                prop_assert!((c.vel.y.abs() - pre_vy.abs() * 0.69).abs() < 1e-3);
            }
            if wall && pre_vx != 0.0 {
                prop_assert!(c.vel.x.signum() == -pre_vx.signum());
            }
        }
    }
}
