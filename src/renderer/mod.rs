//! Drawing-surface abstraction
//!
//! The simulation never touches the canvas; the driver paints through
//! [`Surface`], which a host backend (or a test recorder) implements.
//! The only operations are a full clear and a filled circle - nothing
//! here ever reads pixels back.

use glam::Vec2;

use crate::sim::Viewport;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

/// One frame's worth of painting: clear once, then one filled circle
/// per entity.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32);
}

/// `0xRRGGBB` -> CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06X}", color & 0xFF_FFFF)
}
