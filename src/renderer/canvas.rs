//! 2D canvas backend (browser only)

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, css_color};
use crate::sim::Viewport;

/// [`Surface`] over a `CanvasRenderingContext2d`. Coordinates are
/// logical pixels; the dpr transform set by [`configure_backing`] maps
/// them onto the backing store.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
    }
}

/// Match the canvas backing store to CSS size * devicePixelRatio and
/// scale the context so all drawing happens in logical pixels.
pub fn configure_backing(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: Viewport,
) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));

    canvas.set_width((viewport.width * viewport.dpr).floor() as u32);
    canvas.set_height((viewport.height * viewport.dpr).floor() as u32);

    _ = ctx.set_transform(
        viewport.dpr as f64,
        0.0,
        0.0,
        viewport.dpr as f64,
        0.0,
        0.0,
    );
}
