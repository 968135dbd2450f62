//! Canvas 2D painter
//!
//! Stateless apart from the context handle; every frame repaints the whole
//! command list.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCmd, Rgba};

fn css(color: Rgba) -> String {
    let [r, g, b, a] = color;
    format!("rgba({},{},{},{:.3})", r, g, b, a as f32 / 255.0)
}

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Paint a frame's commands in order
    pub fn paint(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::Rect { x, y, w, h, fill } => {
                    ctx.set_fill_style_str(&css(*fill));
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Ellipse {
                    center,
                    radii,
                    fill,
                } => {
                    ctx.set_fill_style_str(&css(*fill));
                    ctx.begin_path();
                    ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        0.0,
                        std::f64::consts::TAU,
                    )?;
                    ctx.fill();
                }
                DrawCmd::Polygon { points, fill } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.set_fill_style_str(&css(*fill));
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCmd::Text { x, y, size, text } => {
                    ctx.set_font(&format!("{}px sans-serif", size));
                    ctx.set_line_width(4.0);
                    ctx.set_stroke_style_str("black");
                    ctx.stroke_text(text, *x as f64, *y as f64)?;
                    ctx.set_fill_style_str(&css(super::scene::colors::TEXT));
                    ctx.fill_text(text, *x as f64, *y as f64)?;
                }
            }
        }
        Ok(())
    }
}
