use ambient_core::Surface;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Surface` over a canvas and its 2D context.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// `None` when the canvas cannot hand out a 2D context.
    pub fn acquire(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Surface for Canvas2dSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn reset_transform(&mut self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    }

    fn scale(&mut self, factor: f64) {
        let _ = self.ctx.scale(factor, factor);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn set_fill_color(&mut self, css: &str) {
        self.ctx.set_fill_style_str(css);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.fill();
    }
}
