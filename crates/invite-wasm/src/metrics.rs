//! Canvas2D text measurement backend.
//!
//! Uses `measureText` on an offscreen 2D context, falling back to a detached
//! `<canvas>` element on browsers without `OffscreenCanvas`. When neither is
//! available the bridge keeps the approximate metrics from `invite-core`.

use invite_core::{FontSpec, MeasureBackend};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, OffscreenCanvas, OffscreenCanvasRenderingContext2d};

enum Context {
    Offscreen(OffscreenCanvasRenderingContext2d),
    Element(CanvasRenderingContext2d),
}

pub struct Canvas2dMetrics {
    ctx: Context,
    /// CSS font currently set on the context.
    font: RefCell<String>,
}

impl Canvas2dMetrics {
    /// `None` when no 2D context can be created (non-browser host, or a
    /// browser with canvas disabled).
    pub fn new() -> Option<Self> {
        if !cfg!(target_arch = "wasm32") {
            return None;
        }
        let ctx = offscreen_context().or_else(element_context)?;
        Some(Self {
            ctx,
            font: RefCell::new(String::new()),
        })
    }

    fn measure(&self, text: &str) -> Option<f64> {
        let metrics = match &self.ctx {
            Context::Offscreen(ctx) => ctx.measure_text(text),
            Context::Element(ctx) => ctx.measure_text(text),
        };
        metrics.ok().map(|m| m.width())
    }

    fn set_font(&self, css: String) {
        let mut current = self.font.borrow_mut();
        if *current != css {
            match &self.ctx {
                Context::Offscreen(ctx) => ctx.set_font(&css),
                Context::Element(ctx) => ctx.set_font(&css),
            }
            *current = css;
        }
    }
}

impl MeasureBackend for Canvas2dMetrics {
    fn run_width(&self, text: &str, font: &FontSpec) -> Option<f32> {
        self.set_font(font.css());
        let width = self.measure(text)?;
        width.is_finite().then_some(width as f32)
    }
}

fn offscreen_context() -> Option<Context> {
    let canvas = OffscreenCanvas::new(1, 1).ok()?;
    let ctx = canvas.get_context("2d").ok()??;
    ctx.dyn_into::<OffscreenCanvasRenderingContext2d>()
        .ok()
        .map(Context::Offscreen)
}

fn element_context() -> Option<Context> {
    let document = web_sys::window()?.document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .ok()?;
    let ctx = canvas.get_context("2d").ok()??;
    ctx.dyn_into::<CanvasRenderingContext2d>()
        .ok()
        .map(Context::Element)
}
