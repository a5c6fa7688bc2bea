//! WASM bridge exposing the invitation card canvas to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards DOM
//! pointer/keyboard events, calls `animation_frame` from
//! `requestAnimationFrame` whenever a handler asks for one, and redraws from
//! `render_json` when `revision` changes.

mod console;
mod metrics;

use invite_core::{ApproxMetrics, CanvasSize, ElementId, MeasureBackend, Point, Size, ZOrder};
use invite_editor::input::{Modifiers, PointerSource};
use invite_editor::{CanvasConfig, CardCanvas, TemplateElement, TemplateLayout};
use metrics::Canvas2dMetrics;
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Holds the card canvas. All interaction from the editor page goes through
/// this struct.
#[wasm_bindgen]
pub struct InviteCanvas {
    card: CardCanvas,
}

fn measurer() -> Box<dyn MeasureBackend> {
    match Canvas2dMetrics::new() {
        Some(metrics) => Box::new(metrics),
        None => {
            log::warn!("canvas text metrics unavailable; using approximate widths");
            Box::new(ApproxMetrics::default())
        }
    }
}

/// Id of an element that may be on the canvas. Never interns `id`.
fn element_id(id: &str) -> Option<ElementId> {
    ElementId::lookup(id)
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

/// Map a DOM `PointerEvent.pointerType` to a pointer source.
fn pointer_source(pointer_type: &str, touches: u8) -> PointerSource {
    match pointer_type {
        "touch" => PointerSource::Touch {
            touches: touches.max(1),
        },
        "pen" => PointerSource::Pen,
        _ => PointerSource::Mouse,
    }
}

fn z_order(direction: &str) -> Option<ZOrder> {
    match direction {
        "forward" => Some(ZOrder::Forward),
        "backward" => Some(ZOrder::Backward),
        "front" => Some(ZOrder::ToFront),
        "back" => Some(ZOrder::ToBack),
        _ => None,
    }
}

#[wasm_bindgen]
impl InviteCanvas {
    /// Create an empty canvas with the given dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console::init();
        Self {
            card: CardCanvas::new(CanvasSize::new(width as f32, height as f32), measurer()),
        }
    }

    /// Create a canvas seeded from a catalog template (JSON).
    pub fn from_template(json: &str) -> Result<InviteCanvas, JsValue> {
        console::init();
        let template = TemplateLayout::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            card: CardCanvas::from_template(&template, measurer()),
        })
    }

    /// Resize the canvas after a host layout change.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.card
            .set_canvas_size(CanvasSize::new(width as f32, height as f32));
    }

    /// Replace the interaction settings. Missing keys take their defaults.
    pub fn set_config_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<CanvasConfig>(json) {
            Ok(config) => {
                self.card.set_config(config);
                true
            }
            Err(err) => {
                log::warn!("invalid canvas config: {err}");
                false
            }
        }
    }

    pub fn config_json(&self) -> String {
        serde_json::to_string(self.card.config()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Monotonic change counter; redraw when it moves.
    pub fn revision(&self) -> f64 {
        self.card.revision() as f64
    }

    // ─── Elements ────────────────────────────────────────────────────────

    /// Add one element described like a template entry.
    pub fn add_element_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<TemplateElement>(json) {
            Ok(spec) => {
                let (element, font_config) = spec.build();
                self.card.add_element(element, font_config)
            }
            Err(err) => {
                log::warn!("invalid element: {err}");
                false
            }
        }
    }

    /// Select an element by id; an empty string clears the selection.
    pub fn select(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return self.card.select_element(None);
        }
        element_id(id).is_some_and(|id| self.card.select_element(Some(id)))
    }

    /// Currently selected id, or an empty string.
    pub fn selected_id(&self) -> String {
        self.card
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn move_element(&mut self, id: &str, x: f32, y: f32) -> bool {
        element_id(id).is_some_and(|id| self.card.move_element(id, Point::new(x, y)))
    }

    pub fn resize_element(&mut self, id: &str, width: f32, height: f32) -> bool {
        element_id(id).is_some_and(|id| self.card.resize_element(id, Size::new(width, height)))
    }

    pub fn set_font_size(&mut self, id: &str, font_size: u32) -> bool {
        element_id(id).is_some_and(|id| self.card.set_font_size(id, font_size))
    }

    /// `direction` is one of `forward`, `backward`, `front`, `back`.
    pub fn set_z_index(&mut self, id: &str, direction: &str) -> bool {
        match (element_id(id), z_order(direction)) {
            (Some(id), Some(direction)) => self.card.set_z_index(id, direction),
            _ => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        self.card
            .selected()
            .is_some_and(|id| self.card.delete_element(id))
    }

    /// Duplicate the selection. Returns the new id, or an empty string.
    pub fn duplicate_selected(&mut self) -> String {
        self.card
            .selected()
            .and_then(|id| self.card.duplicate_element(id))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn toggle_lock_selected(&mut self) -> bool {
        self.card
            .selected()
            .and_then(|id| self.card.toggle_lock(id))
            .is_some()
    }

    pub fn reset_layout(&mut self) {
        self.card.reset_layout();
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        element_id(id).is_some_and(|id| self.card.set_text(id, text))
    }

    pub fn set_font_family(&mut self, id: &str, family: &str) -> bool {
        element_id(id).is_some_and(|id| self.card.set_font_family(id, family))
    }

    pub fn set_font_weight(&mut self, id: &str, weight: u16) -> bool {
        element_id(id).is_some_and(|id| self.card.set_font_weight(id, weight))
    }

    /// Wrap width in pixels; zero or negative turns wrapping off.
    pub fn set_max_width(&mut self, id: &str, max_width: f32) -> bool {
        let max_width = (max_width > 0.0).then_some(max_width);
        element_id(id).is_some_and(|id| self.card.set_max_width(id, max_width))
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle pointer down. Returns true if the event was consumed.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        pointer_type: &str,
        touches: u8,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.card.pointer_down(
            x,
            y,
            pointer_source(pointer_type, touches),
            modifiers(shift, ctrl, alt, meta),
        )
    }

    /// Handle pointer move. Returns true if the host must request an
    /// animation frame and then call [`Self::animation_frame`].
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.card.pointer_move(x, y, modifiers(shift, ctrl, alt, meta))
    }

    pub fn animation_frame(&mut self) {
        self.card.animation_frame();
    }

    /// Handle pointer up. Returns true if a gesture ended.
    pub fn handle_pointer_up(&mut self) -> bool {
        self.card.pointer_up()
    }

    /// Handle a keyboard event (`KeyboardEvent.key`). Returns true if a
    /// shortcut fired.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.card.key(key, modifiers(shift, ctrl, alt, meta))
    }

    pub fn cancel_gesture(&mut self) -> bool {
        self.card.cancel_gesture()
    }

    /// DOM event names the host should have attached to `document`.
    pub fn active_listeners(&self) -> String {
        let names: Vec<&str> = self
            .card
            .listeners()
            .active()
            .into_iter()
            .map(|kind| kind.event_name())
            .collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Export & persistence ────────────────────────────────────────────

    /// True when no animation frame is pending. Export waits for this.
    pub fn is_settled(&self) -> bool {
        self.card.is_settled()
    }

    pub fn flush_frames(&mut self) {
        self.card.flush_frames();
    }

    pub fn layout_json(&self) -> String {
        self.card.layout_json().unwrap_or_else(|err| {
            log::warn!("layout serialization failed: {err}");
            "{}".to_string()
        })
    }

    /// Restore a stored layout. Returns the number of elements updated.
    pub fn load_layout_json(&mut self, json: &str) -> Result<u32, JsValue> {
        self.card
            .load_layout_json(json)
            .map(|n| n as u32)
            .map_err(|e| JsValue::from_str(&e))
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Paint-ordered render model as JSON.
    pub fn render_json(&self) -> String {
        serde_json::to_string(&self.card.render_items()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Alignment guides of the current drag tick as JSON.
    pub fn guides_json(&self) -> String {
        serde_json::to_string(self.card.guides()).unwrap_or_else(|_| "[]".to_string())
    }
}
