//! Drag controller: `idle → dragging → idle`.
//!
//! Converts pointer travel since gesture start into a candidate position,
//! keeps it inside the canvas, and runs it through the snap calculator.
//! Only transient gesture state lives here; the element list belongs to the
//! composition layer.
//!
//! | Modifier | Effect |
//! |----------|--------|
//! | **Shift** | Constrain travel to the dominant axis |

use crate::config::CanvasConfig;
use crate::input::{PointerSample, PointerSource};
use crate::listeners::{ListenerGuard, ListenerHost, ListenerKind};
use invite_core::layout::{clamp_position, snap_to_grid};
use invite_core::{CanvasSize, Element, ElementId, Point, Size, SnapRequest, SnapResult, SnapTarget, compute_snap};
use std::rc::Rc;

/// Everything a move tick needs besides the gesture itself.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub canvas: CanvasSize,
    pub config: &'a CanvasConfig,
    pub element_size: Size,
    pub siblings: &'a [SnapTarget],
}

#[derive(Debug)]
struct DragGesture {
    id: ElementId,
    pointer_start: (f32, f32),
    start_position: Point,
    _listeners: ListenerGuard,
}

#[derive(Debug, Default)]
pub struct DragController {
    gesture: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_id(&self) -> Option<ElementId> {
        self.gesture.as_ref().map(|g| g.id)
    }

    /// Start dragging `element`. Ignored (returns `false`) for locked
    /// elements or while another drag is in progress.
    pub fn begin(
        &mut self,
        element: &Element,
        pointer: (f32, f32),
        source: PointerSource,
        host: &Rc<dyn ListenerHost>,
    ) -> bool {
        if self.gesture.is_some() || element.locked {
            log::debug!("drag start on {} ignored", element.id);
            return false;
        }
        let listeners = ListenerGuard::acquire(host.clone(), ListenerKind::for_gesture(source.is_touch()));
        self.gesture = Some(DragGesture {
            id: element.id,
            pointer_start: pointer,
            start_position: element.position,
            _listeners: listeners,
        });
        log::debug!("drag start {} at {:?}", element.id, element.position);
        true
    }

    /// Position for the current pointer sample, snapped and clamped.
    pub fn update(&self, sample: PointerSample, ctx: &DragContext<'_>) -> Option<(ElementId, SnapResult)> {
        let gesture = self.gesture.as_ref()?;
        let mut dx = sample.x - gesture.pointer_start.0;
        let mut dy = sample.y - gesture.pointer_start.1;

        if sample.modifiers.shift {
            if dx.abs() > dy.abs() {
                dy = 0.0;
            } else {
                dx = 0.0;
            }
        }

        let mut raw = gesture.start_position.offset(dx, dy);
        if let Some(grid) = ctx.config.grid() {
            raw = Point::new(snap_to_grid(raw.x, grid), snap_to_grid(raw.y, grid));
        }
        let padding = ctx.config.edge_padding;
        let candidate = clamp_position(raw, ctx.canvas, padding);

        let mut result = compute_snap(&SnapRequest {
            element_id: gesture.id,
            candidate,
            element_size: ctx.element_size,
            canvas: ctx.canvas,
            siblings: ctx.siblings,
            tolerance: ctx.config.effective_tolerance(),
        });
        // A sibling may sit outside the padded area.
        result.position = clamp_position(result.position, ctx.canvas, padding);
        log::trace!("drag {} -> {:?}", gesture.id, result.position);
        Some((gesture.id, result))
    }

    /// Finish the gesture. The last committed position stands.
    pub fn end(&mut self) -> Option<ElementId> {
        let gesture = self.gesture.take()?;
        log::debug!("drag end {}", gesture.id);
        Some(gesture.id)
    }

    /// Abort the gesture, returning the position to restore.
    pub fn cancel(&mut self) -> Option<(ElementId, Point)> {
        let gesture = self.gesture.take()?;
        log::debug!("drag cancel {}", gesture.id);
        Some((gesture.id, gesture.start_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::listeners::ListenerSet;

    fn host() -> (Rc<ListenerSet>, Rc<dyn ListenerHost>) {
        let set = Rc::new(ListenerSet::new());
        let host: Rc<dyn ListenerHost> = set.clone();
        (set, host)
    }

    fn photo() -> Element {
        Element::image("drag-photo", "p.jpg", Size::new(100.0, 80.0)).at(100.0, 100.0)
    }

    fn ctx<'a>(config: &'a CanvasConfig, siblings: &'a [SnapTarget]) -> DragContext<'a> {
        DragContext {
            canvas: CanvasSize::new(800.0, 600.0),
            config,
            element_size: Size::new(100.0, 80.0),
            siblings,
        }
    }

    #[test]
    fn moves_by_pointer_delta() {
        let (_set, host) = host();
        let mut drag = DragController::new();
        assert!(drag.begin(&photo(), (500.0, 400.0), PointerSource::Mouse, &host));

        let config = CanvasConfig::default();
        let (id, result) = drag
            .update(PointerSample::new(530.0, 420.0, Modifiers::NONE), &ctx(&config, &[]))
            .unwrap();
        assert_eq!(id, ElementId::intern("drag-photo"));
        assert_eq!(result.position, Point::new(130.0, 120.0));
    }

    #[test]
    fn shift_constrains_to_dominant_axis() {
        let (_set, host) = host();
        let mut drag = DragController::new();
        drag.begin(&photo(), (0.0, 0.0), PointerSource::Mouse, &host);
        let config = CanvasConfig::default();
        let (_, result) = drag
            .update(PointerSample::new(40.0, 15.0, Modifiers::SHIFT), &ctx(&config, &[]))
            .unwrap();
        assert_eq!(result.position, Point::new(140.0, 100.0));
    }

    #[test]
    fn clamps_to_canvas_padding() {
        let (_set, host) = host();
        let mut drag = DragController::new();
        drag.begin(&photo(), (0.0, 0.0), PointerSource::Mouse, &host);
        let config = CanvasConfig::default();
        let (_, result) = drag
            .update(PointerSample::new(5000.0, -5000.0, Modifiers::NONE), &ctx(&config, &[]))
            .unwrap();
        assert_eq!(result.position, Point::new(380.0, -280.0));
    }

    #[test]
    fn snaps_through_calculator() {
        let (_set, host) = host();
        let mut drag = DragController::new();
        drag.begin(&photo(), (0.0, 0.0), PointerSource::Mouse, &host);
        let config = CanvasConfig::default();
        let (_, result) = drag
            .update(PointerSample::new(-95.0, 50.0, Modifiers::NONE), &ctx(&config, &[]))
            .unwrap();
        // (5, 150) -> x snaps to center
        assert_eq!(result.position, Point::new(0.0, 150.0));
        assert!(result.snapped.vertical);
    }

    #[test]
    fn locked_elements_are_rejected() {
        let (set, host) = host();
        let mut drag = DragController::new();
        let mut el = photo();
        el.locked = true;
        assert!(!drag.begin(&el, (0.0, 0.0), PointerSource::Mouse, &host));
        assert!(!drag.is_active());
        assert!(set.is_empty());
    }

    #[test]
    fn second_begin_is_ignored() {
        let (_set, host) = host();
        let mut drag = DragController::new();
        assert!(drag.begin(&photo(), (0.0, 0.0), PointerSource::Mouse, &host));
        let other = Element::image("drag-other", "o.jpg", Size::new(50.0, 50.0));
        assert!(!drag.begin(&other, (0.0, 0.0), PointerSource::Mouse, &host));
        assert_eq!(drag.active_id(), Some(ElementId::intern("drag-photo")));
    }

    #[test]
    fn listeners_released_on_end_and_cancel() {
        let (set, host) = host();
        let mut drag = DragController::new();
        drag.begin(&photo(), (0.0, 0.0), PointerSource::Touch { touches: 1 }, &host);
        assert!(set.is_attached(ListenerKind::TouchMove));
        drag.end();
        assert!(set.is_empty());

        drag.begin(&photo(), (0.0, 0.0), PointerSource::Mouse, &host);
        assert!(set.is_attached(ListenerKind::PointerMove));
        let (_, start) = drag.cancel().unwrap();
        assert_eq!(start, Point::new(100.0, 100.0));
        assert!(set.is_empty());
    }

    #[test]
    fn update_without_gesture_is_none() {
        let drag = DragController::new();
        let config = CanvasConfig::default();
        assert!(
            drag.update(PointerSample::new(1.0, 1.0, Modifiers::NONE), &ctx(&config, &[]))
                .is_none()
        );
    }
}
