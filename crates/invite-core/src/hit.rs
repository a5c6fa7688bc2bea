//! Hit testing: canvas pixel → element or resize handle.

use crate::id::ElementId;
use crate::model::{CanvasSize, Element, ResizeHandle};

/// Radius in pixels around a handle's center that counts as a hit.
pub const HANDLE_HIT_RADIUS: f32 = 8.0;

/// Indices of `elements` in paint order (lowest z first, insertion order
/// breaking ties).
pub fn paint_order(elements: &[Element]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z_index);
    order
}

/// Topmost element whose box contains `(px, py)` in top-left pixel space.
pub fn hit_test(elements: &[Element], canvas: CanvasSize, px: f32, py: f32) -> Option<ElementId> {
    paint_order(elements)
        .into_iter()
        .rev()
        .map(|i| &elements[i])
        .find(|el| el.bounds(canvas).contains(px, py))
        .map(|el| el.id)
}

/// Resize handle of `element` under `(px, py)`, if any.
pub fn hit_test_handle(element: &Element, canvas: CanvasSize, px: f32, py: f32) -> Option<ResizeHandle> {
    let bounds = element.bounds(canvas);
    element.caps.handles().into_iter().find(|&handle| {
        let (hx, hy) = bounds.handle_point(handle);
        (px - hx).abs() <= HANDLE_HIT_RADIUS && (py - hy).abs() <= HANDLE_HIT_RADIUS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSpec, Size};

    fn canvas() -> CanvasSize {
        CanvasSize::new(800.0, 600.0)
    }

    #[test]
    fn topmost_by_z_index() {
        let mut back = Element::image("hit-back", "a.jpg", Size::new(200.0, 200.0));
        back.z_index = 1;
        let front = Element::image("hit-front", "b.jpg", Size::new(100.0, 100.0));
        let elements = vec![back, front];
        // Both contain the canvas center; "back" has the higher z.
        assert_eq!(hit_test(&elements, canvas(), 400.0, 300.0), Some(ElementId::intern("hit-back")));
    }

    #[test]
    fn later_insertion_wins_ties() {
        let a = Element::image("tie-a", "a.jpg", Size::new(100.0, 100.0));
        let b = Element::image("tie-b", "b.jpg", Size::new(100.0, 100.0));
        let elements = vec![a, b];
        assert_eq!(hit_test(&elements, canvas(), 400.0, 300.0), Some(ElementId::intern("tie-b")));
    }

    #[test]
    fn background_is_none() {
        let el = Element::text("hit-text", "Hello", FontSpec::default());
        assert_eq!(hit_test(&[el], canvas(), 5.0, 5.0), None);
    }

    #[test]
    fn corner_handle_hit() {
        let el = Element::image("hit-handle", "a.jpg", Size::new(100.0, 100.0));
        // SE corner sits at (450, 350)
        assert_eq!(hit_test_handle(&el, canvas(), 454.0, 347.0), Some(ResizeHandle::SE));
        assert_eq!(hit_test_handle(&el, canvas(), 400.0, 300.0), None);
    }
}
