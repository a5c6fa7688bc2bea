//! Alignment snapping and guide detection.
//!
//! Given a candidate center position for the element being dragged, snaps
//! each axis independently, first to the canvas center, then to sibling
//! centers, and reports which guides to draw.
//!
//! When several siblings qualify on an axis, the first one in the order
//! given wins. This is deterministic but not "nearest sibling"; callers that
//! care about which sibling wins control it through the slice order.
//!
//! The snapped position is resolved to a fixed point: a sibling coordinate
//! that itself lies within tolerance of the canvas center is pulled onward
//! to the center, so snapping an already-snapped position never moves it.
//! A single center-then-sibling pass would not have that property: with a
//! tolerance of 8, a candidate at `x = 12` would land on a sibling at
//! `x = 5`, and snapping again would move it to `0`. The walk therefore
//! returns `0` directly.

use crate::id::ElementId;
use crate::model::{CanvasSize, Point, Size};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A sibling the dragged element may align with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub id: ElementId,
    pub position: Point,
    pub size: Size,
}

/// Orientation of a guide line. A vertical guide is drawn at an x
/// coordinate and reports alignment on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    Horizontal,
    Vertical,
}

/// Ephemeral render-only alignment guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: String,
    pub axis: GuideAxis,
    /// Center-relative coordinate of the line (x for vertical, y for horizontal).
    pub position: f32,
    /// Extent of the line along its own direction, center-relative.
    pub span: (f32, f32),
    pub is_active: bool,
    pub is_center: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnappedAxes {
    /// The y coordinate snapped (element sits on a horizontal line).
    pub horizontal: bool,
    /// The x coordinate snapped (element sits on a vertical line).
    pub vertical: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    pub snapped: SnappedAxes,
    pub guides: SmallVec<[Guide; 4]>,
    pub description: Option<String>,
}

/// Everything the calculator needs about one drag tick.
#[derive(Debug, Clone, Copy)]
pub struct SnapRequest<'a> {
    pub element_id: ElementId,
    pub candidate: Point,
    pub element_size: Size,
    pub canvas: CanvasSize,
    pub siblings: &'a [SnapTarget],
    pub tolerance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AxisSnap {
    None,
    Center,
    Sibling(ElementId, f32),
}

/// Snap one axis. `coord` picks the axis out of a point.
fn snap_axis(
    value: f32,
    element_id: ElementId,
    siblings: &[SnapTarget],
    tolerance: f32,
    coord: fn(&Point) -> f32,
) -> (f32, AxisSnap) {
    if tolerance <= 0.0 || !value.is_finite() {
        return (value, AxisSnap::None);
    }

    let mut current = value;
    let mut last = AxisSnap::None;
    // Each sibling hop lands on a strictly earlier sibling in slice order,
    // so the walk settles within `siblings.len() + 1` steps.
    for _ in 0..=siblings.len() + 1 {
        if current.abs() <= tolerance {
            return (0.0, AxisSnap::Center);
        }
        let hit = siblings
            .iter()
            .filter(|s| s.id != element_id)
            .find(|s| (current - coord(&s.position)).abs() <= tolerance);
        match hit {
            Some(s) => {
                let target = coord(&s.position);
                let settled = target == current;
                current = target;
                last = AxisSnap::Sibling(s.id, target);
                if settled {
                    break;
                }
            }
            None => break,
        }
    }
    (current, last)
}

/// Compute the snapped position and the guides for a drag tick.
/// Pure: never mutates its inputs.
pub fn compute_snap(req: &SnapRequest<'_>) -> SnapResult {
    let tol = req.tolerance;
    let (x, x_snap) = snap_axis(req.candidate.x, req.element_id, req.siblings, tol, |p| p.x);
    let (y, y_snap) = snap_axis(req.candidate.y, req.element_id, req.siblings, tol, |p| p.y);
    let position = Point::new(x, y);

    let half_w = req.canvas.width / 2.0;
    let half_h = req.canvas.height / 2.0;
    let mut guides: SmallVec<[Guide; 4]> = SmallVec::new();

    // Canvas-center guides are always shown while dragging.
    guides.push(Guide {
        id: "center-vertical".into(),
        axis: GuideAxis::Vertical,
        position: 0.0,
        span: (-half_h, half_h),
        is_active: x_snap == AxisSnap::Center,
        is_center: true,
    });
    guides.push(Guide {
        id: "center-horizontal".into(),
        axis: GuideAxis::Horizontal,
        position: 0.0,
        span: (-half_w, half_w),
        is_active: y_snap == AxisSnap::Center,
        is_center: true,
    });

    // Sibling guides appear within twice the tolerance for early feedback.
    if tol > 0.0 {
        let near = 2.0 * tol;
        for s in req.siblings.iter().filter(|s| s.id != req.element_id) {
            if (req.candidate.x - s.position.x).abs() <= near {
                let (a, b) = vertical_span(position, req.element_size, s);
                guides.push(Guide {
                    id: format!("{}-vertical", s.id),
                    axis: GuideAxis::Vertical,
                    position: s.position.x,
                    span: (a, b),
                    is_active: matches!(x_snap, AxisSnap::Sibling(_, v) if v == s.position.x),
                    is_center: false,
                });
            }
            if (req.candidate.y - s.position.y).abs() <= near {
                let (a, b) = horizontal_span(position, req.element_size, s);
                guides.push(Guide {
                    id: format!("{}-horizontal", s.id),
                    axis: GuideAxis::Horizontal,
                    position: s.position.y,
                    span: (a, b),
                    is_active: matches!(y_snap, AxisSnap::Sibling(_, v) if v == s.position.y),
                    is_center: false,
                });
            }
        }
    }

    let snapped = SnappedAxes {
        horizontal: y_snap != AxisSnap::None,
        vertical: x_snap != AxisSnap::None,
    };

    SnapResult {
        position,
        snapped,
        guides,
        description: describe(x_snap, y_snap),
    }
}

/// Vertical guide spans from the top of the higher box to the bottom of the lower.
fn vertical_span(p: Point, size: Size, s: &SnapTarget) -> (f32, f32) {
    let top = (p.y - size.height / 2.0).min(s.position.y - s.size.height / 2.0);
    let bottom = (p.y + size.height / 2.0).max(s.position.y + s.size.height / 2.0);
    (top, bottom)
}

fn horizontal_span(p: Point, size: Size, s: &SnapTarget) -> (f32, f32) {
    let left = (p.x - size.width / 2.0).min(s.position.x - s.size.width / 2.0);
    let right = (p.x + size.width / 2.0).max(s.position.x + s.size.width / 2.0);
    (left, right)
}

fn describe(x: AxisSnap, y: AxisSnap) -> Option<String> {
    match (x, y) {
        (AxisSnap::None, AxisSnap::None) => None,
        (AxisSnap::Center, AxisSnap::Center) => Some("Centered on card".into()),
        (AxisSnap::Sibling(a, _), AxisSnap::Sibling(b, _)) if a == b => {
            Some(format!("Aligned with {a}"))
        }
        _ => {
            let parts: Vec<String> = [
                match x {
                    AxisSnap::Center => Some("Centered horizontally".to_string()),
                    AxisSnap::Sibling(id, _) => Some(format!("Vertically aligned with {id}")),
                    AxisSnap::None => None,
                },
                match y {
                    AxisSnap::Center => Some("Centered vertically".to_string()),
                    AxisSnap::Sibling(id, _) => Some(format!("Horizontally aligned with {id}")),
                    AxisSnap::None => None,
                },
            ]
            .into_iter()
            .flatten()
            .collect();
            Some(parts.join(", "))
        }
    }
}
