//! Bounds clamping and grid rounding in center-relative canvas space.

use crate::model::{CanvasSize, Point};

/// `value` limited to `[lo, hi]`. Unlike `f32::clamp` this never panics;
/// an inverted range resolves to `hi`.
pub fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() {
        return lo.min(hi);
    }
    value.max(lo).min(hi)
}

/// Allowed range for an element center on one axis of `extent` pixels.
/// Collapses to `0.0` when the canvas is narrower than twice the padding.
pub fn axis_range(extent: f32, padding: f32) -> (f32, f32) {
    let half = extent / 2.0 - padding;
    if half <= 0.0 { (0.0, 0.0) } else { (-half, half) }
}

/// Keep a position inside the canvas minus `padding` on every edge.
pub fn clamp_position(p: Point, canvas: CanvasSize, padding: f32) -> Point {
    let (min_x, max_x) = axis_range(canvas.width, padding);
    let (min_y, max_y) = axis_range(canvas.height, padding);
    Point::new(clamp_axis(p.x, min_x, max_x), clamp_axis(p.y, min_y, max_y))
}

/// Round to the nearest multiple of `grid`. Non-positive grids are ignored.
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    if grid > 0.0 && grid.is_finite() {
        (value / grid).round() * grid
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_inside_padding() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let p = clamp_position(Point::new(1000.0, -1000.0), canvas, 20.0);
        assert_eq!(p, Point::new(380.0, -280.0));
        let inside = Point::new(12.0, -7.5);
        assert_eq!(clamp_position(inside, canvas, 20.0), inside);
    }

    #[test]
    fn tiny_canvas_collapses_to_center() {
        let canvas = CanvasSize::new(30.0, 30.0);
        assert_eq!(clamp_position(Point::new(9.0, -9.0), canvas, 20.0), Point::ORIGIN);
    }

    #[test]
    fn nan_is_pulled_into_range() {
        assert_eq!(clamp_axis(f32::NAN, -5.0, 5.0), -5.0);
    }

    #[test]
    fn grid_rounding() {
        assert_eq!(snap_to_grid(14.0, 10.0), 10.0);
        assert_eq!(snap_to_grid(15.0, 10.0), 20.0);
        assert_eq!(snap_to_grid(14.0, 0.0), 14.0);
    }
}
