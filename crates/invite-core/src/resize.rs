//! Resize math for box- and font-driven elements.
//!
//! Pure functions from a handle drag `(handle, dx, dy)` to a new size or a
//! font scale factor. Gesture bookkeeping lives in the editor crate.

use crate::font_scale::FontScaleConfig;
use crate::layout::{clamp_axis, snap_to_grid};
use crate::model::{ResizeHandle, Size};

/// Pixels of handle travel that double (or halve toward zero) the font size.
pub const FONT_SCALE_SENSITIVITY: f32 = 100.0;

/// Limits for a box resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min: Size,
    pub max: Size,
    /// width / height, when locked.
    pub aspect_ratio: Option<f32>,
    /// Round to multiples of this before clamping.
    pub grid: Option<f32>,
}

/// New size for a box dragged by `handle` from `start`.
pub fn resize_box(handle: ResizeHandle, start: Size, dx: f32, dy: f32, c: &BoxConstraints) -> Size {
    let (mut w, mut h) = (start.width, start.height);
    match handle {
        ResizeHandle::SE => {
            w += dx;
            h += dy;
        }
        ResizeHandle::SW => {
            w -= dx;
            h += dy;
        }
        ResizeHandle::NE => {
            w += dx;
            h -= dy;
        }
        ResizeHandle::NW => {
            w -= dx;
            h -= dy;
        }
        ResizeHandle::E => w += dx,
        ResizeHandle::W => w -= dx,
        ResizeHandle::S => h += dy,
        ResizeHandle::N => h -= dy,
    }

    if let Some(grid) = c.grid {
        w = snap_to_grid(w, grid);
        h = snap_to_grid(h, grid);
    }

    match c.aspect_ratio.filter(|r| r.is_finite() && *r > 0.0) {
        Some(ratio) => {
            // Top/bottom edges drive the height; everything else the width.
            let driving_width = if matches!(handle, ResizeHandle::N | ResizeHandle::S) {
                h * ratio
            } else {
                w
            };
            fit_aspect(driving_width, ratio, c)
        }
        None => Size::new(
            clamp_axis(w, c.min.width, c.max.width),
            clamp_axis(h, c.min.height, c.max.height),
        ),
    }
}

/// Clamp `width` so both it and `width / ratio` respect their limits,
/// taking whichever bound is tighter.
fn fit_aspect(width: f32, ratio: f32, c: &BoxConstraints) -> Size {
    let lo = c.min.width.max(c.min.height * ratio);
    let hi = c.max.width.min(c.max.height * ratio);
    let width = if lo <= hi {
        width.clamp(lo, hi)
    } else {
        // Limits cannot all hold at this ratio; honor the maxima.
        hi
    };
    Size::new(width, width / ratio)
}

/// Signed handle travel for a font-driven resize. Positive grows.
///
/// Corners average both axes with the outward sign of the corner (so the
/// NE/SW corners take a signed difference). Edges use the magnitude of the
/// travel along their own axis, so an edge drag only ever grows the text.
pub fn font_drag_delta(handle: ResizeHandle, dx: f32, dy: f32) -> f32 {
    match handle {
        ResizeHandle::SE => (dx + dy) / 2.0,
        ResizeHandle::NW => -(dx + dy) / 2.0,
        ResizeHandle::NE => (dx - dy) / 2.0,
        ResizeHandle::SW => (dy - dx) / 2.0,
        ResizeHandle::E | ResizeHandle::W => dx.abs(),
        ResizeHandle::N | ResizeHandle::S => dy.abs(),
    }
}

/// Scale factor `1 + delta / 100`, clamped so the resulting font size
/// stays within the element's bounds.
pub fn font_scale(handle: ResizeHandle, dx: f32, dy: f32, config: &FontScaleConfig) -> f32 {
    let (lo, hi) = config.scale_bounds();
    let scale = 1.0 + font_drag_delta(handle, dx, dy) / FONT_SCALE_SENSITIVITY;
    clamp_axis(scale, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free() -> BoxConstraints {
        BoxConstraints {
            min: Size::new(40.0, 40.0),
            max: Size::new(600.0, 400.0),
            aspect_ratio: None,
            grid: None,
        }
    }

    #[test]
    fn corner_directions() {
        let start = Size::new(200.0, 100.0);
        let c = free();
        assert_eq!(resize_box(ResizeHandle::SE, start, 10.0, 20.0, &c), Size::new(210.0, 120.0));
        assert_eq!(resize_box(ResizeHandle::SW, start, 10.0, 20.0, &c), Size::new(190.0, 120.0));
        assert_eq!(resize_box(ResizeHandle::NE, start, 10.0, 20.0, &c), Size::new(210.0, 80.0));
        assert_eq!(resize_box(ResizeHandle::NW, start, 10.0, 20.0, &c), Size::new(190.0, 80.0));
    }

    #[test]
    fn edges_move_one_axis() {
        let start = Size::new(200.0, 100.0);
        let c = free();
        assert_eq!(resize_box(ResizeHandle::E, start, 10.0, 20.0, &c), Size::new(210.0, 100.0));
        assert_eq!(resize_box(ResizeHandle::N, start, 10.0, 20.0, &c), Size::new(200.0, 80.0));
    }

    #[test]
    fn each_axis_clamped() {
        let c = free();
        let s = resize_box(ResizeHandle::SE, Size::new(200.0, 100.0), 900.0, -500.0, &c);
        assert_eq!(s, Size::new(600.0, 40.0));
    }

    #[test]
    fn aspect_locked_derives_height() {
        let c = BoxConstraints {
            aspect_ratio: Some(2.0),
            ..free()
        };
        let s = resize_box(ResizeHandle::SE, Size::new(200.0, 100.0), 100.0, 0.0, &c);
        assert_eq!(s, Size::new(300.0, 150.0));
    }

    #[test]
    fn aspect_locked_respects_tighter_height_bound() {
        // ratio 1: max height 400 binds before max width 600
        let c = BoxConstraints {
            aspect_ratio: Some(1.0),
            ..free()
        };
        let s = resize_box(ResizeHandle::SE, Size::new(300.0, 300.0), 250.0, 250.0, &c);
        assert_eq!(s, Size::new(400.0, 400.0));
    }

    #[test]
    fn grid_rounds_before_clamp() {
        let c = BoxConstraints {
            grid: Some(10.0),
            ..free()
        };
        let s = resize_box(ResizeHandle::SE, Size::new(200.0, 100.0), 14.0, 6.0, &c);
        assert_eq!(s, Size::new(210.0, 110.0));
    }

    #[test]
    fn font_delta_directions() {
        assert_eq!(font_drag_delta(ResizeHandle::SE, 10.0, 20.0), 15.0);
        assert_eq!(font_drag_delta(ResizeHandle::NW, 10.0, 20.0), -15.0);
        assert_eq!(font_drag_delta(ResizeHandle::NE, 10.0, -20.0), 15.0);
        assert_eq!(font_drag_delta(ResizeHandle::SW, -10.0, 20.0), 15.0);
        assert_eq!(font_drag_delta(ResizeHandle::W, -8.0, 0.0), 8.0);
        assert_eq!(font_drag_delta(ResizeHandle::W, 8.0, 0.0), 8.0);
        assert_eq!(font_drag_delta(ResizeHandle::S, 30.0, -6.0), 6.0);
        assert_eq!(font_drag_delta(ResizeHandle::N, 30.0, 6.0), 6.0);
    }

    #[test]
    fn font_scale_is_clamped() {
        let config = FontScaleConfig::new(36, 200.0, 18, 72);
        assert!((font_scale(ResizeHandle::SE, 50.0, 50.0, &config) - 1.5).abs() < 1e-6);
        assert!((font_scale(ResizeHandle::SE, 500.0, 500.0, &config) - 2.0).abs() < 1e-6);
        assert!((font_scale(ResizeHandle::NW, 500.0, 500.0, &config) - 0.5).abs() < 1e-6);
    }
}
