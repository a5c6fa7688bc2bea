//! Dynamic font sizing.
//!
//! A text element's font size is anchored to a `(base_font_size, base_width)`
//! pair. Width changes map back to a font size through a square-root curve so
//! long names grow the box faster than the type. Handle-driven scaling from
//! the resize controller goes through the same [`FontScaleConfig::font_size_for_scale`],
//! so both routes always agree.

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Font size reported for elements the engine does not track.
pub const DEFAULT_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFontScaleConfig")]
pub struct FontScaleConfig {
    pub base_font_size: u32,
    pub base_width: f32,
    pub min_font_size: u32,
    pub max_font_size: u32,
}

/// Wire form of [`FontScaleConfig`]; bounds are normalized on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFontScaleConfig {
    base_font_size: u32,
    base_width: f32,
    min_font_size: u32,
    max_font_size: u32,
}

impl From<RawFontScaleConfig> for FontScaleConfig {
    fn from(raw: RawFontScaleConfig) -> Self {
        Self::new(raw.base_font_size, raw.base_width, raw.min_font_size, raw.max_font_size)
    }
}

impl FontScaleConfig {
    pub fn new(base_font_size: u32, base_width: f32, min_font_size: u32, max_font_size: u32) -> Self {
        let (min_font_size, max_font_size) = if min_font_size <= max_font_size {
            (min_font_size, max_font_size)
        } else {
            (max_font_size, min_font_size)
        };
        Self {
            base_font_size,
            base_width,
            min_font_size,
            max_font_size,
        }
    }

    /// Default anchors for the invitation text roles.
    pub fn for_role(role: &str) -> Option<Self> {
        let config = match role {
            "brideName" | "groomName" => Self::new(36, 200.0, 18, 72),
            "date" => Self::new(18, 180.0, 12, 36),
            "venue" => Self::new(16, 220.0, 12, 32),
            "message" => Self::new(14, 260.0, 10, 28),
            _ => return None,
        };
        Some(config)
    }

    /// The same bounds re-anchored at a new `(font size, width)` pair.
    /// Resize gestures anchor at the element's state when the gesture starts.
    pub fn rebased(&self, base_font_size: u32, base_width: f32) -> Self {
        Self {
            base_font_size,
            base_width,
            ..*self
        }
    }

    /// Scale factors that keep the font size within bounds.
    pub fn scale_bounds(&self) -> (f32, f32) {
        if self.base_font_size == 0 {
            return (1.0, 1.0);
        }
        let base = self.base_font_size as f32;
        (
            self.min_font_size as f32 / base,
            self.max_font_size as f32 / base,
        )
    }

    /// Never panics, even if the public bounds were set out of order.
    pub fn clamp(&self, font_size: u32) -> u32 {
        let lo = self.min_font_size.min(self.max_font_size);
        let hi = self.min_font_size.max(self.max_font_size);
        font_size.max(lo).min(hi)
    }

    /// `round(base_font_size * scale)`, clamped. The single authority for
    /// turning a scale factor into a font size.
    pub fn font_size_for_scale(&self, scale: f32) -> u32 {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
        let raw = (self.base_font_size as f32 * scale).round();
        self.clamp(raw as u32)
    }

    /// Font size for a box of `width`, using `sqrt(width / base_width)`.
    pub fn font_size_for_width(&self, width: f32) -> u32 {
        if self.base_width <= 0.0 || !self.base_width.is_finite() {
            return self.clamp(self.base_font_size);
        }
        let ratio = (width / self.base_width).max(0.0);
        self.font_size_for_scale(ratio.sqrt())
    }
}

/// Registry of per-element scaling anchors plus the last font size handed
/// out for each element.
#[derive(Debug, Clone, Default)]
pub struct FontSizer {
    configs: HashMap<ElementId, FontScaleConfig>,
    current: HashMap<ElementId, u32>,
}

impl FontSizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ElementId, config: FontScaleConfig, font_size: u32) {
        self.configs.insert(id, config);
        self.current.insert(id, config.clamp(font_size));
    }

    pub fn unregister(&mut self, id: ElementId) {
        self.configs.remove(&id);
        self.current.remove(&id);
    }

    pub fn config(&self, id: ElementId) -> Option<&FontScaleConfig> {
        self.configs.get(&id)
    }

    /// Last tracked font size, or [`DEFAULT_FONT_SIZE`].
    pub fn current(&self, id: ElementId) -> u32 {
        self.current.get(&id).copied().unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Record a font size set by another path (e.g. a handle gesture).
    pub fn track(&mut self, id: ElementId, font_size: u32) {
        if self.configs.contains_key(&id) {
            self.current.insert(id, font_size);
        }
    }

    /// Font size for `id` at `new_width`. Unknown ids pass through and
    /// report their tracked size.
    pub fn font_size_for_width(&mut self, id: ElementId, new_width: f32) -> u32 {
        let Some(config) = self.configs.get(&id) else {
            return self.current(id);
        };
        let size = config.font_size_for_width(new_width);
        log::trace!("font size for {id} at width {new_width}: {size}px");
        self.current.insert(id, size);
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> FontScaleConfig {
        FontScaleConfig::new(36, 200.0, 18, 72)
    }

    #[test]
    fn sqrt_scaling_hits_lower_bound() {
        // 50 / 200 = 0.25, sqrt = 0.5, 36 * 0.5 = 18
        assert_eq!(names().font_size_for_width(50.0), 18);
    }

    #[test]
    fn sqrt_scaling_clamps_to_max() {
        // 3200 / 200 = 16, sqrt = 4, 36 * 4 = 144 -> 72
        assert_eq!(names().font_size_for_width(3200.0), 72);
    }

    #[test]
    fn base_width_returns_base_size() {
        assert_eq!(names().font_size_for_width(200.0), 36);
    }

    #[test]
    fn degenerate_widths_stay_in_bounds() {
        let c = names();
        assert_eq!(c.font_size_for_width(0.0), 18);
        assert_eq!(c.font_size_for_width(-40.0), 18);
        assert_eq!(c.font_size_for_width(f32::NAN), 18);
        let broken = FontScaleConfig::new(36, 0.0, 18, 72);
        assert_eq!(broken.font_size_for_width(500.0), 36);
    }

    #[test]
    fn scale_bounds_follow_base() {
        let (lo, hi) = names().scale_bounds();
        assert!((lo - 0.5).abs() < 1e-6);
        assert!((hi - 2.0).abs() < 1e-6);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let c = FontScaleConfig::new(20, 100.0, 40, 10);
        assert_eq!((c.min_font_size, c.max_font_size), (10, 40));
    }

    #[test]
    fn swapped_bounds_from_json_are_normalized() {
        let json = r#"{"baseFontSize":36,"baseWidth":200.0,"minFontSize":72,"maxFontSize":18}"#;
        let c: FontScaleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c, names());
        assert_eq!(c.font_size_for_width(3200.0), 72);
    }

    #[test]
    fn clamp_tolerates_inverted_fields() {
        let c = FontScaleConfig {
            min_font_size: 40,
            max_font_size: 10,
            ..names()
        };
        assert_eq!(c.clamp(100), 40);
        assert_eq!(c.clamp(2), 10);
        assert_eq!(c.clamp(25), 25);
    }

    #[test]
    fn unknown_ids_pass_through() {
        let mut sizer = FontSizer::new();
        let id = ElementId::intern("unregistered-label");
        assert_eq!(sizer.font_size_for_width(id, 900.0), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn sizer_tracks_last_result() {
        let mut sizer = FontSizer::new();
        let id = ElementId::intern("groomName");
        sizer.register(id, names(), 36);
        assert_eq!(sizer.font_size_for_width(id, 800.0), 72);
        assert_eq!(sizer.current(id), 72);
        sizer.track(id, 40);
        assert_eq!(sizer.current(id), 40);
    }
}
