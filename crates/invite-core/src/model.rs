//! Core data model for invitation card canvases.
//!
//! Elements live in a flat list owned by the composition layer. Positions
//! are signed offsets of the element's center from the canvas center, so a
//! responsive resize of the hosting surface never needs a coordinate
//! translation. Conversion to top-left pixel space happens only at the
//! edges (hit testing and rendering).

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in center-relative canvas space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in top-left canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Canvas-pixel location of a resize handle on this box.
    pub fn handle_point(&self, handle: ResizeHandle) -> (f32, f32) {
        let (cx, cy) = self.center();
        let (left, top) = (self.x, self.y);
        let (right, bottom) = (self.x + self.width, self.y + self.height);
        match handle {
            ResizeHandle::N => (cx, top),
            ResizeHandle::NE => (right, top),
            ResizeHandle::E => (right, cy),
            ResizeHandle::SE => (right, bottom),
            ResizeHandle::S => (cx, bottom),
            ResizeHandle::SW => (left, bottom),
            ResizeHandle::W => (left, cy),
            ResizeHandle::NW => (left, top),
        }
    }
}

/// Dimensions of the surface elements are placed inside.
/// Recomputed on every host layout event; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a center-relative point into top-left pixel coordinates.
    pub fn to_pixels(&self, p: Point) -> (f32, f32) {
        (self.width / 2.0 + p.x, self.height / 2.0 + p.y)
    }

    /// Convert top-left pixel coordinates into a center-relative point.
    pub fn from_pixels(&self, px: f32, py: f32) -> Point {
        Point::new(px - self.width / 2.0, py - self.height / 2.0)
    }
}

// ─── Font ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16, // 100..900
    /// Integer pixels.
    pub size: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Playfair Display".into(),
            weight: 400,
            size: 16,
        }
    }
}

impl FontSpec {
    /// CSS shorthand, e.g. `400 36px "Great Vibes"`.
    pub fn css(&self) -> String {
        format!("{} {}px \"{}\"", self.weight, self.size, self.family)
    }
}

// ─── Resize capabilities ─────────────────────────────────────────────────

/// What a resize gesture drives for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeMode {
    /// Independent width/height (photos, logos).
    Box,
    /// A single scalar: the font size. Size is re-derived by measurement.
    Font,
    /// Not resizable.
    None,
}

/// One of the eight handles around an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeHandle {
    pub const CORNERS: [ResizeHandle; 4] = [Self::NW, Self::NE, Self::SE, Self::SW];
    pub const ALL: [ResizeHandle; 8] = [
        Self::NW,
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
    ];

    pub fn is_corner(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }

    /// CSS cursor for the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::NE | Self::SW => "nesw-resize",
            Self::NW | Self::SE => "nwse-resize",
        }
    }
}

/// Per-kind capability descriptor consumed by the drag/resize controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub resize: ResizeMode,
    pub aspect_locked: bool,
    pub min_size: Size,
    pub max_size: Size,
}

impl Capabilities {
    pub fn for_kind(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Text { .. } => Self {
                resize: ResizeMode::Font,
                aspect_locked: false,
                min_size: Size::new(20.0, 10.0),
                max_size: Size::new(2000.0, 2000.0),
            },
            ElementKind::Image { .. } => Self {
                resize: ResizeMode::Box,
                aspect_locked: true,
                min_size: Size::new(40.0, 40.0),
                max_size: Size::new(1200.0, 1200.0),
            },
            ElementKind::Icon { .. } => Self {
                resize: ResizeMode::Box,
                aspect_locked: true,
                min_size: Size::new(16.0, 16.0),
                max_size: Size::new(400.0, 400.0),
            },
        }
    }

    /// Handles exposed for this element. Edge handles only appear when the
    /// element supports non-uniform resize.
    pub fn handles(&self) -> SmallVec<[ResizeHandle; 8]> {
        match self.resize {
            ResizeMode::None => SmallVec::new(),
            ResizeMode::Font => SmallVec::from_slice(&ResizeHandle::CORNERS),
            ResizeMode::Box if self.aspect_locked => SmallVec::from_slice(&ResizeHandle::CORNERS),
            ResizeMode::Box => SmallVec::from_slice(&ResizeHandle::ALL),
        }
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text {
        content: String,
        font: FontSpec,
        /// Wrap width in pixels; `None` measures a single unwrapped run.
        max_width: Option<f32>,
    },
    Image {
        src: String,
    },
    Icon {
        name: String,
    },
}

/// Stacking-order change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZOrder {
    Forward,
    Backward,
    ToFront,
    ToBack,
}

/// A placed item on the card canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Center offset from the canvas center.
    pub position: Point,
    /// Derived from measurement for text elements.
    pub size: Size,
    /// Degrees. Not affected by resize.
    pub rotation: f32,
    pub z_index: i32,
    pub locked: bool,
    pub caps: Capabilities,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        let caps = Capabilities::for_kind(&kind);
        Self {
            id,
            kind,
            position: Point::ORIGIN,
            size: Size::new(100.0, 30.0),
            rotation: 0.0,
            z_index: 0,
            locked: false,
            caps,
        }
    }

    pub fn text(id: &str, content: &str, font: FontSpec) -> Self {
        Self::new(
            ElementId::intern(id),
            ElementKind::Text {
                content: content.to_string(),
                font,
                max_width: None,
            },
        )
    }

    pub fn image(id: &str, src: &str, size: Size) -> Self {
        let mut el = Self::new(
            ElementId::intern(id),
            ElementKind::Image {
                src: src.to_string(),
            },
        );
        el.size = size;
        el
    }

    pub fn icon(id: &str, name: &str, size: Size) -> Self {
        let mut el = Self::new(
            ElementId::intern(id),
            ElementKind::Icon {
                name: name.to_string(),
            },
        );
        el.size = size;
        el
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    pub fn font(&self) -> Option<&FontSpec> {
        match &self.kind {
            ElementKind::Text { font, .. } => Some(font),
            _ => None,
        }
    }

    pub fn font_size(&self) -> Option<u32> {
        self.font().map(|f| f.size)
    }

    /// Box in top-left pixel space for the given canvas.
    pub fn bounds(&self, canvas: CanvasSize) -> Bounds {
        let (cx, cy) = canvas.to_pixels(self.position);
        Bounds {
            x: cx - self.size.width / 2.0,
            y: cy - self.size.height / 2.0,
            width: self.size.width,
            height: self.size.height,
        }
    }
}
