//! Render model handed to the host.
//!
//! Everything here is in top-left CSS pixel space, already in paint order,
//! so the host only has to draw it.

use invite_core::measure::layout_text;
use invite_core::{CanvasSize, Element, ElementKind, FontSpec, Guide, GuideAxis, MeasureBackend, ResizeHandle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderHandle {
    pub handle: ResizeHandle,
    pub x: f32,
    pub y: f32,
    pub cursor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderContent {
    #[serde(rename_all = "camelCase")]
    Text {
        lines: Vec<String>,
        font: String,
        font_size: u32,
        /// True while a resize gesture previews an uncommitted size.
        preview: bool,
    },
    Image {
        src: String,
    },
    Icon {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    pub id: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub z_index: i32,
    pub locked: bool,
    pub selected: bool,
    pub content: RenderContent,
    /// Only populated for the selected, unlocked element.
    pub handles: Vec<RenderHandle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGuide {
    pub id: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub active: bool,
    pub center: bool,
}

impl RenderGuide {
    pub fn from_guide(guide: &Guide, canvas: CanvasSize) -> Self {
        let (cx, cy) = (canvas.width / 2.0, canvas.height / 2.0);
        let (x1, y1, x2, y2) = match guide.axis {
            GuideAxis::Vertical => (
                cx + guide.position,
                cy + guide.span.0,
                cx + guide.position,
                cy + guide.span.1,
            ),
            GuideAxis::Horizontal => (
                cx + guide.span.0,
                cy + guide.position,
                cx + guide.span.1,
                cy + guide.position,
            ),
        };
        Self {
            id: guide.id.clone(),
            x1,
            y1,
            x2,
            y2,
            active: guide.is_active,
            center: guide.is_center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub revision: u64,
    pub width: f32,
    pub height: f32,
    pub items: Vec<RenderItem>,
    pub guides: Vec<RenderGuide>,
    pub description: Option<String>,
}

/// Build the render item for one element. `preview_font` overrides the
/// committed font size of a text element mid-resize.
pub(crate) fn render_item(
    element: &Element,
    canvas: CanvasSize,
    measurer: &dyn MeasureBackend,
    selected: bool,
    preview_font: Option<u32>,
) -> RenderItem {
    let mut size = element.size;
    let content = match &element.kind {
        ElementKind::Text {
            content,
            font,
            max_width,
        } => {
            let font = FontSpec {
                size: preview_font.unwrap_or(font.size),
                ..font.clone()
            };
            let lines = match layout_text(measurer, content, &font, *max_width) {
                Some(layout) => {
                    if preview_font.is_some() {
                        size = layout.size;
                    }
                    layout.lines.into_iter().map(|line| line.text).collect()
                }
                None => content.split('\n').map(str::to_string).collect(),
            };
            RenderContent::Text {
                lines,
                font: font.css(),
                font_size: font.size,
                preview: preview_font.is_some(),
            }
        }
        ElementKind::Image { src } => RenderContent::Image { src: src.clone() },
        ElementKind::Icon { name } => RenderContent::Icon { name: name.clone() },
    };

    let (cx, cy) = canvas.to_pixels(element.position);
    let left = cx - size.width / 2.0;
    let top = cy - size.height / 2.0;
    let bounds = invite_core::Bounds {
        x: left,
        y: top,
        width: size.width,
        height: size.height,
    };
    let handles = if selected && !element.locked {
        element
            .caps
            .handles()
            .into_iter()
            .map(|handle| {
                let (x, y) = bounds.handle_point(handle);
                RenderHandle {
                    handle,
                    x,
                    y,
                    cursor: handle.cursor(),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    RenderItem {
        id: element.id.to_string(),
        left,
        top,
        width: size.width,
        height: size.height,
        rotation: element.rotation,
        z_index: element.z_index,
        locked: element.locked,
        selected,
        content,
        handles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invite_core::{ApproxMetrics, Size};

    #[test]
    fn vertical_guide_spans_in_pixels() {
        let guide = Guide {
            id: "center-vertical".into(),
            axis: GuideAxis::Vertical,
            position: 0.0,
            span: (-300.0, 300.0),
            is_active: true,
            is_center: true,
        };
        let r = RenderGuide::from_guide(&guide, CanvasSize::new(800.0, 600.0));
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (400.0, 0.0, 400.0, 600.0));
        assert!(r.active && r.center);
    }

    #[test]
    fn handles_only_for_selected_unlocked() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let photo = Element::image("render-photo", "p.jpg", Size::new(100.0, 50.0));
        let metrics = ApproxMetrics::default();

        let item = render_item(&photo, canvas, &metrics, true, None);
        assert_eq!((item.left, item.top), (350.0, 275.0));
        assert_eq!(item.handles.len(), 4);

        let item = render_item(&photo, canvas, &metrics, false, None);
        assert!(item.handles.is_empty());

        let mut locked = photo.clone();
        locked.locked = true;
        assert!(render_item(&locked, canvas, &metrics, true, None).handles.is_empty());
    }

    #[test]
    fn preview_font_resizes_text_box() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let metrics = ApproxMetrics::default();
        let mut title = Element::text("render-title", "Anna & Ben", FontSpec::default());
        title.size = invite_core::measure(&metrics, "Anna & Ben", title.font().unwrap(), None);

        let committed = render_item(&title, canvas, &metrics, true, None);
        let preview = render_item(&title, canvas, &metrics, true, Some(32));
        assert!(preview.width > committed.width);
        match preview.content {
            RenderContent::Text { font_size, preview, .. } => {
                assert_eq!(font_size, 32);
                assert!(preview);
            }
            other => panic!("expected text content, got {other:?}"),
        }
    }
}
