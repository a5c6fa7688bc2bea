//! Template seeding.
//!
//! A template describes the elements a card design starts with and where
//! they sit. The catalog hands it over as JSON; the canvas builds its
//! element list from it and keeps the resulting layout as the snapshot
//! `reset_layout` returns to.

use invite_core::{Element, ElementId, ElementKind, FontScaleConfig, FontSpec, Point, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateContent {
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        #[serde(default)]
        font_family: Option<String>,
        #[serde(default)]
        font_weight: Option<u16>,
        /// Falls back to the role's base size, then to the default font.
        #[serde(default)]
        font_size: Option<u32>,
        #[serde(default)]
        max_width: Option<f32>,
    },
    Image {
        src: String,
        width: f32,
        height: f32,
    },
    Icon {
        name: String,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateElement {
    pub id: String,
    #[serde(flatten)]
    pub content: TemplateContent,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub locked: bool,
    /// Overrides the role table in [`FontScaleConfig::for_role`].
    #[serde(default)]
    pub font_scale: Option<FontScaleConfig>,
}

impl TemplateElement {
    /// Build the element and the font scaling anchor it should register.
    /// Text sizes are left for the canvas to measure.
    pub fn build(&self) -> (Element, Option<FontScaleConfig>) {
        let id = ElementId::intern(&self.id);
        let (kind, size, font_config) = match &self.content {
            TemplateContent::Text {
                content,
                font_family,
                font_weight,
                font_size,
                max_width,
            } => {
                let config = self.font_scale.or_else(|| FontScaleConfig::for_role(&self.id));
                let defaults = FontSpec::default();
                let font = FontSpec {
                    family: font_family.clone().unwrap_or(defaults.family),
                    weight: font_weight.unwrap_or(defaults.weight),
                    size: font_size
                        .or(config.map(|c| c.base_font_size))
                        .unwrap_or(defaults.size),
                };
                let kind = ElementKind::Text {
                    content: content.clone(),
                    font,
                    max_width: *max_width,
                };
                (kind, None, config)
            }
            TemplateContent::Image { src, width, height } => (
                ElementKind::Image { src: src.clone() },
                Some(Size::new(*width, *height)),
                None,
            ),
            TemplateContent::Icon { name, width, height } => (
                ElementKind::Icon { name: name.clone() },
                Some(Size::new(*width, *height)),
                None,
            ),
        };

        let mut element = Element::new(id, kind);
        if let Some(size) = size {
            element.size = size;
        }
        element.position = Point::new(self.x, self.y);
        element.z_index = self.z_index;
        element.locked = self.locked;
        (element, font_config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLayout {
    #[serde(default = "default_width")]
    pub canvas_width: f32,
    #[serde(default = "default_height")]
    pub canvas_height: f32,
    pub elements: Vec<TemplateElement>,
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    600.0
}

impl TemplateLayout {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn role_config_seeds_font_size() {
        let el = TemplateElement {
            id: "brideName".into(),
            content: TemplateContent::Text {
                content: "Anna".into(),
                font_family: Some("Great Vibes".into()),
                font_weight: None,
                font_size: None,
                max_width: None,
            },
            x: 0.0,
            y: -120.0,
            z_index: 2,
            locked: false,
            font_scale: None,
        };
        let (element, config) = el.build();
        assert_eq!(element.font_size(), Some(36));
        assert_eq!(element.font().unwrap().family, "Great Vibes");
        assert_eq!(config, FontScaleConfig::for_role("brideName"));
        assert_eq!(element.position, Point::new(0.0, -120.0));
        assert_eq!(element.z_index, 2);
    }

    #[test]
    fn parses_catalog_json() {
        let json = r#"{
            "canvasWidth": 600.0,
            "elements": [
                { "id": "date", "type": "text", "content": "June 1", "y": 40.0 },
                { "id": "photo-1", "type": "image", "src": "p.jpg",
                  "width": 180.0, "height": 240.0, "x": -150.0, "locked": true }
            ]
        }"#;
        let layout = TemplateLayout::from_json(json).unwrap();
        assert_eq!(layout.canvas_width, 600.0);
        assert_eq!(layout.canvas_height, 600.0);
        assert_eq!(layout.elements.len(), 2);

        let (photo, config) = layout.elements[1].build();
        assert!(photo.locked);
        assert_eq!(photo.size, Size::new(180.0, 240.0));
        assert!(config.is_none());

        let (date, config) = layout.elements[0].build();
        assert_eq!(date.font_size(), Some(18));
        assert!(config.is_some());
    }

    #[test]
    fn explicit_font_size_wins_over_role() {
        let el = TemplateElement {
            id: "venue".into(),
            content: TemplateContent::Text {
                content: "The Barn".into(),
                font_family: None,
                font_weight: Some(600),
                font_size: Some(20),
                max_width: Some(240.0),
            },
            x: 0.0,
            y: 0.0,
            z_index: 0,
            locked: false,
            font_scale: None,
        };
        let (element, _) = el.build();
        assert_eq!(element.font_size(), Some(20));
        assert_eq!(element.font().unwrap().weight, 600);
    }
}
