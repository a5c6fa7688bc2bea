//! Persisted layout payload.
//!
//! On save the element list is flattened to `{ id: { x, y, width, height,
//! fontSize? } }`. The persistence layer stores the JSON verbatim; it is not
//! versioned or validated beyond its shape.

use crate::model::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl ElementLayout {
    pub fn of(element: &Element) -> Self {
        Self {
            x: element.position.x,
            y: element.position.y,
            width: element.size.width,
            height: element.size.height,
            font_size: element.font_size(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSnapshot {
    pub elements: BTreeMap<String, ElementLayout>,
}

impl LayoutSnapshot {
    pub fn capture(elements: &[Element]) -> Self {
        Self {
            elements: elements
                .iter()
                .map(|el| (el.id.as_str().to_string(), ElementLayout::of(el)))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ElementLayout> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored payload. The top level must be a JSON object; entries
    /// that do not have the expected shape are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut elements = BTreeMap::new();
        for (id, value) in raw {
            match serde_json::from_value::<ElementLayout>(value) {
                Ok(layout) => {
                    elements.insert(id, layout);
                }
                Err(err) => log::warn!("skipping malformed layout entry {id}: {err}"),
            }
        }
        Ok(Self { elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSpec, Size};
    use pretty_assertions::assert_eq;

    #[test]
    fn capture_keys_by_id() {
        let elements = vec![
            Element::text("brideName", "Anna", FontSpec::default()).at(0.0, -120.0),
            Element::image("photo-1", "p.jpg", Size::new(180.0, 240.0)).at(-150.0, 40.0),
        ];
        let snap = LayoutSnapshot::capture(&elements);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("brideName").unwrap().font_size, Some(16));
        assert_eq!(snap.get("photo-1").unwrap().font_size, None);
        assert_eq!(snap.get("photo-1").unwrap().width, 180.0);
    }

    #[test]
    fn json_shape_is_flat_object() {
        let elements = vec![Element::image("logo", "l.png", Size::new(60.0, 60.0)).at(5.0, 6.0)];
        let json = LayoutSnapshot::capture(&elements).to_json().unwrap();
        assert_eq!(json, r#"{"logo":{"x":5.0,"y":6.0,"width":60.0,"height":60.0}}"#);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let json = r#"{"date":{"x":1,"y":2,"width":3,"height":4,"fontSize":18},"venue":"oops"}"#;
        let snap = LayoutSnapshot::from_json(json).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get("date").unwrap().font_size, Some(18));
    }

    #[test]
    fn non_object_payload_is_an_error() {
        assert!(LayoutSnapshot::from_json("[1,2,3]").is_err());
    }
}
