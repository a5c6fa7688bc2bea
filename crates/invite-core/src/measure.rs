//! Text measurement.
//!
//! Computes the pixel box a text element occupies for a given font, either
//! as unwrapped runs or greedily word-wrapped to a maximum width. The actual
//! glyph widths come from a [`MeasureBackend`] (a Canvas2D context in the
//! browser, [`ApproxMetrics`] everywhere else). All returned dimensions are
//! whole pixels, rounded up.

use crate::model::{FontSpec, Size};

/// Horizontal padding added around the text run (both sides combined).
pub const H_PADDING: f32 = 16.0;
/// Vertical padding added around the text block (both sides combined).
pub const V_PADDING: f32 = 8.0;
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Box returned for empty text or when no backend is available.
pub const FALLBACK_SIZE: Size = Size::new(100.0, 30.0);

/// Source of rendered text widths.
pub trait MeasureBackend {
    /// Width in pixels of `text` rendered on one line, or `None` when the
    /// backend cannot measure right now.
    fn run_width(&self, text: &str, font: &FontSpec) -> Option<f32>;
}

/// Glyph-class width estimate used off-browser and in tests.
///
/// Widths are fractions of the font size, so results scale linearly with
/// the size and are fully deterministic.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMetrics {
    pub narrow: f32,
    pub regular: f32,
    pub wide: f32,
    pub upper: f32,
    /// Multiplier applied for weights >= 600.
    pub bold_factor: f32,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self {
            narrow: 0.3,
            regular: 0.5,
            wide: 0.8,
            upper: 0.65,
            bold_factor: 1.05,
        }
    }
}

impl ApproxMetrics {
    fn char_ratio(&self, c: char) -> f32 {
        match c {
            'i' | 'l' | 'j' | 't' | 'f' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' | ' ' => {
                self.narrow
            }
            'm' | 'w' | 'M' | 'W' | '@' | '&' => self.wide,
            c if c.is_uppercase() => self.upper,
            _ => self.regular,
        }
    }
}

impl MeasureBackend for ApproxMetrics {
    fn run_width(&self, text: &str, font: &FontSpec) -> Option<f32> {
        let em: f32 = text.chars().map(|c| self.char_ratio(c)).sum();
        let weight = if font.weight >= 600 {
            self.bold_factor
        } else {
            1.0
        };
        Some(em * font.size as f32 * weight)
    }
}

/// One laid-out line and its rendered width (without padding).
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub text: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LineBox>,
    pub size: Size,
}

/// Measure `text` and return its padded box.
///
/// Empty or whitespace-only text, and an unavailable backend, both yield
/// [`FALLBACK_SIZE`] so the element stays visible and draggable.
pub fn measure(
    backend: &dyn MeasureBackend,
    text: &str,
    font: &FontSpec,
    max_width: Option<f32>,
) -> Size {
    layout_text(backend, text, font, max_width)
        .map(|layout| layout.size)
        .unwrap_or(FALLBACK_SIZE)
}

/// Break `text` into lines and compute the padded box.
///
/// Explicit newlines are hard breaks. With `max_width`, words are packed
/// greedily while the line fits in `max_width - H_PADDING`; a word that is
/// wider than that on its own gets a line to itself and is never split.
/// Returns `None` for degenerate input or when the backend fails.
pub fn layout_text(
    backend: &dyn MeasureBackend,
    text: &str,
    font: &FontSpec,
    max_width: Option<f32>,
) -> Option<TextLayout> {
    if text.trim().is_empty() {
        return None;
    }

    let lines = match max_width {
        None => text
            .split('\n')
            .map(|line| {
                let width = backend.run_width(line, font)?;
                Some(LineBox {
                    text: line.to_string(),
                    width,
                })
            })
            .collect::<Option<Vec<_>>>(),
        Some(max) => wrap_lines(backend, text, font, max),
    };
    let Some(lines) = lines else {
        log::warn!("text measurement backend unavailable; using fallback box");
        return None;
    };

    let widest = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
    let mut width = (widest + H_PADDING).ceil();
    if let Some(max) = max_width
        && max.is_finite()
    {
        width = width.min(max.ceil());
    }
    let height = (font.size as f32 * LINE_HEIGHT_FACTOR * lines.len() as f32).ceil() + V_PADDING;

    Some(TextLayout {
        lines,
        size: Size::new(width, height),
    })
}

fn wrap_lines(
    backend: &dyn MeasureBackend,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Option<Vec<LineBox>> {
    let available = if max_width.is_finite() {
        (max_width - H_PADDING).max(0.0)
    } else {
        f32::INFINITY
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                current_width = backend.run_width(&current, font)?;
            } else {
                let candidate = format!("{current} {word}");
                let width = backend.run_width(&candidate, font)?;
                if width <= available {
                    current = candidate;
                    current_width = width;
                    continue;
                }
                lines.push(LineBox {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current.push_str(word);
                current_width = backend.run_width(&current, font)?;
            }

            // Forced break: an oversized word stands alone.
            if current_width > available {
                lines.push(LineBox {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current_width = 0.0;
            }
        }

        if !current.is_empty() || paragraph.trim().is_empty() {
            lines.push(LineBox {
                text: current,
                width: current_width,
            });
        }
    }
    Some(lines)
}
