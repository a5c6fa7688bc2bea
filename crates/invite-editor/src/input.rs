//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent`
//! consumed by the canvas. Coordinates are CSS pixels relative to the
//! canvas' top-left corner; any device-pixel-ratio correction happens in
//! the host before events get here.

/// Keyboard modifier state at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Device a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Pen,
    /// `touches` is the number of active touch points.
    Touch { touches: u8 },
}

impl PointerSource {
    /// Only single-pointer input starts a gesture; multi-touch is left to
    /// the host (pinch zoom, scrolling).
    pub fn starts_gesture(&self) -> bool {
        match self {
            Self::Mouse | Self::Pen => true,
            Self::Touch { touches } => *touches == 1,
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch { .. })
    }
}

/// A single pointer position with the modifiers held at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self { x, y, modifiers }
    }
}

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse down, touch start, pen contact.
    PointerDown {
        x: f32,
        y: f32,
        source: PointerSource,
        modifiers: Modifiers,
    },

    /// Mouse move, touch move, pen move.
    PointerMove { x: f32, y: f32, modifiers: Modifiers },

    /// Mouse up, touch end, pen lift.
    PointerUp { x: f32, y: f32 },

    /// `key` is the `KeyboardEvent.key` value (e.g. `"Escape"`, `"d"`).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            source: PointerSource::Mouse,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y, .. } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            Self::Key { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_touch_does_not_start_gestures() {
        assert!(PointerSource::Mouse.starts_gesture());
        assert!(PointerSource::Touch { touches: 1 }.starts_gesture());
        assert!(!PointerSource::Touch { touches: 2 }.starts_gesture());
    }

    #[test]
    fn command_is_ctrl_or_meta() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(ctrl.command());
        assert!(meta.command());
        assert!(!Modifiers::SHIFT.command());
    }

    #[test]
    fn key_events_have_no_position() {
        assert_eq!(InputEvent::pointer_up(3.0, 4.0).position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::key("Escape").position(), None);
    }
}
