//! Card editor keyboard shortcuts.
//!
//! `Modifiers::command` folds ⌘ and Ctrl together, so one table serves
//! every platform.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,
    ToggleLock,

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,

    // ── Movement ──
    /// Move the selection by one step in the given direction.
    /// `large` selects the Shift step size.
    Nudge { dx: i8, dy: i8, large: bool },

    /// Cancel the active gesture, or deselect when idle.
    Escape,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Action bound to `key` (a `KeyboardEvent.key` value) under
    /// `modifiers`, if any.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        if let Some((dx, dy)) = arrow(key) {
            return Some(ShortcutAction::Nudge {
                dx,
                dy,
                large: modifiers.shift,
            });
        }

        if cmd && modifiers.shift {
            return match key {
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "l" | "L" => Some(ShortcutAction::ToggleLock),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Escape),
            _ => None,
        }
    }
}

fn arrow(key: &str) -> Option<(i8, i8)> {
    match key {
        "ArrowLeft" => Some((-1, 0)),
        "ArrowRight" => Some((1, 0)),
        "ArrowUp" => Some((0, -1)),
        "ArrowDown" => Some((0, 1)),
        _ => None,
    }
}
