//! Canvas-wide interaction settings owned by the composition layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub snap_enabled: bool,
    /// Pixels within which an axis snaps to an alignment target.
    pub snap_tolerance: f32,
    pub grid_enabled: bool,
    pub grid_size: f32,
    /// Element centers stay this far inside every canvas edge.
    pub edge_padding: f32,
    pub nudge_step: f32,
    /// Nudge step while Shift is held.
    pub nudge_step_large: f32,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            snap_tolerance: 8.0,
            grid_enabled: false,
            grid_size: 10.0,
            edge_padding: 20.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            duplicate_offset: 20.0,
        }
    }
}

impl CanvasConfig {
    /// Tolerance handed to the snap calculator; zero disables snapping.
    pub fn effective_tolerance(&self) -> f32 {
        if self.snap_enabled {
            self.snap_tolerance.max(0.0)
        } else {
            0.0
        }
    }

    pub fn grid(&self) -> Option<f32> {
        (self.grid_enabled && self.grid_size > 0.0).then_some(self.grid_size)
    }
}
