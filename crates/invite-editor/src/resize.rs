//! Resize controller: `idle → resizing → idle`.
//!
//! Box elements (photos, logos) resize live: each tick produces a new size
//! that the composition layer commits right away. Font elements (text) only
//! preview: the live font size is shown during the gesture and committed on
//! pointer-up, after which the scale factor resets to 1.

use crate::input::{PointerSample, PointerSource};
use crate::listeners::{ListenerGuard, ListenerHost, ListenerKind};
use invite_core::resize::{BoxConstraints, font_scale, resize_box};
use invite_core::{Element, ElementId, FontScaleConfig, ResizeHandle, ResizeMode, Size};
use std::rc::Rc;

/// Result of one resize tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeUpdate {
    Size(Size),
    /// Uncommitted font size and the scale factor that produced it.
    Font { font_size: u32, scale: f32 },
}

/// Value to write back to the element when a gesture ends or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeCommit {
    Size { id: ElementId, size: Size },
    Font { id: ElementId, font_size: u32 },
}

#[derive(Debug, Clone, Copy)]
enum ResizeTarget {
    Box { constraints: BoxConstraints },
    Font { config: FontScaleConfig, start_font: u32 },
}

#[derive(Debug)]
struct ResizeGesture {
    id: ElementId,
    handle: ResizeHandle,
    pointer_start: (f32, f32),
    start_size: Size,
    target: ResizeTarget,
    live: Option<ResizeUpdate>,
    _listeners: ListenerGuard,
}

#[derive(Debug, Default)]
pub struct ResizeController {
    gesture: Option<ResizeGesture>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_id(&self) -> Option<ElementId> {
        self.gesture.as_ref().map(|g| g.id)
    }

    pub fn active_handle(&self) -> Option<ResizeHandle> {
        self.gesture.as_ref().map(|g| g.handle)
    }

    /// Live font size while a text resize is in progress.
    pub fn live_font(&self) -> Option<(ElementId, u32)> {
        let gesture = self.gesture.as_ref()?;
        match gesture.live {
            Some(ResizeUpdate::Font { font_size, .. }) => Some((gesture.id, font_size)),
            _ => None,
        }
    }

    /// Start resizing `element` from `handle`.
    ///
    /// Ignored (returns `false`) while another resize is active, for locked
    /// or non-resizable elements, for handles the element does not expose,
    /// and for text elements without a font scaling config.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        &mut self,
        element: &Element,
        handle: ResizeHandle,
        pointer: (f32, f32),
        font_config: Option<FontScaleConfig>,
        grid: Option<f32>,
        source: PointerSource,
        host: &Rc<dyn ListenerHost>,
    ) -> bool {
        if self.gesture.is_some() || element.locked || !element.caps.handles().contains(&handle) {
            log::debug!("resize start on {} ignored", element.id);
            return false;
        }

        let target = match element.caps.resize {
            ResizeMode::None => return false,
            ResizeMode::Box => {
                let aspect = (element.caps.aspect_locked && element.size.height > 0.0)
                    .then(|| element.size.width / element.size.height);
                ResizeTarget::Box {
                    constraints: BoxConstraints {
                        min: element.caps.min_size,
                        max: element.caps.max_size,
                        aspect_ratio: aspect,
                        grid,
                    },
                }
            }
            ResizeMode::Font => {
                let (Some(config), Some(start_font)) = (font_config, element.font_size()) else {
                    log::warn!("resize start on {} without font config", element.id);
                    return false;
                };
                ResizeTarget::Font {
                    config: config.rebased(start_font, element.size.width),
                    start_font,
                }
            }
        };

        let listeners = ListenerGuard::acquire(host.clone(), ListenerKind::for_gesture(source.is_touch()));
        self.gesture = Some(ResizeGesture {
            id: element.id,
            handle,
            pointer_start: pointer,
            start_size: element.size,
            target,
            live: None,
            _listeners: listeners,
        });
        log::debug!("resize start {} via {:?}", element.id, handle);
        true
    }

    pub fn update(&mut self, sample: PointerSample) -> Option<(ElementId, ResizeUpdate)> {
        let gesture = self.gesture.as_mut()?;
        let dx = sample.x - gesture.pointer_start.0;
        let dy = sample.y - gesture.pointer_start.1;

        let update = match &gesture.target {
            ResizeTarget::Box { constraints } => {
                ResizeUpdate::Size(resize_box(gesture.handle, gesture.start_size, dx, dy, constraints))
            }
            ResizeTarget::Font { config, .. } => {
                let scale = font_scale(gesture.handle, dx, dy, config);
                ResizeUpdate::Font {
                    font_size: config.font_size_for_scale(scale),
                    scale,
                }
            }
        };
        gesture.live = Some(update);
        log::trace!("resize {} -> {:?}", gesture.id, update);
        Some((gesture.id, update))
    }

    /// Finish the gesture and return the final value to commit.
    pub fn end(&mut self) -> Option<ResizeCommit> {
        let gesture = self.gesture.take()?;
        log::debug!("resize end {}", gesture.id);
        Some(match (gesture.target, gesture.live) {
            (_, Some(ResizeUpdate::Size(size))) => ResizeCommit::Size { id: gesture.id, size },
            (_, Some(ResizeUpdate::Font { font_size, .. })) => ResizeCommit::Font {
                id: gesture.id,
                font_size,
            },
            (ResizeTarget::Box { .. }, None) => ResizeCommit::Size {
                id: gesture.id,
                size: gesture.start_size,
            },
            (ResizeTarget::Font { start_font, .. }, None) => ResizeCommit::Font {
                id: gesture.id,
                font_size: start_font,
            },
        })
    }

    /// Abort the gesture, returning the values to restore.
    pub fn cancel(&mut self) -> Option<ResizeCommit> {
        let gesture = self.gesture.take()?;
        log::debug!("resize cancel {}", gesture.id);
        Some(match gesture.target {
            ResizeTarget::Box { .. } => ResizeCommit::Size {
                id: gesture.id,
                size: gesture.start_size,
            },
            ResizeTarget::Font { start_font, .. } => ResizeCommit::Font {
                id: gesture.id,
                font_size: start_font,
            },
        })
    }
}
