//! Animation-frame coalescing.
//!
//! Pointer moves can arrive several times per display frame. Each element
//! holds at most one pending payload; a newer move replaces it instead of
//! queueing behind it, and the whole batch is applied when the host's
//! `requestAnimationFrame` callback fires.

use invite_core::ElementId;

#[derive(Debug)]
pub struct FrameQueue<T> {
    /// FIFO by first request; replacing a payload keeps its slot.
    pending: Vec<(ElementId, T)>,
    frame_requested: bool,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            frame_requested: false,
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload` for `id`. Returns `true` when the host must request
    /// a new animation frame (none was outstanding).
    pub fn schedule(&mut self, id: ElementId, payload: T) -> bool {
        match self.pending.iter_mut().find(|(pending_id, _)| *pending_id == id) {
            Some(slot) => slot.1 = payload,
            None => self.pending.push((id, payload)),
        }
        let newly_requested = !self.frame_requested;
        self.frame_requested = true;
        newly_requested
    }

    /// Drain the payloads for the frame that just fired.
    pub fn take_frame(&mut self) -> Vec<(ElementId, T)> {
        self.frame_requested = false;
        std::mem::take(&mut self.pending)
    }

    /// Drop the pending payload for one element.
    pub fn discard(&mut self, id: ElementId) -> Option<T> {
        let idx = self.pending.iter().position(|(pending_id, _)| *pending_id == id)?;
        Some(self.pending.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.frame_requested = false;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }
}
