//! Scoped global listener subscriptions.
//!
//! While a drag or resize is in progress the host needs document-level
//! move/up listeners so the gesture keeps tracking when the pointer leaves
//! the element. A [`ListenerGuard`] attaches them when a gesture starts and
//! detaches them when dropped, so every exit path (pointer-up, Escape,
//! the element being deleted mid-gesture, the canvas being torn down)
//! releases them.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
    KeyDown,
}

impl ListenerKind {
    /// DOM event name.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::PointerUp => "mouseup",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::KeyDown => "keydown",
        }
    }

    /// Listeners a gesture needs for the given input device.
    pub fn for_gesture(touch: bool) -> &'static [ListenerKind] {
        if touch {
            &[Self::TouchMove, Self::TouchEnd, Self::KeyDown]
        } else {
            &[Self::PointerMove, Self::PointerUp, Self::KeyDown]
        }
    }
}

/// Something that can attach and detach global listeners.
pub trait ListenerHost {
    fn attach(&self, kind: ListenerKind);
    fn detach(&self, kind: ListenerKind);
}

/// Listeners held for the lifetime of one gesture.
pub struct ListenerGuard {
    host: Rc<dyn ListenerHost>,
    kinds: SmallVec<[ListenerKind; 4]>,
}

impl ListenerGuard {
    pub fn acquire(host: Rc<dyn ListenerHost>, kinds: &[ListenerKind]) -> Self {
        for &kind in kinds {
            host.attach(kind);
        }
        Self {
            host,
            kinds: SmallVec::from_slice(kinds),
        }
    }

    pub fn kinds(&self) -> &[ListenerKind] {
        &self.kinds
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for &kind in self.kinds.iter().rev() {
            self.host.detach(kind);
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("kinds", &self.kinds).finish()
    }
}

/// Reference-counted record of attached listeners. The browser bridge reads
/// it to mirror the set onto `document`.
#[derive(Debug, Default)]
pub struct ListenerSet {
    counts: RefCell<BTreeMap<ListenerKind, usize>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.counts.borrow().contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.borrow().is_empty()
    }

    pub fn active(&self) -> Vec<ListenerKind> {
        self.counts.borrow().keys().copied().collect()
    }
}

impl ListenerHost for ListenerSet {
    fn attach(&self, kind: ListenerKind) {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
        log::trace!("attach {} listener", kind.event_name());
    }

    fn detach(&self, kind: ListenerKind) {
        let mut counts = self.counts.borrow_mut();
        if let Some(n) = counts.get_mut(&kind) {
            *n -= 1;
            if *n == 0 {
                counts.remove(&kind);
            }
        }
        log::trace!("detach {} listener", kind.event_name());
    }
}
