use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for element ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Stable identifier of an element on a card (e.g. `brideName`, `photo-2`).
/// Backed by a `Spur`, so ids are 4 bytes and compare in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an `ElementId`, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Look up an id without interning it. Returns `None` for strings that
    /// were never seen, which also means no element can carry that id.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ElementId)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh id derived from `base` (e.g. `photo-copy-3`).
    /// Used when duplicating elements.
    pub fn derived(base: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{base}-copy-{n}");
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = ElementId::intern("brideName");
        let b = ElementId::intern("brideName");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "brideName");
    }

    #[test]
    fn derived_ids_are_unique_and_readable() {
        let a = ElementId::derived("photo");
        let b = ElementId::derived("photo");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("photo-copy-"));
    }

    #[test]
    fn lookup_does_not_intern() {
        assert!(ElementId::lookup("never-seen-id-xyz").is_none());
        let id = ElementId::intern("venue");
        assert_eq!(ElementId::lookup("venue"), Some(id));
    }
}
