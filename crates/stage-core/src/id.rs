use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for character IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned character identifier (`aria`, `sera`, ...).
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterId(Spur);

impl CharacterId {
    /// Intern a string as a CharacterId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        CharacterId(INTERNER.get_or_intern(s))
    }

    /// Look up an already-interned ID without interning `s`.
    ///
    /// Lookups of unknown names go through here so probing for a missing
    /// character never grows the interner.
    pub fn get(s: &str) -> Option<Self> {
        INTERNER.get(s).map(CharacterId)
    }

    /// Resolve back to a string slice. The interner lives for the whole
    /// process, so the slice does too.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }
}

// Ordered by name, not by interning order, so table iteration is stable.
impl Ord for CharacterId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for CharacterId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterId({})", self.as_str())
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CharacterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CharacterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CharacterId::intern(&s))
    }
}
