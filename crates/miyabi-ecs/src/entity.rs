use std::fmt;

use serde::{Deserialize, Serialize};

/// An entity is an identifier that is associated with a set of components in a world.
///
/// Identifiers are handed out by a world from a monotonically increasing counter and are never
/// reused during that world's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    #[inline]
    pub const fn from_raw(id: u64) -> Entity {
        Entity(id)
    }

    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Source of fresh entity handles for a single world.
#[derive(Debug, Default, Clone)]
pub(crate) struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    /// Creates an allocator whose first handle is `next`.
    #[inline]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Returns the current counter value and advances it.
    ///
    /// # Panics
    /// Panics if the counter is exhausted. At realistic entity counts this never happens, so it is
    /// treated as a fatal environment failure rather than a recoverable error.
    #[inline]
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity(self.next);
        self.next = self
            .next
            .checked_add(1)
            .expect("entity identifier space exhausted");
        entity
    }

    /// The value the next call to `allocate` will return.
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next
    }
}
