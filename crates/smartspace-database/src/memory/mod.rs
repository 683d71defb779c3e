//! Process-local store implementations.
//!
//! Used by the `memory` store provider and as test doubles. Elements and
//! actions draw identifiers from one shared [`IdSequence`], mirroring the
//! single `generic_id_seq` of the PostgreSQL schema.

pub mod action;
pub mod element;
pub mod user;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use action::MemoryActionStore;
pub use element::MemoryElementStore;
pub use user::MemoryUserStore;

/// Monotonic identifier source shared by the in-memory stores.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    /// Create a sequence whose first value is 1.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Next identifier, rendered as a decimal string.
    pub fn next_id(&self) -> String {
        (self.last.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one_and_increments() {
        let seq = IdSequence::new();
        assert_eq!(seq.next_id(), "1");
        assert_eq!(seq.next_id(), "2");
    }
}
