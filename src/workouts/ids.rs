//! Identifier generation for workout entities.
//!
//! Editors receive a generator instead of touching process-wide counters, so
//! two editing sessions (or two tests) never share id state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Source of unique entity identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh id, tagged with a short entity prefix (`set`, `block`, ...).
    fn next_id(&self, prefix: &str) -> String;
}

/// Shared handle to an id generator.
pub type SharedIds = Arc<dyn IdGenerator>;

/// Random v4 UUID ids, the default for interactive editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}

/// Monotonic counter ids owned by one context (`set-1`, `set-2`, ...).
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start` (the first id carries `start + 1`).
    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", prefix, n)
    }
}

/// Default generator for editors that were not handed one.
pub fn default_ids() -> SharedIds {
    Arc::new(UuidIds)
}
