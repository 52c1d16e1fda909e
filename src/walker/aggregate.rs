//! Cross-task shared state of a run
//!
//! Directory totals travel up the tree as return values. Only the grand
//! total across top-level arguments and the error slot are shared.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::WalkError;

/// Running sum of every finished top-level walk
#[derive(Debug, Default)]
pub struct GrandTotal(AtomicU64);

impl GrandTotal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, blocks: u64) {
        self.0.fetch_add(blocks, Ordering::SeqCst);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// First error recorded by any traversal, plus a count of all of them
#[derive(Debug, Default)]
pub struct ErrorSlot {
    first: OnceLock<Arc<WalkError>>,
    count: AtomicU64,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Only the first one recorded is kept; every call is
    /// counted.
    pub fn record(&self, error: Arc<WalkError>) {
        self.count.fetch_add(1, Ordering::SeqCst);
        let _ = self.first.set(error);
    }

    pub fn first(&self) -> Option<Arc<WalkError>> {
        self.first.get().cloned()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}
