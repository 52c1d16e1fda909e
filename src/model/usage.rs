use std::path::PathBuf;
use std::sync::Arc;

use crate::error::WalkError;

/// Result of walking one subtree: its scaled block total and the first
/// error met anywhere beneath it
#[derive(Debug, Clone, Default)]
pub struct SubtreeUsage {
    pub blocks: u64,
    pub first_error: Option<Arc<WalkError>>,
}

impl SubtreeUsage {
    pub fn new(blocks: u64) -> Self {
        Self {
            blocks,
            first_error: None,
        }
    }

    /// A subtree that failed before contributing anything
    pub fn failed(error: Arc<WalkError>) -> Self {
        Self {
            blocks: 0,
            first_error: Some(error),
        }
    }

    /// Folds a finished child into this total, keeping the earliest error
    pub fn absorb(&mut self, child: SubtreeUsage) {
        self.blocks = self.blocks.saturating_add(child.blocks);
        if self.first_error.is_none() {
            self.first_error = child.first_error;
        }
    }
}

/// Total for one top-level argument
#[derive(Debug, Clone)]
pub struct RootUsage {
    pub path: PathBuf,
    pub blocks: u64,
    pub first_error: Option<Arc<WalkError>>,
}

/// Outcome of a whole run across all arguments
#[derive(Debug, Clone, Default)]
pub struct DuSummary {
    /// Sum of every root's total
    pub total: u64,
    /// Per-argument totals, in argument order
    pub roots: Vec<RootUsage>,
    /// Whichever error was recorded first across all traversals
    pub first_error: Option<Arc<WalkError>>,
    pub error_count: u64,
}

impl DuSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn root(&self, path: impl Into<PathBuf>) -> Option<&RootUsage> {
        let path = path.into();
        self.roots.iter().find(|r| r.path == path)
    }
}
