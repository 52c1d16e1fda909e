//! Error types for pdu
//!
//! Walk errors are recoverable at the subtree level: the failing path
//! contributes zero and sibling traversals keep going. Configuration errors
//! reject options before any traversal starts.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure while walking a single path
#[derive(Error, Debug)]
pub enum WalkError {
    /// The path could not be opened (missing, permission denied, ...)
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Metadata could not be read for an opened path or a listed entry
    #[error("cannot stat '{}': {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory listing could not be read
    #[error("cannot read directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The admission gate was closed while a walk was waiting on it
    #[error("admission gate closed")]
    GateClosed,

    /// A walk task panicked or was cancelled
    #[error("walk task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl WalkError {
    /// Path the error refers to, when there is one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            WalkError::Open { path, .. }
            | WalkError::Stat { path, .. }
            | WalkError::ReadDir { path, .. } => Some(path),
            WalkError::GateClosed | WalkError::Task(_) => None,
        }
    }

    /// True when the underlying cause is a permission problem
    pub fn is_permission_denied(&self) -> bool {
        match self {
            WalkError::Open { source, .. }
            | WalkError::Stat { source, .. }
            | WalkError::ReadDir { source, .. } => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            WalkError::GateClosed | WalkError::Task(_) => false,
        }
    }
}

/// Invalid options handed to the walker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid block size {0}: must be at least 1 byte")]
    InvalidBlockSize(u64),

    #[error("invalid admission gate capacity {0}: must be at least 1")]
    InvalidCapacity(usize),
}
