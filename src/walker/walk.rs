//! Recursive walk: one task per directory
//!
//! Each task holds a gate slot only while its directory is being opened,
//! stat'ed and listed. The slot is released before any child task is
//! spawned, so the gate bounds open handles across the whole tree rather
//! than per level.

use std::fs::{self, File};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use super::aggregate::{ErrorSlot, GrandTotal};
use super::gate::AdmissionGate;
use super::reporter::UsageReporter;
use crate::error::WalkError;
use crate::model::{BlockSize, SubtreeUsage};

/// State shared by every task of one run
pub(crate) struct WalkContext {
    pub gate: AdmissionGate,
    pub block_size: BlockSize,
    pub summarize: bool,
    pub reporter: Arc<dyn UsageReporter>,
    pub total: GrandTotal,
    pub errors: ErrorSlot,
}

impl WalkContext {
    /// Report and record a failure; the failing path contributes nothing
    pub fn fail(&self, error: WalkError) -> SubtreeUsage {
        let error = Arc::new(error);
        debug!(error = %error, "walk error");
        self.reporter.report_error(&error);
        self.errors.record(Arc::clone(&error));
        SubtreeUsage::failed(error)
    }
}

type WalkFuture = Pin<Box<dyn Future<Output = SubtreeUsage> + Send>>;

/// What a single blocking pass over a path found
#[derive(Debug)]
enum Scan {
    /// Anything that is not a directory: only its own blocks
    Leaf { blocks: u64 },
    Dir {
        /// Own blocks plus every non-directory child
        blocks: u64,
        subdirs: Vec<PathBuf>,
        /// Children whose metadata could not be read
        entry_errors: Vec<WalkError>,
    },
}

/// Walk `path` and everything beneath it.
///
/// Every directory (and a top-level non-directory) is handed to the
/// reporter once its total is known, except in summarize mode where only
/// top-level paths are. Top-level totals are also added to the run's grand
/// total.
pub(crate) fn walk(ctx: Arc<WalkContext>, path: PathBuf, top_level: bool) -> WalkFuture {
    Box::pin(async move {
        let mut permit = match ctx.gate.acquire().await {
            Ok(permit) => permit,
            Err(e) => return ctx.fail(e),
        };

        let block_size = ctx.block_size;
        let scan_path = path.clone();
        let scanned = tokio::task::spawn_blocking(move || scan(&scan_path, block_size)).await;
        permit.release();

        let usage = match scanned {
            Ok(Ok(Scan::Leaf { blocks })) => SubtreeUsage::new(blocks),
            Ok(Ok(Scan::Dir {
                blocks,
                subdirs,
                entry_errors,
            })) => {
                let mut usage = SubtreeUsage::new(blocks);
                for error in entry_errors {
                    usage.absorb(ctx.fail(error));
                }

                let mut children = JoinSet::new();
                for dir in subdirs {
                    children.spawn(walk(Arc::clone(&ctx), dir, false));
                }
                while let Some(joined) = children.join_next().await {
                    match joined {
                        Ok(child) => usage.absorb(child),
                        Err(e) => {
                            warn!(parent = %path.display(), error = %e, "child walk task failed");
                            usage.absorb(ctx.fail(WalkError::Task(e)));
                        }
                    }
                }
                usage
            }
            Ok(Err(e)) => return ctx.fail(e),
            Err(e) => return ctx.fail(WalkError::Task(e)),
        };

        if top_level {
            ctx.total.add(usage.blocks);
        }
        if top_level || !ctx.summarize {
            ctx.reporter.report(&path, usage.blocks);
        }
        trace!(path = %path.display(), blocks = usage.blocks, "walked");
        usage
    })
}

/// Open, stat and (for directories) list `path`. Blocking.
///
/// At most one handle is open at a time: the file handle used for the stat
/// is closed before the directory is opened for listing, and the listing
/// handle is closed before returning.
fn scan(path: &Path, block_size: BlockSize) -> Result<Scan, WalkError> {
    let metadata = {
        let handle = File::open(path).map_err(|source| WalkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        handle.metadata().map_err(|source| WalkError::Stat {
            path: path.to_path_buf(),
            source,
        })?
    };

    let own = block_size.scale(allocated_blocks(&metadata));
    if !metadata.is_dir() {
        return Ok(Scan::Leaf { blocks: own });
    }

    let read_dir_error = |source: io::Error| WalkError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut blocks = own;
    let mut subdirs = Vec::new();
    let mut entry_errors = Vec::new();

    for entry in fs::read_dir(path).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let child = path.join(entry.file_name());

        // DirEntry::metadata does not follow symlinks, so a link to a
        // directory is counted as a leaf
        match entry.metadata() {
            Ok(meta) if meta.is_dir() => subdirs.push(child),
            Ok(meta) => blocks += block_size.scale(allocated_blocks(&meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %child.display(), "entry vanished during listing");
            }
            Err(source) => entry_errors.push(WalkError::Stat {
                path: child,
                source,
            }),
        }
    }

    Ok(Scan::Dir {
        blocks,
        subdirs,
        entry_errors,
    })
}

/// Allocated 512-byte blocks, not the logical length
#[cfg(unix)]
fn allocated_blocks(metadata: &fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.blocks()
}

#[cfg(not(unix))]
fn allocated_blocks(_metadata: &fs::Metadata) -> u64 {
    0
}
