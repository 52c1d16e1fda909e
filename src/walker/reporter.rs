//! Output abstraction
//!
//! Decouples the walk from where its lines end up (stdout, or memory in tests).

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::WalkError;
use crate::model::SizeFormat;
use crate::util::format_blocks;

/// Sink for finished totals and per-path diagnostics
pub trait UsageReporter: Send + Sync {
    /// A path finished with `blocks` scaled blocks
    fn report(&self, path: &Path, blocks: u64);

    /// A path failed
    fn report_error(&self, error: &WalkError);
}

/// `du`-style output: `<size>\t<path>` on stdout, `du: <error>` on stderr
pub struct StdoutReporter {
    format: SizeFormat,
}

impl StdoutReporter {
    pub fn new(format: SizeFormat) -> Self {
        Self { format }
    }
}

impl UsageReporter for StdoutReporter {
    fn report(&self, path: &Path, blocks: u64) {
        let line = format!("{}\t{}\n", format_blocks(blocks, self.format), path.display());
        // one write under the lock keeps concurrent lines whole
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(line.as_bytes()) {
            debug!(error = %e, "failed to write usage line");
        }
    }

    fn report_error(&self, error: &WalkError) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "du: {}", error);
    }
}

/// Reporter that keeps everything in memory
#[derive(Default)]
pub struct CollectingReporter {
    lines: Mutex<Vec<(PathBuf, u64)>>,
    errors: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported `(path, blocks)` pairs, in completion order
    pub fn lines(&self) -> Vec<(PathBuf, u64)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Blocks reported for `path`, if it was reported
    pub fn blocks_for(&self, path: impl AsRef<Path>) -> Option<u64> {
        let path = path.as_ref();
        self.lines()
            .into_iter()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b)
    }

    /// Rendered error messages, in the order they were reported
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl UsageReporter for CollectingReporter {
    fn report(&self, path: &Path, blocks: u64) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((path.to_path_buf(), blocks));
        }
    }

    fn report_error(&self, error: &WalkError) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(error.to_string());
        }
    }
}

/// Reporter that discards everything
pub struct NoopReporter;

impl UsageReporter for NoopReporter {
    fn report(&self, _path: &Path, _blocks: u64) {}
    fn report_error(&self, _error: &WalkError) {}
}
