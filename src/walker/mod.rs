//! Concurrent disk usage walker
//!
//! # Architecture
//!
//! The walker is organized into layers:
//!
//! - **gate**: Admission gate bounding open directory handles
//! - **walk**: Recursive per-directory task fan-out
//! - **aggregate**: Grand total and first-error slot shared across tasks
//! - **reporter**: Output abstraction (stdout, in-memory, no-op)
//! - **DiskUsage**: Run orchestrator, one walk per top-level path

mod aggregate;
mod gate;
mod reporter;
mod walk;

pub use aggregate::{ErrorSlot, GrandTotal};
pub use gate::{AdmissionGate, GatePermit};
pub use reporter::{CollectingReporter, NoopReporter, StdoutReporter, UsageReporter};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ConfigError, WalkError};
use crate::model::{DuOptions, DuSummary, RootUsage};
use walk::{walk, WalkContext};

/// Label of the grand-total line
pub const TOTAL_LABEL: &str = "total";

/// Disk usage calculator for one or more paths
pub struct DiskUsage {
    options: DuOptions,
    reporter: Arc<dyn UsageReporter>,
}

impl DiskUsage {
    /// Create a calculator that prints `du`-style lines to stdout
    pub fn new(options: DuOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let reporter = Arc::new(StdoutReporter::new(options.size_format()));
        Ok(Self { options, reporter })
    }

    /// Create a calculator that prints nothing (used by benchmarks)
    pub fn quiet(options: DuOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            reporter: Arc::new(NoopReporter),
        })
    }

    /// Replace where totals and errors are reported
    pub fn with_reporter(mut self, reporter: Arc<dyn UsageReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Walk every path concurrently and return the combined result.
    ///
    /// An empty list walks the current directory. Failures never abort the
    /// run; they are reported, counted, and leave the failing subtree out of
    /// its parent's total.
    pub async fn run<P: AsRef<Path>>(&self, paths: &[P]) -> DuSummary {
        let gate = AdmissionGate::new(self.options.max_open);
        self.run_with_gate(paths, gate).await
    }

    /// Like [`DiskUsage::run`], but with a caller-supplied admission gate
    pub async fn run_with_gate<P: AsRef<Path>>(
        &self,
        paths: &[P],
        gate: AdmissionGate,
    ) -> DuSummary {
        let start = Instant::now();
        let mut paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        if paths.is_empty() {
            paths.push(PathBuf::from("."));
        }

        info!(
            paths = paths.len(),
            max_open = gate.capacity(),
            block_size = self.options.block_size.bytes(),
            "starting disk usage walk"
        );

        let ctx = Arc::new(WalkContext {
            gate,
            block_size: self.options.block_size,
            summarize: self.options.summarize,
            reporter: Arc::clone(&self.reporter),
            total: GrandTotal::new(),
            errors: ErrorSlot::new(),
        });

        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let task = tokio::spawn(walk(Arc::clone(&ctx), path.clone(), true));
                (path, task)
            })
            .collect();

        let mut roots = Vec::with_capacity(handles.len());
        for (path, task) in handles {
            let usage = match task.await {
                Ok(usage) => usage,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "walk task failed");
                    ctx.fail(WalkError::Task(e))
                }
            };
            roots.push(RootUsage {
                path,
                blocks: usage.blocks,
                first_error: usage.first_error,
            });
        }

        let total = ctx.total.get();
        if self.options.grand_total {
            self.reporter.report(Path::new(TOTAL_LABEL), total);
        }

        let summary = DuSummary {
            total,
            roots,
            first_error: ctx.errors.first(),
            error_count: ctx.errors.count(),
        };

        debug!(peak_open = ctx.gate.peak(), "admission gate usage");
        info!(
            total,
            errors = summary.error_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "disk usage walk completed"
        );

        summary
    }
}
