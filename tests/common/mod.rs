// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use pdu::model::{BlockSize, DuOptions, DuSummary};
use pdu::walker::{AdmissionGate, CollectingReporter};
use pdu::DiskUsage;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

/// Create an empty temporary directory
pub fn create_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write `size` bytes of data to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, size: usize) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0xA5u8; size]).unwrap();
}

/// Create `root/rel` and any missing parents
pub fn make_dir(root: &Path, rel: &str) {
    fs::create_dir_all(root.join(rel)).unwrap();
}

/// A small tree with files at several depths
pub fn create_sample_tree() -> TempDir {
    let dir = create_test_dir();
    let root = dir.path();
    write_file(root, "README.md", 100);
    write_file(root, "src/main.rs", 5_000);
    write_file(root, "src/lib.rs", 20_000);
    write_file(root, "src/walker/deep/nested/file.bin", 70_000);
    write_file(root, "assets/logo.png", 300_000);
    make_dir(root, "empty");
    make_dir(root, "src/walker/empty_leaf");
    dir
}

/// Chain of `depth` nested directories, each holding one small file
pub fn create_deep_tree(depth: usize) -> TempDir {
    let dir = create_test_dir();
    let mut rel = String::new();
    for level in 0..depth {
        if !rel.is_empty() {
            rel.push('/');
        }
        rel.push_str(&format!("d{}", level));
        write_file(dir.path(), &format!("{}/f", rel), 10);
    }
    dir
}

/// `width` sibling directories, each holding a few files
pub fn create_wide_tree(width: usize) -> TempDir {
    let dir = create_test_dir();
    for i in 0..width {
        for j in 0..3 {
            write_file(dir.path(), &format!("dir_{}/file_{}", i, j), 100 * (j + 1));
        }
    }
    dir
}

#[cfg(unix)]
pub fn raw_blocks(meta: &fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks()
}

#[cfg(not(unix))]
pub fn raw_blocks(_meta: &fs::Metadata) -> u64 {
    0
}

/// Independent sequential computation of the expected total for `path`.
///
/// Follows a symlink given as `path` itself, but not links found inside
/// directories, and scales every entry separately.
pub fn reference_blocks(path: &Path, block_size: BlockSize) -> u64 {
    let meta = fs::metadata(path).unwrap();
    subtree_blocks(path, &meta, block_size)
}

fn subtree_blocks(path: &Path, meta: &fs::Metadata, block_size: BlockSize) -> u64 {
    let mut total = block_size.scale(raw_blocks(meta));
    if meta.is_dir() {
        for entry in fs::read_dir(path).unwrap() {
            let entry = entry.unwrap();
            let child_meta = fs::symlink_metadata(entry.path()).unwrap();
            if child_meta.is_dir() {
                total += subtree_blocks(&entry.path(), &child_meta, block_size);
            } else {
                total += block_size.scale(raw_blocks(&child_meta));
            }
        }
    }
    total
}

/// Total reported by the system `du -k -s`, when one is installed
pub fn system_du_kib(path: &Path) -> Option<u64> {
    let out = Command::new("du").arg("-k").arg("-s").arg(path).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let stdout = String::from_utf8(out.stdout).ok()?;
    stdout.split('\t').next()?.trim().parse().ok()
}

/// Run with the given options, collecting every reported line
pub async fn run_collect<P: AsRef<Path>>(
    paths: &[P],
    options: DuOptions,
) -> (DuSummary, Arc<CollectingReporter>) {
    let reporter = Arc::new(CollectingReporter::new());
    let du = DiskUsage::new(options)
        .unwrap()
        .with_reporter(reporter.clone());
    let summary = du.run(paths).await;
    (summary, reporter)
}

/// Same as [`run_collect`] but through a caller-owned gate
pub async fn run_with_gate<P: AsRef<Path>>(
    paths: &[P],
    options: DuOptions,
    gate: AdmissionGate,
) -> (DuSummary, Arc<CollectingReporter>) {
    let reporter = Arc::new(CollectingReporter::new());
    let du = DiskUsage::new(options)
        .unwrap()
        .with_reporter(reporter.clone());
    let summary = du.run_with_gate(paths, gate).await;
    (summary, reporter)
}

pub fn options_with_block_size(bytes: u64) -> DuOptions {
    DuOptions {
        block_size: BlockSize::new(bytes).unwrap(),
        ..DuOptions::default()
    }
}
