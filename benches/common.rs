// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use std::fs;
use tempfile::TempDir;

/// Generate a tree of `dirs` directories spread over a few levels,
/// each holding `files_per_dir` small files
pub fn generate_tree(dirs: usize, files_per_dir: usize) -> TempDir {
    let root = TempDir::new().unwrap();
    let names = ["src", "lib", "test", "pkg", "mod"];

    for i in 0..dirs {
        let depth = (i % 5) + 1;
        let rel: Vec<String> = (0..depth)
            .map(|d| format!("{}_{}", names[d], i / 50))
            .collect();
        let dir = root.path().join(rel.join("/")).join(format!("leaf_{}", i));
        fs::create_dir_all(&dir).unwrap();

        for j in 0..files_per_dir {
            let content = vec![b'x'; (i * 31 + j * 17) % 9000];
            fs::write(dir.join(format!("file_{}.rs", j)), content).unwrap();
        }
    }
    root
}
