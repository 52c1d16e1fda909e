// Library crate exposing modules for integration tests and benchmarks

pub mod cli;
pub mod error;
pub mod model;
pub mod util;
pub mod walker;

pub use error::{ConfigError, WalkError};
pub use model::{BlockSize, DuOptions, DuSummary};
pub use walker::DiskUsage;
