mod options;
mod usage;

pub use options::{
    BlockSize, DuOptions, SizeFormat, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_OPEN, RAW_BLOCK_SIZE,
};
pub use usage::{DuSummary, RootUsage, SubtreeUsage};
