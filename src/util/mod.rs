mod format;

pub use format::{format_blocks, format_size};
