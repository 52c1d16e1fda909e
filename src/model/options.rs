use crate::error::ConfigError;

/// Size of the raw block unit reported by `stat` (`st_blocks`)
pub const RAW_BLOCK_SIZE: u64 = 512;

/// Default number of directory handles allowed open at once
pub const DEFAULT_MAX_OPEN: usize = 512;

/// Default reporting unit in bytes
pub const DEFAULT_BLOCK_SIZE: u64 = 1024;

/// Reporting unit in bytes; every printed size is a count of these
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlockSize(u64);

impl BlockSize {
    pub fn new(bytes: u64) -> Result<Self, ConfigError> {
        if bytes == 0 {
            return Err(ConfigError::InvalidBlockSize(bytes));
        }
        Ok(Self(bytes))
    }

    #[inline]
    pub fn bytes(self) -> u64 {
        self.0
    }

    /// Converts a raw 512-byte block count into units of this block size.
    ///
    /// Integer arithmetic throughout, so the result truncates: with a 1024
    /// byte unit, 3 raw blocks become 1.
    #[inline]
    pub fn scale(self, raw_blocks: u64) -> u64 {
        if self.0 >= RAW_BLOCK_SIZE {
            raw_blocks / (self.0 / RAW_BLOCK_SIZE)
        } else {
            raw_blocks.saturating_mul(RAW_BLOCK_SIZE / self.0)
        }
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(DEFAULT_BLOCK_SIZE)
    }
}

/// How sizes are rendered on output
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SizeFormat {
    pub block_size: BlockSize,
    pub human_readable: bool,
}

/// Validated options for one disk usage run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuOptions {
    pub block_size: BlockSize,
    /// Print only one line per top-level argument
    pub summarize: bool,
    pub human_readable: bool,
    /// Print a final `total` line
    pub grand_total: bool,
    /// Admission gate capacity
    pub max_open: usize,
}

impl Default for DuOptions {
    fn default() -> Self {
        Self {
            block_size: BlockSize::default(),
            summarize: false,
            human_readable: false,
            grand_total: false,
            max_open: DEFAULT_MAX_OPEN,
        }
    }
}

impl DuOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size.bytes() == 0 {
            return Err(ConfigError::InvalidBlockSize(0));
        }
        if self.max_open == 0 {
            return Err(ConfigError::InvalidCapacity(self.max_open));
        }
        Ok(())
    }

    pub fn size_format(&self) -> SizeFormat {
        SizeFormat {
            block_size: self.block_size,
            human_readable: self.human_readable,
        }
    }
}
