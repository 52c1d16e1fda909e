use crate::model::SizeFormat;

/// Binary unit suffixes, largest first, paired with their shift
const UNITS: [(u32, char); 6] = [
    (60, 'E'),
    (50, 'P'),
    (40, 'T'),
    (30, 'G'),
    (20, 'M'),
    (10, 'K'),
];

/// Format a block count for output.
///
/// Without `human_readable` this is just the decimal block count. With it,
/// the count is turned into bytes and printed with the largest binary suffix
/// it strictly exceeds: one truncated decimal place below ten units (`2.3G`),
/// a truncated integer at or above (`23G`), and a bare byte count below 1 KiB.
pub fn format_size(blocks: u64, block_size: u64, human_readable: bool) -> String {
    if !human_readable {
        return blocks.to_string();
    }

    let bytes = u128::from(blocks) * u128::from(block_size);
    for (shift, suffix) in UNITS {
        let unit = 1u128 << shift;
        if bytes > 10 * unit {
            return format!("{}{}", bytes / unit, suffix);
        }
        if bytes > unit {
            let tenths = bytes * 10 / unit;
            return format!("{}.{}{}", tenths / 10, tenths % 10, suffix);
        }
    }
    bytes.to_string()
}

/// [`format_size`] driven by a run's [`SizeFormat`]
pub fn format_blocks(blocks: u64, format: SizeFormat) -> String {
    format_size(blocks, format.block_size.bytes(), format.human_readable)
}
