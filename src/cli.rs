use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::model::{BlockSize, DuOptions, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_OPEN};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pdu",
    version,
    about = "Summarize disk usage of each path, recursively for directories",
    disable_help_flag = true
)]
pub struct Cli {
    /// Paths to measure
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Scale sizes by SIZE bytes before printing them
    #[arg(
        short = 'B',
        long,
        value_name = "SIZE",
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub block_size: u64,

    /// Display only a total for each argument
    #[arg(short, long)]
    pub summarize: bool,

    /// Print sizes in human readable format (e.g. 1.1K 234M 2.3G)
    #[arg(short = 'h', long)]
    pub human_readable: bool,

    /// Produce a grand total
    #[arg(short = 'c', long)]
    pub total: bool,

    /// Maximum number of directories open at once
    #[arg(
        short = 'j',
        long,
        value_name = "NUM",
        default_value_t = DEFAULT_MAX_OPEN,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_open: usize,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl DuOptions {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let options = Self {
            block_size: BlockSize::new(cli.block_size)?,
            summarize: cli.summarize,
            human_readable: cli.human_readable,
            grand_total: cli.total,
            max_open: cli.max_open,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pdu").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert_eq!(cli.block_size, 1024);
        assert!(!cli.summarize && !cli.human_readable && !cli.total);

        let opts = DuOptions::from_cli(&cli).unwrap();
        assert_eq!(opts, DuOptions::default());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-s", "-h", "-c", "-B", "512", "-j", "4", "a", "b"]);
        assert_eq!(cli.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);

        let opts = DuOptions::from_cli(&cli).unwrap();
        assert_eq!(opts.block_size.bytes(), 512);
        assert!(opts.summarize && opts.human_readable && opts.grand_total);
        assert_eq!(opts.max_open, 4);
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&["--block-size", "4096", "--summarize", "--human-readable", "x"]);
        assert_eq!(cli.block_size, 4096);
        assert!(cli.summarize && cli.human_readable);
    }

    #[test]
    fn test_zero_block_size_rejected() {
        assert!(Cli::try_parse_from(["pdu", "-B", "0"]).is_err());
        assert!(Cli::try_parse_from(["pdu", "--max-open", "0"]).is_err());
    }
}
