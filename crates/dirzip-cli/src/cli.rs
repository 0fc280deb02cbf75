//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirzip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub args: ZipArgs,

    /// Trace every visited path and written entry to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct ZipArgs {
    /// File or directory to archive
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output archive file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Overwrite output file if it exists
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Append trace lines to this file
    #[arg(long, value_name = "PATH", conflicts_with = "verbose")]
    pub log_file: Option<PathBuf>,
}
