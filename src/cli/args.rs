//! Command-line argument definitions

use clap::Args;

/// Arguments for the collapse command
#[derive(Args, Debug)]
pub struct CollapseArgs {
    /// Project file path (JSON)
    #[arg(short, long)]
    pub project: String,

    /// Editor configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    /// Project file path (JSON); keep-ranges come from its deletion sets
    #[arg(short, long, conflicts_with_all = ["input", "ranges"])]
    pub project: Option<String>,

    /// Input media file for manual cutting
    #[arg(short, long, requires = "ranges")]
    pub input: Option<String>,

    /// Manual keep-ranges, e.g. "0-2,5.5-7" (seconds or MM:SS.ms)
    #[arg(short, long, requires = "input")]
    pub ranges: Option<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: String,

    /// Editor configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// ffmpeg binary to use
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file path
    #[arg(short, long)]
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
