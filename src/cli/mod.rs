//! Command-line interface module

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{CollapseArgs, CutArgs, InspectArgs};

/// Reelcut command-line interface
#[derive(Parser, Debug)]
#[command(name = "reelcut", version, about = "Transcript-driven timeline editing and lossless export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the collapsed preview timeline for a project
    Collapse(CollapseArgs),
    /// Export a project (or manual keep-ranges) as a lossless cut
    Cut(CutArgs),
    /// Inspect a media file
    Inspect(InspectArgs),
}
