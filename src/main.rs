//! Reelcut CLI
//!
//! Transcript-driven, non-destructive video editing from the command line:
//! compute collapsed previews, inspect media, and export lossless cuts.
//!
//! # Usage
//!
//! ```bash
//! reelcut collapse --project project.json
//! reelcut cut --project project.json --output final.mp4
//! reelcut cut --input raw.mp4 --ranges "0-2,5-7" --output cut.mp4
//! reelcut inspect --input raw.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelcut::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collapse(args) => {
            info!("Executing collapse command");
            commands::collapse(args)?;
        }
        Commands::Cut(args) => {
            info!("Executing cut command");
            commands::cut(args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args).await?;
        }
    }

    Ok(())
}
