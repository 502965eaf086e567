mod cli;

use crate::cli::{Cli, Commands};
use anyhow::Context;
use clap::Parser;
use yearstrip::{Id3Backend, Reporter, TagCleaner};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cleaner = TagCleaner::with_backend(Id3Backend, Reporter::new(cli.report_config()));

    match &cli.command {
        Commands::File { path } => cleaner.clean_file(path),
        Commands::Folder { path } => {
            let folder = match path {
                Some(p) => p.clone(),
                None => dirs::audio_dir().context("No music folder found; pass a folder path")?,
            };
            cleaner
                .clean_directory(&folder)
                .with_context(|| format!("Failed to clean folder {}", folder.display()))?;
        }
    }

    Ok(())
}
