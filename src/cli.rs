use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yearstrip::{OutputFormat, ReportConfig};

#[derive(Parser)]
#[command(name = "yearstrip")]
#[command(version = "0.1.0")]
#[command(about = "Strip the year/date tag from MP3 files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print errors
    #[arg(long, short = 'q', default_value_t = false, global = true)]
    pub quiet: bool,

    /// Emit one JSON object per event instead of text lines
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,
}

impl Cli {
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            verbose: !self.quiet,
            output_format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a single MP3 file
    File { path: PathBuf },
    /// Clean every MP3 directly inside a folder (defaults to your music folder)
    Folder { path: Option<PathBuf> },
}
