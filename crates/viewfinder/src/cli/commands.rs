//! CLI command definitions.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use viewfinder::StageSelector;

/// Viewfinder - photo-shoot plans from client conversations
#[derive(Parser, Debug)]
#[command(name = "viewfinder")]
#[command(about = "Turn client conversations into photo-shoot plans", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one session and print the response envelope as JSON
    Process(ProcessArgs),

    /// Print the effective configuration as JSON
    Config,
}

/// Arguments for `viewfinder process`.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["conversation_id", "transcript_file", "intake_file", "request_file"]),
))]
pub struct ProcessArgs {
    /// Conversation to poll for a transcript
    #[arg(long)]
    pub conversation_id: Option<String>,

    /// Plain-text transcript, `-` for stdin
    #[arg(long)]
    pub transcript_file: Option<PathBuf>,

    /// JSON intake form
    #[arg(long)]
    pub intake_file: Option<PathBuf>,

    /// Complete JSON session request, including reusable context and locations
    #[arg(long)]
    pub request_file: Option<PathBuf>,

    /// Outputs to produce: context, locations, shots or full
    #[arg(long)]
    pub stage: Option<StageSelector>,

    /// Generate concept sketches for the first shots
    #[arg(long)]
    pub images: bool,

    /// Override the configured image cap
    #[arg(long, requires = "images")]
    pub max_images: Option<usize>,
}
