//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use fabulist::{ArtStyle, DEFAULT_MAX_STEPS, Language};
use std::path::PathBuf;

/// Fabulist - interactive illustrated stories
#[derive(Parser, Debug)]
#[command(name = "fabulist")]
#[command(about = "Interactive illustrated stories driven by text and image generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a story in the terminal
    Play(PlayArgs),
}

/// Options for a new story.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// What the story is about
    #[arg(required = true, num_args = 1..)]
    pub topic: Vec<String>,

    /// Narration language (English, Hebrew, Russian)
    #[arg(short, long, default_value = "English")]
    pub language: Language,

    /// Illustration style, e.g. "Watercolor" or "western-comic"
    #[arg(short = 's', long, default_value = "Watercolor")]
    pub art_style: ArtStyle,

    /// Most pages the story may have (1-20)
    #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_pages: u32,

    /// Extra wishes for the storyteller
    #[arg(short = 'd', long, default_value = "")]
    pub details: String,

    /// Save each page's illustration into this directory
    #[arg(long, env = "FABULIST_IMAGE_DIR")]
    pub image_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default locations
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
