//! Fabulist CLI binary.
//!
//! Plays an interactive illustrated story in the terminal.

use clap::Parser;
use fabulist::observability::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, play_story};

    // GEMINI_API_KEY may live in a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        logging = logging.with_log_level("info,fabulist=debug");
    }
    init_logging(&logging)?;

    match cli.command {
        Commands::Play(args) => {
            play_story(args).await?;
        }
    }

    Ok(())
}
