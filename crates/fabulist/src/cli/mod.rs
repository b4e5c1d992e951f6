//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fabulist binary.

mod commands;
mod play;

pub use commands::{Cli, Commands, PlayArgs};
pub use play::play_story;
