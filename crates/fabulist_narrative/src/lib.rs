//! Narrative progression engine for Fabulist.
//!
//! This crate drives a choice-based illustrated story one page at a time.
//! For every step the engine builds the request context, calls the text
//! service through a retry dispatcher, validates the structured reply,
//! requests a matching illustration, commits the page and decides whether
//! the story is over.
//!
//! # Features
//!
//! - **Structured replies**: theme and step payloads are validated against
//!   the same field table that produces their response schema
//! - **Rolling context**: each step sees the latest summary and the most
//!   recent illustrations, never the full page history
//! - **Single flight**: at most one operation runs per story
//! - **Non-fatal images**: a failed illustration never loses a page
//!
//! # Example
//!
//! ```rust,ignore
//! use fabulist_core::StoryConfig;
//! use fabulist_dispatch::{FabulistConfig, RetryDispatcher};
//! use fabulist_models::{GeminiClient, ImagenClient};
//! use fabulist_narrative::StoryEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = FabulistConfig::load()?;
//! let config = StoryConfig::builder().topic("Coral reefs").build()?;
//! let engine = StoryEngine::new(
//!     config,
//!     GeminiClient::from_config(&settings)?,
//!     ImagenClient::from_config(&settings)?,
//!     RetryDispatcher::new(settings.retry.clone()),
//! );
//!
//! let first = engine.start().await?;
//! println!("{}", first.story_text());
//! let second = engine.submit("Follow the turtle").await?;
//! println!("{}", second.story_text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod engine;
mod session;
mod validation;

pub use context::{
    ContextBuilder, IMAGE_HISTORY_WINDOW, OPENING_ACTION, SUMMARY_PLACEHOLDER, THEME_REQUEST,
};
pub use engine::StoryEngine;
pub use session::{StoryHandle, StoryPhase, StorySession};
pub use validation::{
    FieldKind, FieldSpec, StepResponse, StructuredResponse, ThemeResponse, strip_code_fences,
};
