//! Fabulist - Interactive Illustrated Stories
//!
//! Fabulist turns a topic into a choice-driven picture book. Every page is
//! written by a text generation service and illustrated by an image
//! generation service, and the reader decides what happens next.
//!
//! # Features
//!
//! - **Structured pages**: story text, an educational fact, a question and
//!   an illustration on every page
//! - **Retry with backoff**: transient service failures are retried on a
//!   configurable exponential schedule
//! - **Visual continuity**: recent illustrations accompany each request
//! - **Bounded stories**: a page cap, with early endings when the goal is met
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fabulist::{FabulistConfig, GeminiClient, ImagenClient, RetryDispatcher, StoryConfig, StoryEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = FabulistConfig::load()?;
//!     let config = StoryConfig::builder().topic("Volcanoes").build()?;
//!     let engine = StoryEngine::new(
//!         config,
//!         GeminiClient::from_config(&settings)?,
//!         ImagenClient::from_config(&settings)?,
//!         RetryDispatcher::new(settings.retry.clone()),
//!     );
//!
//!     let page = engine.start().await?;
//!     println!("{}", page.story_text());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - Gemini text and Imagen image clients
//! - `api` - enables tests that call the live services
//!
//! # Architecture
//!
//! - `fabulist_error` - Error types
//! - `fabulist_core` - Story configuration, pages, state and request types
//! - `fabulist_interface` - `TextDriver` and `ImageDriver` traits
//! - `fabulist_dispatch` - Retry dispatcher and layered configuration
//! - `fabulist_models` - Gemini and Imagen clients
//! - `fabulist_narrative` - Context builder, validation and the story engine
//!
//! This crate (`fabulist`) re-exports everything for convenience.

pub use fabulist_core::*;
pub use fabulist_dispatch::*;
pub use fabulist_error::*;
pub use fabulist_interface::*;
pub use fabulist_narrative::*;

#[cfg(feature = "gemini")]
pub use fabulist_models::*;

pub mod observability;
pub mod player;
