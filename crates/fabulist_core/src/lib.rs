//! Core data types for the Fabulist interactive story engine.
//!
//! This crate provides the story data model shared by every Fabulist crate:
//! the immutable [`StoryConfig`], the [`ThemeSet`] fixed at initialization,
//! append-only [`Page`]s collected in a [`StoryState`], and the request and
//! response types exchanged with the generation services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod input;
mod media;
mod page;
mod request;
mod state;
mod theme;

pub use config::{
    ArtStyle, DEFAULT_MAX_STEPS, Language, MAX_STEPS_LIMIT, MIN_STEPS, StoryConfig,
    StoryConfigBuilder,
};
pub use input::Input;
pub use media::ImageData;
pub use page::{Page, PageBuilder};
pub use request::{GenerateRequest, GenerateResponse, ImageRequest, ImageResponse};
pub use state::StoryState;
pub use theme::ThemeSet;
