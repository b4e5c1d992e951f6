//! Error types for the Fabulist story engine.
//!
//! This crate provides the error taxonomy shared by every Fabulist crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The three failure classes a story step can hit map onto:
//! - [`ServiceError`]: transport failures, non-success statuses and
//!   application-level error payloads (retried by the dispatcher)
//! - [`MalformedResponseError`]: a successful call whose payload does not
//!   match the expected shape (never retried)
//! - [`StoryError`]: actions rejected locally by the story state machine
//!
//! # Examples
//!
//! ```
//! use fabulist_error::{FabulistResult, ServiceError, ServiceErrorKind};
//!
//! fn call_service() -> FabulistResult<String> {
//!     Err(ServiceError::new(ServiceErrorKind::Transport("connection refused".into())))?
//! }
//!
//! match call_service() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e.user_message()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod malformed;
mod service;
mod story;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{FabulistError, FabulistErrorKind, FabulistResult};
pub use malformed::{MalformedResponseError, MalformedResponseErrorKind};
pub use service::{ServiceError, ServiceErrorKind};
pub use story::{StoryError, StoryErrorKind};
