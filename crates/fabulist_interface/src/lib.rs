//! Trait definitions for the Fabulist generation services.
//!
//! A story step talks to two services: one that writes structured text and
//! one that paints the page illustration. Each is reached through its own
//! driver trait so the engine can be exercised against scripted doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageDriver, TextDriver};
