//! Retry dispatch and layered configuration.
//!
//! Every call to a generation service goes through a [`RetryDispatcher`],
//! which repeats failed calls on a fixed multiplicative backoff schedule
//! described by a [`RetryPolicy`]. Policies and service endpoints are loaded
//! into a [`FabulistConfig`] from bundled defaults and optional user files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatcher;
mod policy;

pub use config::{FabulistConfig, GeminiSettings};
pub use dispatcher::RetryDispatcher;
pub use policy::RetryPolicy;
