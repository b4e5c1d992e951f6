//! Generation service clients for Fabulist.
//!
//! Providers live behind feature flags, as with any other backend crate.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) text generation and **Imagen** image generation,
//!   enabled with the default `gemini` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use fabulist_core::{GenerateRequest, Input};
//! use fabulist_dispatch::FabulistConfig;
//! use fabulist_interface::TextDriver;
//! use fabulist_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FabulistConfig::load()?;
//! let client = GeminiClient::from_config(&config)?;
//! let request = GenerateRequest {
//!     system_instruction: "Reply with a JSON object.".to_string(),
//!     content: vec![Input::Text("Hello".to_string())],
//!     response_schema: None,
//! };
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    ApiErrorBody, Candidate, CandidateContent, GeminiClient, GeminiRequest, GeminiResponse,
    GenerationConfig, ImagenClient, ImagenInstance, ImagenParameters, ImagenPrediction,
    ImagenRequest, ImagenResponse, InlineData, Part, ResponsePart, SystemInstruction, Content,
};
