//! Google Gemini and Imagen REST clients.
//!
//! - [`GeminiClient`] posts structured text requests to
//!   `models/{model}:generateContent`, attaching inline images and a JSON
//!   response schema
//! - [`ImagenClient`] posts prompts to `models/{model}:predict` and decodes
//!   the base64 image payload
//!
//! Both report non-success statuses with the service's own error message
//! when the body carries one.

mod client;
mod errors;
mod imagen;
mod protocol;

pub use client::GeminiClient;
pub use imagen::ImagenClient;
pub use protocol::{
    ApiErrorBody, Candidate, CandidateContent, Content, GeminiRequest, GeminiResponse,
    GenerationConfig, ImagenInstance, ImagenParameters, ImagenPrediction, ImagenRequest,
    ImagenResponse, InlineData, Part, ResponsePart, SystemInstruction,
};

use fabulist_dispatch::FabulistConfig;
use fabulist_error::{FabulistResult, ServiceError, ServiceErrorKind};

/// Read the API key named by the configuration.
fn api_key_from(config: &FabulistConfig) -> FabulistResult<String> {
    config
        .api_key()
        .ok_or_else(|| ServiceError::new(ServiceErrorKind::MissingApiKey).into())
}
