//! Driver traits for the text and image generation services.

use async_trait::async_trait;
use fabulist_core::{GenerateRequest, GenerateResponse, ImageRequest, ImageResponse};
use fabulist_error::FabulistResult;

/// Text-generation backend returning a JSON document as text.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate text for a multimodal request.
    ///
    /// Implementations return the raw text of the first candidate. A
    /// success status without any text is an error.
    async fn generate(&self, req: &GenerateRequest) -> FabulistResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash-preview-09-2025").
    fn model_name(&self) -> &str;

    /// Maximum number of inline images accepted per request.
    fn max_images_per_request(&self) -> usize {
        3
    }
}

/// Image-generation backend.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate a single image for the prompt.
    ///
    /// A success status without an image payload yields
    /// `ImageResponse { image: None }` rather than an error.
    async fn generate_image(&self, req: &ImageRequest) -> FabulistResult<ImageResponse>;

    /// Provider name (e.g., "imagen").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "imagen-4.0-generate-001").
    fn model_name(&self) -> &str;
}
