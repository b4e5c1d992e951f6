//! Wire types for the Gemini `generateContent` and Imagen `predict` calls.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// System instruction wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInstruction {
    /// Instruction parts
    pub parts: Vec<Part>,
}

/// A single content turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Content parts, text first then inline media
    pub parts: Vec<Part>,
}

/// Request part: plain text or inline media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text part
    Text {
        /// Text content
        text: String,
    },
    /// Inline base64 media part
    InlineData {
        /// Media payload
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Inline base64 media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type (e.g., "image/png")
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// Output constraints for structured generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// MIME type of the response body
    pub response_mime_type: String,
    /// JSON schema the response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Instruction framing the exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    /// Conversation turns
    pub contents: Vec<Content>,
    /// Structured output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Error object carried in failed (or oddly successful) responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApiErrorBody {
    /// HTTP-style status code
    #[serde(default)]
    code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    message: Option<String>,
    /// Machine-readable status (e.g., "RESOURCE_EXHAUSTED")
    #[serde(default)]
    status: Option<String>,
}

/// Response part; only text is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ResponsePart {
    /// Text content, if this is a text part
    #[serde(default)]
    text: Option<String>,
}

/// Content of a response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CandidateContent {
    /// Parts in order
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// One response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    content: Option<CandidateContent>,
    /// Why generation stopped (e.g., "STOP", "SAFETY")
    #[serde(default)]
    finish_reason: Option<String>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidates, first one is used
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Error reported alongside a success status
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Finish reason of the first candidate.
    pub fn first_finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

/// Imagen prompt instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagenInstance {
    /// Image prompt
    pub prompt: String,
}

/// Imagen generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenParameters {
    /// Number of images to generate
    pub sample_count: u32,
}

/// `predict` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagenRequest {
    /// Prompt instance
    pub instances: ImagenInstance,
    /// Generation parameters
    pub parameters: ImagenParameters,
}

impl ImagenRequest {
    /// Request a single image for the prompt.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            instances: ImagenInstance {
                prompt: prompt.into(),
            },
            parameters: ImagenParameters { sample_count: 1 },
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ImagenPrediction {
    /// Base64 image bytes
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    /// MIME type of the image
    #[serde(default)]
    mime_type: Option<String>,
}

/// `predict` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImagenResponse {
    /// Predictions, first one is used
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
    /// Error reported alongside a success status
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

impl ImagenResponse {
    /// The first prediction carrying image bytes.
    ///
    /// An empty payload counts as no image.
    pub fn first_image(&self) -> Option<&ImagenPrediction> {
        self.predictions.first().filter(|p| {
            p.bytes_base64_encoded
                .as_deref()
                .is_some_and(|b| !b.trim().is_empty())
        })
    }
}
