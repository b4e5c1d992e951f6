//! Request and response types for the generation services.

use crate::{ImageData, Input};
use serde::Serialize;

/// Structured text-generation request.
///
/// # Examples
///
/// ```
/// use fabulist_core::{GenerateRequest, Input};
/// use serde_json::json;
///
/// let request = GenerateRequest {
///     system_instruction: "You are a storyteller.".to_string(),
///     content: vec![Input::Text("Start the story.".to_string())],
///     response_schema: Some(json!({"type": "OBJECT"})),
/// };
///
/// assert_eq!(request.image_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct GenerateRequest {
    /// Instruction framing the whole exchange
    pub system_instruction: String,
    /// User turn: text followed by any inline images
    pub content: Vec<Input>,
    /// JSON schema the reply must follow
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Number of inline images attached.
    pub fn image_count(&self) -> usize {
        self.content.iter().filter(|p| p.is_image()).count()
    }

    /// Concatenated text parts of the user turn.
    pub fn user_text(&self) -> String {
        self.content
            .iter()
            .filter_map(Input::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Raw text returned by the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateResponse {
    /// Generated text, expected to hold a JSON document
    pub text: String,
}

/// Image-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    /// Full prompt including the art style clause
    pub prompt: String,
}

/// Image-generation result. `image` is `None` when the service answered
/// successfully without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResponse {
    /// Decoded image, if any
    pub image: Option<ImageData>,
}
