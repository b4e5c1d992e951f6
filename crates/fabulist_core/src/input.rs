//! Input parts carried by a text-generation request.

use crate::ImageData;
use serde::Serialize;

/// One part of a multimodal user turn.
///
/// # Examples
///
/// ```
/// use fabulist_core::{ImageData, Input};
///
/// let parts = vec![
///     Input::Text("Step: 2/10. User input: Open the door".to_string()),
///     Input::Image(ImageData::new("image/png", vec![1, 2, 3])),
/// ];
/// assert_eq!(parts.iter().filter(|p| p.is_image()).count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text.
    Text(String),
    /// Inline image, sent for visual continuity.
    Image(ImageData),
}

impl Input {
    /// Whether this part is an inline image.
    pub fn is_image(&self) -> bool {
        matches!(self, Input::Image(_))
    }

    /// Text content, if this part is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
            Input::Image(_) => None,
        }
    }
}
