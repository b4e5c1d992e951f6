//! Decoded image payloads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// An illustration produced by the image service.
///
/// # Examples
///
/// ```
/// use fabulist_core::ImageData;
///
/// let image = ImageData::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(image.to_base64(), "iVBORw==");
/// assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct ImageData {
    /// MIME type, e.g. "image/png"
    mime: String,
    /// Raw image bytes
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl ImageData {
    /// Wrap decoded image bytes.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Decode a base64 payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder message if the payload is not valid base64.
    pub fn from_base64(mime: impl Into<String>, payload: &str) -> Result<Self, String> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| e.to_string())?;
        Ok(Self::new(mime, bytes))
    }

    /// Standard base64 encoding of the bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }

    /// Conventional file extension for the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}
