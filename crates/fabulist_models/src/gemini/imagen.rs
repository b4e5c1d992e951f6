use super::errors::{ensure_success, transport_error};
use super::{ImagenRequest, ImagenResponse, api_key_from};
use async_trait::async_trait;
use fabulist_core::{ImageData, ImageRequest, ImageResponse};
use fabulist_dispatch::{FabulistConfig, GeminiSettings};
use fabulist_error::{FabulistResult, ServiceError, ServiceErrorKind};
use fabulist_interface::ImageDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Imagen `predict` client.
#[derive(Debug, Clone)]
pub struct ImagenClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ImagenClient {
    /// Creates a new Imagen client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `settings` - Base URL and image model
    pub fn new(api_key: impl Into<String>, settings: &GeminiSettings) -> Self {
        debug!(model = %settings.image_model, "Creating new Imagen client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.image_model.clone(),
        }
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    pub fn from_config(config: &FabulistConfig) -> FabulistResult<Self> {
        let api_key = api_key_from(config)?;
        Ok(Self::new(api_key, &config.gemini))
    }

    /// Full `predict` URL, without the key.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:predict", self.base_url, self.model)
    }

    /// Decodes the first prediction into an image.
    ///
    /// A body without image bytes yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body reports an error or the payload is not
    /// valid base64.
    pub fn convert_response(response: &ImagenResponse) -> Result<ImageResponse, ServiceError> {
        if let Some(message) = response.error().as_ref().and_then(|e| e.message().clone()) {
            return Err(ServiceError::new(ServiceErrorKind::Application(message)));
        }

        let Some(prediction) = response.first_image() else {
            return Ok(ImageResponse { image: None });
        };
        let payload = prediction.bytes_base64_encoded().as_deref().unwrap_or_default();
        let mime = prediction
            .mime_type()
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        let image = ImageData::from_base64(mime, payload)
            .map_err(|e| ServiceError::new(ServiceErrorKind::Decode(e)))?;
        Ok(ImageResponse { image: Some(image) })
    }

    /// Sends a request to the Imagen API.
    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn generate_imagen(
        &self,
        request: &ImagenRequest,
    ) -> Result<ImagenResponse, ServiceError> {
        debug!("Sending request to Imagen API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("imagen", e))?;

        let response = ensure_success("imagen", response).await?;

        response.json::<ImagenResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Imagen response");
            ServiceError::new(ServiceErrorKind::Decode(e.to_string()))
        })
    }
}

#[async_trait]
impl ImageDriver for ImagenClient {
    #[instrument(skip(self, request), fields(prompt_len = request.prompt.len()))]
    async fn generate_image(&self, request: &ImageRequest) -> FabulistResult<ImageResponse> {
        debug!("Generating image with Imagen");

        let body = ImagenRequest::single(request.prompt.clone());
        let response = self.generate_imagen(&body).await?;
        let response = Self::convert_response(&response)?;

        debug!(has_image = response.image.is_some(), "Received Imagen response");
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "imagen"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_uses_image_model() {
        let client = ImagenClient::new("key", &GeminiSettings::default());
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn missing_payload_is_not_an_error() {
        let response: ImagenResponse = serde_json::from_value(json!({"predictions": []})).unwrap();
        let out = ImagenClient::convert_response(&response).unwrap();
        assert!(out.image.is_none());
    }

    #[test]
    fn empty_payload_is_not_an_image() {
        for payload in ["", "  \n"] {
            let response: ImagenResponse = serde_json::from_value(json!({
                "predictions": [{"bytesBase64Encoded": payload, "mimeType": "image/png"}]
            }))
            .unwrap();
            let out = ImagenClient::convert_response(&response).unwrap();
            assert!(out.image.is_none());
        }
    }

    #[test]
    fn payload_defaults_to_png() {
        let response: ImagenResponse = serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "aGVsbG8="}]
        }))
        .unwrap();
        let image = ImagenClient::convert_response(&response).unwrap().image.unwrap();
        assert_eq!(image.mime(), "image/png");
        assert_eq!(image.bytes(), b"hello");
    }

    #[test]
    fn undecodable_payload_is_a_decode_error() {
        let response: ImagenResponse = serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "%%%"}]
        }))
        .unwrap();
        let err = ImagenClient::convert_response(&response).unwrap_err();
        assert!(matches!(err.kind, ServiceErrorKind::Decode(_)));
    }
}
