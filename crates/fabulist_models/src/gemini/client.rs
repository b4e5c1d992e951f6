use super::errors::{ensure_success, transport_error};
use super::{
    Content, GeminiRequest, GeminiResponse, GenerationConfig, InlineData, Part, SystemInstruction,
    api_key_from,
};
use async_trait::async_trait;
use fabulist_core::{GenerateRequest, GenerateResponse, Input};
use fabulist_dispatch::{FabulistConfig, GeminiSettings};
use fabulist_error::{FabulistResult, ServiceError, ServiceErrorKind};
use fabulist_interface::TextDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const JSON_MIME: &str = "application/json";

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `settings` - Base URL and text model
    pub fn new(api_key: impl Into<String>, settings: &GeminiSettings) -> Self {
        debug!(model = %settings.text_model, "Creating new Gemini client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.text_model.clone(),
        }
    }

    /// Creates a client from loaded configuration, reading the API key from
    /// the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    pub fn from_config(config: &FabulistConfig) -> FabulistResult<Self> {
        let api_key = api_key_from(config)?;
        Ok(Self::new(api_key, &config.gemini))
    }

    /// Full `generateContent` URL, without the key.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Converts a Fabulist request into the wire body.
    pub fn convert_request(request: &GenerateRequest) -> GeminiRequest {
        let parts = request
            .content
            .iter()
            .map(|input| match input {
                Input::Text(text) => Part::Text { text: text.clone() },
                Input::Image(image) => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime().clone(),
                        data: image.to_base64(),
                    },
                },
            })
            .collect();

        let system_instruction = (!request.system_instruction.trim().is_empty()).then(|| {
            SystemInstruction {
                parts: vec![Part::Text {
                    text: request.system_instruction.clone(),
                }],
            }
        });

        let generation_config = request
            .response_schema
            .as_ref()
            .map(|schema| GenerationConfig {
                response_mime_type: JSON_MIME.to_string(),
                response_schema: Some(schema.clone()),
            });

        GeminiRequest {
            system_instruction,
            contents: vec![Content { parts }],
            generation_config,
        }
    }

    /// Extracts the generated text from a response body.
    ///
    /// # Errors
    ///
    /// Returns an application error when the body reports an error or has
    /// no candidate text. Blank text counts as none.
    pub fn convert_response(response: &GeminiResponse) -> Result<GenerateResponse, ServiceError> {
        if let Some(message) = response.error().as_ref().and_then(|e| e.message().clone()) {
            return Err(ServiceError::new(ServiceErrorKind::Application(message)));
        }

        match response.first_text().filter(|text| !text.trim().is_empty()) {
            Some(text) => Ok(GenerateResponse {
                text: text.to_string(),
            }),
            None => {
                let reason = response.first_finish_reason().unwrap_or("unknown");
                Err(ServiceError::new(ServiceErrorKind::Application(format!(
                    "The story service returned no content (finish reason: {})",
                    reason
                ))))
            }
        }
    }

    /// Sends a request to the Gemini API.
    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn generate_gemini(
        &self,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, ServiceError> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("gemini", e))?;

        let response = ensure_success("gemini", response).await?;

        response.json::<GeminiResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            ServiceError::new(ServiceErrorKind::Decode(e.to_string()))
        })
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    #[instrument(skip(self, request), fields(images = request.image_count()))]
    async fn generate(&self, request: &GenerateRequest) -> FabulistResult<GenerateResponse> {
        debug!("Generating text with Gemini");

        let body = Self::convert_request(request);
        let response = self.generate_gemini(&body).await?;
        let response = Self::convert_response(&response)?;

        debug!(chars = response.text.len(), "Received text from Gemini");
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
