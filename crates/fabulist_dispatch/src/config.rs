//! Layered configuration for service endpoints and retry policy.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from fabulist.toml)
//! - `~/.config/fabulist/fabulist.toml`
//! - `./fabulist.toml`

use crate::RetryPolicy;
use config::{Config, File, FileFormat};
use fabulist_error::{ConfigError, FabulistResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Endpoint and model selection for the Gemini and Imagen services.
///
/// # Example
///
/// ```toml
/// [gemini]
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// text_model = "gemini-2.5-flash-preview-09-2025"
/// image_model = "imagen-4.0-generate-001"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeminiSettings {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Model used for structured story text
    pub text_model: String,
    /// Model used for page illustrations
    pub image_model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash-preview-09-2025".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Top-level Fabulist configuration.
///
/// # Example
///
/// ```no_run
/// use fabulist_dispatch::FabulistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulistConfig::load()?;
/// println!("Text model: {}", config.gemini.text_model);
/// println!("Attempts per call: {}", config.retry.max_attempts());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FabulistConfig {
    /// Service endpoints and models
    pub gemini: GeminiSettings,
    /// Backoff schedule shared by both services
    pub retry: RetryPolicy,
}

impl FabulistConfig {
    /// Load configuration from a specific file path, on top of built-in
    /// defaults for anything the file leaves out.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FabulistResult<Self> {
        debug!("Loading configuration from file");
        let display = path.as_ref().display().to_string();

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!("Failed to read configuration: {}", e))
                    .with_path(display.clone())
            })?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::new(format!("Failed to parse configuration: {}", e))
                    .with_path(display.clone())
            })?;

        config.retry.validate().map_err(|e| e.with_path(display))?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled
    /// defaults. User files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse or the merged
    /// retry policy is invalid.
    #[instrument]
    pub fn load() -> FabulistResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../fabulist.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fabulist/fabulist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("fabulist").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.retry.validate()?;
        debug!(
            text_model = %config.gemini.text_model,
            image_model = %config.gemini.image_model,
            max_retries = config.retry.max_retries(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.gemini.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
