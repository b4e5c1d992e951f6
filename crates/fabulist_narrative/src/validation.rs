//! Structural validation of generated JSON payloads.
//!
//! Generated text may arrive wrapped in markdown code fences. Validation
//! strips the fences, parses the JSON, requires an object, checks every
//! declared field for presence and type, then decodes into a typed payload.
//! The same field table produces the response schema sent to the service.

use fabulist_core::ThemeSet;
use fabulist_error::{MalformedResponseError, MalformedResponseErrorKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, error};

/// JSON type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FieldKind {
    /// JSON string
    #[display("string")]
    String,
    /// JSON boolean
    #[display("boolean")]
    Boolean,
    /// JSON array of strings
    #[display("array of strings")]
    StringArray,
}

impl FieldKind {
    /// Schema fragment for this kind.
    pub fn schema(&self) -> Value {
        match self {
            FieldKind::String => json!({"type": "STRING"}),
            FieldKind::Boolean => json!({"type": "BOOLEAN"}),
            FieldKind::StringArray => json!({"type": "ARRAY", "items": {"type": "STRING"}}),
        }
    }

    /// Whether `value` has this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One declared field of a response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Wire name
    pub name: &'static str,
    /// Expected JSON type
    pub kind: FieldKind,
    /// Whether the field must be present and non-null
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Remove markdown code fences and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use fabulist_narrative::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// A typed payload with a declared JSON shape.
pub trait StructuredResponse: DeserializeOwned {
    /// Shape name used in error messages.
    const SHAPE: &'static str;

    /// Declared fields.
    const FIELDS: &'static [FieldSpec];

    /// Response schema sent with the request.
    fn schema() -> Value {
        let properties: Map<String, Value> = Self::FIELDS
            .iter()
            .map(|f| (f.name.to_string(), f.kind.schema()))
            .collect();
        let required: Vec<&str> = Self::FIELDS
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    /// Validate raw generated text and decode it.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedResponseError`] if the text is not a JSON object,
    /// a required field is absent or null, or a field has the wrong type.
    fn validate(raw: &str) -> Result<Self, MalformedResponseError> {
        let cleaned = strip_code_fences(raw);
        let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
            error!(shape = Self::SHAPE, error = %e, "Generated text is not valid JSON");
            MalformedResponseError::new(MalformedResponseErrorKind::InvalidJson(e.to_string()))
        })?;

        let object = value.as_object().ok_or_else(|| {
            MalformedResponseError::new(MalformedResponseErrorKind::NotAnObject(Self::SHAPE))
        })?;

        for field in Self::FIELDS {
            match object.get(field.name).filter(|v| !v.is_null()) {
                None if field.required => {
                    error!(shape = Self::SHAPE, field = field.name, "Required field missing");
                    return Err(MalformedResponseError::new(
                        MalformedResponseErrorKind::MissingField {
                            shape: Self::SHAPE,
                            field: field.name,
                        },
                    ));
                }
                Some(v) if !field.kind.matches(v) => {
                    error!(shape = Self::SHAPE, field = field.name, "Field has wrong type");
                    return Err(MalformedResponseError::new(
                        MalformedResponseErrorKind::InvalidField {
                            shape: Self::SHAPE,
                            field: field.name.to_string(),
                            message: format!("expected {}", field.kind),
                        },
                    ));
                }
                _ => {}
            }
        }

        debug!(shape = Self::SHAPE, "Generated payload passed validation");
        serde_json::from_value(value).map_err(|e| {
            error!(shape = Self::SHAPE, error = %e, "Generated payload failed to decode");
            MalformedResponseError::new(MalformedResponseErrorKind::InvalidJson(e.to_string()))
        })
    }
}

/// Reply to the initialization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    /// Background themes (five are requested, any count is accepted)
    themes: Vec<String>,
    /// Narrative resolution to steer toward
    story_ending_goal: String,
    /// English description of how characters and places look
    visual_brief: String,
}

impl StructuredResponse for ThemeResponse {
    const SHAPE: &'static str = "theme";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("themes", FieldKind::StringArray),
        FieldSpec::required("storyEndingGoal", FieldKind::String),
        FieldSpec::required("visualBrief", FieldKind::String),
    ];
}

impl From<ThemeResponse> for ThemeSet {
    fn from(response: ThemeResponse) -> Self {
        ThemeSet::new(
            response.themes,
            response.story_ending_goal,
            Some(response.visual_brief),
        )
    }
}

/// Reply to a story step request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    /// Narrative prose
    story_text: String,
    /// Fact tied to the topic
    educational_fact: String,
    /// Follow-up question
    #[serde(default)]
    question: Option<String>,
    /// Prompt for the illustration
    image_prompt: String,
    /// Whether the story reached its end
    is_game_over: bool,
    /// Rolling summary replacing the previous one
    updated_summary: String,
}

impl StructuredResponse for StepResponse {
    const SHAPE: &'static str = "step";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("storyText", FieldKind::String),
        FieldSpec::required("educationalFact", FieldKind::String),
        FieldSpec::optional("question", FieldKind::String),
        FieldSpec::required("imagePrompt", FieldKind::String),
        FieldSpec::required("isGameOver", FieldKind::Boolean),
        FieldSpec::required("updatedSummary", FieldKind::String),
    ];
}
