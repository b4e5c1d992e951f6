//! A single committed story page.

use crate::ImageData;
use fabulist_error::{BuilderError, BuilderErrorKind};
use serde::Serialize;

/// One generated step of the story. Pages are never mutated once built.
///
/// # Examples
///
/// ```
/// use fabulist_core::Page;
///
/// let page = Page::builder()
///     .story_text("The ship creaked as the storm rolled in.")
///     .educational_fact("Lightning is hotter than the surface of the sun.")
///     .choice("Start the story.")
///     .updated_summary("A storm approaches the ship.")
///     .build()
///     .unwrap();
///
/// assert!(page.image().is_none());
/// assert_eq!(page.question(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "fallible_build"))]
pub struct Page {
    /// Narrative prose.
    story_text: String,
    /// Fact tied to the topic.
    educational_fact: String,
    /// Follow-up question, empty when the service gave none.
    #[builder(default)]
    question: String,
    /// Illustration, absent when image generation failed.
    #[builder(default)]
    image: Option<ImageData>,
    /// The action that produced this page.
    choice: String,
    /// Rolling summary replacing the previous one.
    updated_summary: String,
}

impl Page {
    /// Creates a new page builder.
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    /// Illustration as a `data:` URL, if the page has one.
    pub fn image_data_url(&self) -> Option<String> {
        self.image.as_ref().map(ImageData::to_data_url)
    }
}

impl PageBuilder {
    /// Build the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing.
    pub fn build(&self) -> Result<Page, BuilderError> {
        self.fallible_build().map_err(|e| match e {
            PageBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            PageBuilderError::ValidationError(msg) => {
                BuilderError::new(BuilderErrorKind::ValidationFailed(msg))
            }
        })
    }
}
