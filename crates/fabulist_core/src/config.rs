//! Story configuration chosen before the first page.

use fabulist_error::{BuilderError, BuilderErrorKind};
use serde::Serialize;

/// Fewest pages a story may be configured for.
pub const MIN_STEPS: u32 = 1;

/// Most pages a story may be configured for.
pub const MAX_STEPS_LIMIT: u32 = 20;

/// Page cap used when none is given.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Language the story is narrated in.
///
/// # Examples
///
/// ```
/// use fabulist_core::Language;
///
/// let lang: Language = "hebrew".parse().unwrap();
/// assert_eq!(lang, Language::Hebrew);
/// assert_eq!(lang.to_string(), "Hebrew");
/// assert!(lang.is_right_to_left());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    /// English narration
    #[default]
    English,
    /// Hebrew narration
    Hebrew,
    /// Russian narration
    Russian,
}

impl Language {
    /// Whether text in this language reads right to left.
    pub fn is_right_to_left(&self) -> bool {
        matches!(self, Language::Hebrew)
    }
}

/// Illustration style applied to every page image.
///
/// # Examples
///
/// ```
/// use fabulist_core::ArtStyle;
///
/// let style: ArtStyle = "Western Comic".parse().unwrap();
/// assert_eq!(style, ArtStyle::WesternComic);
/// assert_eq!(ArtStyle::default().to_string(), "Watercolor");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum ArtStyle {
    /// Photographic realism
    Photorealistic,
    /// Soft watercolor painting
    #[default]
    Watercolor,
    /// Inked western comic book panels
    #[display("Western Comic")]
    #[strum(serialize = "Western Comic", serialize = "western-comic", serialize = "WesternComic")]
    WesternComic,
    /// Japanese animation
    Anime,
    /// Flat vector illustration
    #[display("Flat Design")]
    #[strum(serialize = "Flat Design", serialize = "flat-design", serialize = "FlatDesign")]
    FlatDesign,
    /// Dreamlike surrealism
    Surrealist,
    /// Opaque gouache painting
    #[display("Gouache Illustration")]
    #[strum(
        serialize = "Gouache Illustration",
        serialize = "gouache-illustration",
        serialize = "GouacheIllustration"
    )]
    GouacheIllustration,
    /// Native American art traditions
    #[display("Native American Art")]
    #[strum(
        serialize = "Native American Art",
        serialize = "native-american-art",
        serialize = "NativeAmericanArt"
    )]
    NativeAmericanArt,
}

/// Settings fixed for the lifetime of a story.
///
/// `max_steps` is clamped to `[MIN_STEPS, MAX_STEPS_LIMIT]` when the
/// configuration is built, so an out-of-range cap is never observable.
///
/// # Examples
///
/// ```
/// use fabulist_core::{ArtStyle, StoryConfig, MAX_STEPS_LIMIT};
///
/// let config = StoryConfig::builder()
///     .topic("Volcanoes")
///     .art_style(ArtStyle::Anime)
///     .max_steps(50u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.max_steps(), MAX_STEPS_LIMIT);
/// assert_eq!(config.topic(), "Volcanoes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "fallible_build"))]
pub struct StoryConfig {
    /// What the story is about.
    topic: String,
    /// Narration language.
    #[builder(default)]
    language: Language,
    /// Page cap, clamped on build.
    #[builder(default = DEFAULT_MAX_STEPS)]
    max_steps: u32,
    /// Free-form guidance appended to every instruction.
    #[builder(default)]
    extra_details: String,
    /// Illustration style.
    #[builder(default)]
    art_style: ArtStyle,
}

impl StoryConfig {
    /// Creates a new story config builder.
    pub fn builder() -> StoryConfigBuilder {
        StoryConfigBuilder::default()
    }

    /// Clamp a requested page cap into the supported range.
    pub fn clamp_steps(requested: u32) -> u32 {
        requested.clamp(MIN_STEPS, MAX_STEPS_LIMIT)
    }
}

impl StoryConfigBuilder {
    /// Build the configuration, trimming the topic and clamping `max_steps`.
    ///
    /// # Errors
    ///
    /// Returns an error if the topic is missing or blank.
    pub fn build(&self) -> Result<StoryConfig, BuilderError> {
        let mut config = self.fallible_build().map_err(|e| match e {
            StoryConfigBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            StoryConfigBuilderError::ValidationError(msg) => {
                BuilderError::new(BuilderErrorKind::ValidationFailed(msg))
            }
        })?;

        config.topic = config.topic.trim().to_string();
        if config.topic.is_empty() {
            return Err(BuilderError::new(BuilderErrorKind::ValidationFailed(
                "topic cannot be empty".to_string(),
            )));
        }
        config.extra_details = config.extra_details.trim().to_string();
        config.max_steps = StoryConfig::clamp_steps(config.max_steps);
        Ok(config)
    }
}
