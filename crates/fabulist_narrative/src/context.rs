//! Request context for each generation call.
//!
//! The step instruction carries only the rolling summary of what happened
//! so far, never the page history itself. Visual continuity comes from the
//! illustrations of the last few pages, attached inline to the text request.

use crate::{StepResponse, StructuredResponse, ThemeResponse};
use fabulist_core::{GenerateRequest, Input, StoryConfig, StoryState, ThemeSet};
use tracing::debug;

/// Action that produces the first page.
pub const OPENING_ACTION: &str = "Start the story.";

/// Summary used before any page exists.
pub const SUMMARY_PLACEHOLDER: &str = "Beginning of the journey.";

/// User turn of the initialization request.
pub const THEME_REQUEST: &str = "Initialize the story themes and ending goal based on the topic.";

/// Number of most recent pages whose illustrations accompany a step request.
pub const IMAGE_HISTORY_WINDOW: usize = 3;

/// Builds instructions and requests from the story configuration.
///
/// # Examples
///
/// ```
/// use fabulist_core::StoryConfig;
/// use fabulist_narrative::ContextBuilder;
///
/// let config = StoryConfig::builder().topic("Rainforests").max_steps(6u32).build().unwrap();
/// let context = ContextBuilder::new(&config);
///
/// assert_eq!(context.step_turn(2, "Climb the tree"), "Step: 2/6. User input: Climb the tree");
/// assert_eq!(
///     context.image_prompt("A toucan on a branch"),
///     "A toucan on a branch in Watercolor style. Detailed, consistent characters, full scene."
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContextBuilder<'a> {
    config: &'a StoryConfig,
}

impl<'a> ContextBuilder<'a> {
    /// Create a builder for the given configuration.
    pub fn new(config: &'a StoryConfig) -> Self {
        Self { config }
    }

    /// System instruction for the initialization request.
    pub fn theme_instruction(&self) -> String {
        format!(
            "You are a story architect. The user wants to play an interactive story about \"{topic}\".\n\
             Style: {style}.\n\
             Additional user preferences: \"{details}\".\n\
             \n\
             Tasks:\n\
             1. Generate 5 core philosophical themes for this story.\n\
             2. Generate a \"storyEndingGoal\", a specific narrative resolution.\n\
             3. Generate a \"visualBrief\", a short description in English of how characters and settings should look.\n\
             \n\
             Output must be in valid JSON format.",
            topic = self.config.topic(),
            style = self.config.art_style(),
            details = self.config.extra_details(),
        )
    }

    /// The initialization request, built from configuration alone.
    pub fn theme_request(&self) -> GenerateRequest {
        GenerateRequest {
            system_instruction: self.theme_instruction(),
            content: vec![Input::Text(THEME_REQUEST.to_string())],
            response_schema: Some(ThemeResponse::schema()),
        }
    }

    /// System instruction for a story step.
    pub fn step_instruction(&self, themes: &ThemeSet, summary: &str) -> String {
        let style = self.config.art_style();
        let mut context = format!(
            "- Themes: [{}]\n- Goal: {}\n",
            themes.joined(),
            themes.ending_goal()
        );
        if let Some(brief) = themes.visual_brief() {
            context.push_str(&format!("- Visual Brief: {}\n", brief));
        }
        if !self.config.extra_details().is_empty() {
            context.push_str(&format!(
                "- User Preferences: {}\n",
                self.config.extra_details()
            ));
        }
        context.push_str(&format!("- Story Summary so far: {}\n", summary));

        format!(
            "You are an AI storyteller for children.\n\
             Theme: {topic}.\n\
             Language: {language}.\n\
             Visual Style: {style}.\n\
             \n\
             Context:\n\
             {context}\
             \n\
             Storytelling Guidelines:\n\
             1. MERGE WITH THEME: Pick one background theme and integrate it.\n\
             2. CONSEQUENCE: Decisions must have logical outcomes based on environmental clues.\n\
             3. VISUAL CONSISTENCY: Maintain the look of the {style} style based on visual history.\n\
             4. FLEXIBLE ENDING: Conclude early if the goal is met or fails.\n\
             5. MAX PAGES: Do not exceed {max_steps}.\n\
             \n\
             Write storyText, educationalFact and question in {language}. Write imagePrompt in English.\n\
             Return ONLY JSON.",
            topic = self.config.topic(),
            language = self.config.language(),
            style = style,
            context = context,
            max_steps = self.config.max_steps(),
        )
    }

    /// User turn for step `step` of the story.
    pub fn step_turn(&self, step: usize, choice: &str) -> String {
        format!(
            "Step: {}/{}. User input: {}",
            step,
            self.config.max_steps(),
            choice
        )
    }

    /// Full request for the next step.
    ///
    /// The summary is the latest page's, or the placeholder before the first
    /// page. Images of the last `image_window` pages follow the user turn;
    /// pages without an image contribute nothing.
    pub fn step_request(
        &self,
        themes: &ThemeSet,
        state: &StoryState,
        choice: &str,
        image_window: usize,
    ) -> GenerateRequest {
        let step = state.step_number() + 1;
        let summary = state.latest_summary().unwrap_or(SUMMARY_PLACEHOLDER);

        let mut content = vec![Input::Text(self.step_turn(step, choice))];
        content.extend(
            state
                .recent_images(image_window)
                .into_iter()
                .cloned()
                .map(Input::Image),
        );

        debug!(step, images = content.len() - 1, "Built step request");
        GenerateRequest {
            system_instruction: self.step_instruction(themes, summary),
            content,
            response_schema: Some(StepResponse::schema()),
        }
    }

    /// Image prompt derived from the step's `imagePrompt`.
    pub fn image_prompt(&self, image_prompt: &str) -> String {
        format!(
            "{} in {} style. Detailed, consistent characters, full scene.",
            image_prompt.trim(),
            self.config.art_style()
        )
    }
}
