//! The narrative progression engine.

use crate::context::{ContextBuilder, IMAGE_HISTORY_WINDOW, OPENING_ACTION};
use crate::session::{self, SharedSession, StoryHandle, StoryPhase, StorySession};
use crate::validation::{StepResponse, StructuredResponse, ThemeResponse};
use fabulist_core::{ImageData, ImageRequest, Page, StoryConfig, ThemeSet};
use fabulist_dispatch::RetryDispatcher;
use fabulist_error::{FabulistError, FabulistResult, StoryError, StoryErrorKind};
use fabulist_interface::{ImageDriver, TextDriver};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, instrument, warn};

/// Drives one story from configuration to its final page.
///
/// The engine owns the session and is the only writer. Operations take
/// `&self`; the loading flag, checked and set under the session's write
/// lock, admits at most one operation at a time and rejects the rest with
/// [`StoryErrorKind::StepInFlight`]. Locks are never held across a
/// generation call.
///
/// Lifecycle:
///
/// ```text
/// NotStarted -> Initializing -> GeneratingStep -> AwaitingChoice -> GeneratingStep ... -> Complete
///                    |                |
///                    +-> Failed <-----+ (first page only)
/// ```
pub struct StoryEngine<T: TextDriver, I: ImageDriver> {
    text: T,
    image: I,
    dispatcher: RetryDispatcher,
    session: SharedSession,
}

impl<T: TextDriver, I: ImageDriver> StoryEngine<T, I> {
    /// Create an engine for a new story.
    pub fn new(config: StoryConfig, text: T, image: I, dispatcher: RetryDispatcher) -> Self {
        debug!(
            text_provider = text.provider_name(),
            text_model = text.model_name(),
            image_provider = image.provider_name(),
            image_model = image.model_name(),
            "Creating story engine"
        );
        Self {
            text,
            image,
            dispatcher,
            session: Arc::new(RwLock::new(StorySession::new(config))),
        }
    }

    /// Read-only handle to the session.
    pub fn handle(&self) -> StoryHandle {
        StoryHandle::new(Arc::clone(&self.session))
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> StorySession {
        session::read(&self.session).clone()
    }

    /// Current phase.
    pub fn phase(&self) -> StoryPhase {
        session::read(&self.session).phase
    }

    /// The text-generation driver.
    pub fn text_driver(&self) -> &T {
        &self.text
    }

    /// The image-generation driver.
    pub fn image_driver(&self) -> &I {
        &self.image
    }

    /// Generate themes, then the first page.
    ///
    /// # Errors
    ///
    /// Rejected unless the story has not started yet. Any failure before
    /// the first page is committed leaves the story in
    /// [`StoryPhase::Failed`], and it must be restarted.
    #[instrument(skip(self))]
    pub async fn start(&self) -> FabulistResult<Page> {
        let config = {
            let mut session = session::write(&self.session);
            if *session.state.is_loading() {
                return Err(StoryError::new(StoryErrorKind::StepInFlight).into());
            }
            match session.phase {
                StoryPhase::NotStarted => {}
                StoryPhase::Failed => {
                    return Err(StoryError::new(StoryErrorKind::RestartRequired).into());
                }
                _ => return Err(StoryError::new(StoryErrorKind::AlreadyStarted).into()),
            }
            session.phase = StoryPhase::Initializing;
            session.state.begin_attempt();
            session.config.clone()
        };

        info!(topic = %config.topic(), max_steps = config.max_steps(), "Initializing story");

        let themes = match self.initialize_themes(&config).await {
            Ok(themes) => themes,
            Err(e) => return Err(self.fail_initialization(e)),
        };

        {
            let mut session = session::write(&self.session);
            session.themes = Some(themes.clone());
            session.phase = StoryPhase::GeneratingStep;
        }

        match self.generate_page(&config, &themes, OPENING_ACTION).await {
            Ok((page, service_game_over)) => Ok(self.commit(page, service_game_over)),
            Err(e) => Err(self.fail_initialization(e)),
        }
    }

    /// Generate the next page from the reader's choice.
    ///
    /// # Errors
    ///
    /// Empty input is rejected without calling any service. Also rejected
    /// while another operation is in flight, before the story starts, after
    /// it ends, or once initialization failed. A failed generation leaves
    /// the committed pages untouched, records the message as `last_error`,
    /// and the choice may be submitted again.
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub async fn submit(&self, input: &str) -> FabulistResult<Page> {
        let choice = input.trim();
        if choice.is_empty() {
            debug!("Rejecting empty choice");
            return Err(StoryError::new(StoryErrorKind::EmptyInput).into());
        }

        let (config, themes) = {
            let mut session = session::write(&self.session);
            if *session.state.is_loading() {
                return Err(StoryError::new(StoryErrorKind::StepInFlight).into());
            }
            if *session.state.is_game_over() {
                return Err(StoryError::new(StoryErrorKind::GameOver).into());
            }
            match session.phase {
                StoryPhase::AwaitingChoice => {}
                StoryPhase::NotStarted => {
                    return Err(StoryError::new(StoryErrorKind::NotStarted).into());
                }
                StoryPhase::Failed => {
                    return Err(StoryError::new(StoryErrorKind::RestartRequired).into());
                }
                StoryPhase::Complete => {
                    return Err(StoryError::new(StoryErrorKind::GameOver).into());
                }
                StoryPhase::Initializing | StoryPhase::GeneratingStep => {
                    return Err(StoryError::new(StoryErrorKind::StepInFlight).into());
                }
            }
            let Some(themes) = session.themes.clone() else {
                return Err(StoryError::new(StoryErrorKind::NotStarted).into());
            };
            session.phase = StoryPhase::GeneratingStep;
            session.state.begin_attempt();
            (session.config.clone(), themes)
        };

        match self.generate_page(&config, &themes, choice).await {
            Ok((page, service_game_over)) => Ok(self.commit(page, service_game_over)),
            Err(e) => {
                let mut session = session::write(&self.session);
                warn!(error = %e, pages = session.state.step_number(), "Story step failed");
                session.state.fail_attempt(e.user_message());
                session.phase = StoryPhase::AwaitingChoice;
                Err(e)
            }
        }
    }

    /// Discard everything and return to [`StoryPhase::NotStarted`] with the
    /// same configuration.
    ///
    /// # Errors
    ///
    /// Rejected while an operation is in flight.
    #[instrument(skip(self))]
    pub fn restart(&self) -> FabulistResult<()> {
        let mut session = session::write(&self.session);
        if *session.state.is_loading() {
            return Err(StoryError::new(StoryErrorKind::StepInFlight).into());
        }
        let config = session.config.clone();
        *session = StorySession::new(config);
        info!("Story restarted");
        Ok(())
    }

    /// Show the previous page. Returns the new index.
    pub fn previous_page(&self) -> usize {
        session::write(&self.session).state.previous_page()
    }

    /// Show the next page. Returns the new index.
    pub fn next_page(&self) -> usize {
        session::write(&self.session).state.next_page()
    }

    /// Show the page at `index`, clamped to the committed pages.
    pub fn go_to_page(&self, index: usize) -> usize {
        session::write(&self.session).state.go_to_page(index)
    }

    /// `(pages so far, page cap)`.
    pub fn progress(&self) -> (usize, u32) {
        session::read(&self.session).progress()
    }

    #[instrument(skip(self, config))]
    async fn initialize_themes(&self, config: &StoryConfig) -> FabulistResult<ThemeSet> {
        let request = ContextBuilder::new(config).theme_request();
        let response = self
            .dispatcher
            .execute("themes", || self.text.generate(&request))
            .await?;
        let themes: ThemeSet = ThemeResponse::validate(&response.text)?.into();
        info!(
            themes = themes.themes().len(),
            ending_goal = %themes.ending_goal(),
            "Story themes ready"
        );
        Ok(themes)
    }

    /// Text call, validation, then illustration. Nothing is committed here.
    #[instrument(skip(self, config, themes, choice))]
    async fn generate_page(
        &self,
        config: &StoryConfig,
        themes: &ThemeSet,
        choice: &str,
    ) -> FabulistResult<(Page, bool)> {
        let window = IMAGE_HISTORY_WINDOW.min(self.text.max_images_per_request());
        let request = {
            let session = session::read(&self.session);
            ContextBuilder::new(config).step_request(themes, &session.state, choice, window)
        };

        let response = self
            .dispatcher
            .execute("story_step", || self.text.generate(&request))
            .await?;
        let step = StepResponse::validate(&response.text)?;
        debug!(service_game_over = step.is_game_over(), "Step payload validated");

        let image = self.illustrate(config, step.image_prompt()).await;

        let page = Page::builder()
            .story_text(step.story_text().clone())
            .educational_fact(step.educational_fact().clone())
            .question(step.question().clone().unwrap_or_default())
            .image(image)
            .choice(choice)
            .updated_summary(step.updated_summary().clone())
            .build()?;

        Ok((page, *step.is_game_over()))
    }

    /// Request the page illustration. Failure only costs the image.
    async fn illustrate(&self, config: &StoryConfig, image_prompt: &str) -> Option<ImageData> {
        let request = ImageRequest {
            prompt: ContextBuilder::new(config).image_prompt(image_prompt),
        };
        match self
            .dispatcher
            .execute("illustration", || self.image.generate_image(&request))
            .await
        {
            Ok(response) => {
                if response.image.is_none() {
                    warn!("Image unavailable: service returned no image");
                }
                response.image
            }
            Err(e) => {
                warn!(error = %e, "Image unavailable");
                None
            }
        }
    }

    fn commit(&self, page: Page, service_game_over: bool) -> Page {
        let mut session = session::write(&self.session);
        let max_steps = *session.config.max_steps();
        let step = session
            .state
            .commit_page(page.clone(), max_steps, service_game_over);
        let game_over = *session.state.is_game_over();
        session.phase = if game_over {
            StoryPhase::Complete
        } else {
            StoryPhase::AwaitingChoice
        };
        info!(
            step,
            max_steps,
            game_over,
            has_image = page.image().is_some(),
            "Page committed"
        );
        page
    }

    fn fail_initialization(&self, e: FabulistError) -> FabulistError {
        let mut session = session::write(&self.session);
        error!(error = %e, "Story initialization failed");
        session.state.fail_attempt(e.user_message());
        session.phase = StoryPhase::Failed;
        e
    }
}
