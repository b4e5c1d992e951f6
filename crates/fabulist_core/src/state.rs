//! Append-only story state.

use crate::{ImageData, Page};
use serde::Serialize;

/// Pages produced so far plus the flags governing the next action.
///
/// Invariants:
/// - `pages` only grows, and committed pages are never modified
/// - `current_page_index < pages.len()` whenever pages exist, else 0
/// - `is_game_over` never goes from true back to false
///
/// # Examples
///
/// ```
/// use fabulist_core::{Page, StoryState};
///
/// let mut state = StoryState::default();
/// state.begin_attempt();
/// assert!(*state.is_loading());
///
/// let page = Page::builder()
///     .story_text("Once upon a time")
///     .educational_fact("Owls can rotate their heads 270 degrees.")
///     .choice("Start the story.")
///     .updated_summary("The tale begins.")
///     .build()
///     .unwrap();
///
/// let step = state.commit_page(page, 10, false);
/// assert_eq!(step, 1);
/// assert!(!*state.is_loading());
/// assert!(!*state.is_game_over());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct StoryState {
    /// Committed pages in order.
    pages: Vec<Page>,
    /// Page currently shown.
    current_page_index: usize,
    /// Whether the story has ended.
    is_game_over: bool,
    /// Whether an operation is in flight.
    is_loading: bool,
    /// User-facing message from the last failed attempt.
    last_error: Option<String>,
}

impl StoryState {
    /// Mark an operation as in flight and clear the previous error.
    pub fn begin_attempt(&mut self) {
        self.is_loading = true;
        self.last_error = None;
    }

    /// End an in-flight operation without committing anything.
    pub fn fail_attempt(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.last_error = Some(message.into());
    }

    /// Append a page, show it and evaluate termination.
    ///
    /// The story ends when it had already ended, when the service flagged
    /// the ending, or when the page count reaches `max_steps`. Returns the
    /// step number of the new page.
    pub fn commit_page(&mut self, page: Page, max_steps: u32, service_game_over: bool) -> usize {
        self.pages.push(page);
        self.current_page_index = self.pages.len() - 1;
        self.is_loading = false;
        self.last_error = None;

        let step_number = self.pages.len();
        self.is_game_over =
            self.is_game_over || service_game_over || step_number >= max_steps as usize;
        step_number
    }

    /// Number of committed pages, which is also the last step number.
    pub fn step_number(&self) -> usize {
        self.pages.len()
    }

    /// The page currently shown.
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page_index)
    }

    /// The most recently committed page.
    pub fn last_page(&self) -> Option<&Page> {
        self.pages.last()
    }

    /// Summary written by the most recent page.
    pub fn latest_summary(&self) -> Option<&str> {
        self.pages.last().map(|p| p.updated_summary().as_str())
    }

    /// Images of the last `window` pages, oldest first. Pages without an
    /// image contribute nothing.
    pub fn recent_images(&self, window: usize) -> Vec<&ImageData> {
        let start = self.pages.len().saturating_sub(window);
        self.pages[start..]
            .iter()
            .filter_map(|p| p.image().as_ref())
            .collect()
    }

    /// Show the previous page. Returns the new index.
    pub fn previous_page(&mut self) -> usize {
        self.current_page_index = self.current_page_index.saturating_sub(1);
        self.current_page_index
    }

    /// Show the next page. Returns the new index.
    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page_index.saturating_add(1))
    }

    /// Show the page at `index`, clamped to the committed range.
    pub fn go_to_page(&mut self, index: usize) -> usize {
        self.current_page_index = index.min(self.pages.len().saturating_sub(1));
        self.current_page_index
    }

    /// `(pages so far, page cap)` for "Step N of M" displays.
    pub fn progress(&self, max_steps: u32) -> (usize, u32) {
        (self.pages.len(), max_steps)
    }

    /// Educational facts collected so far, in page order.
    pub fn facts(&self) -> Vec<&str> {
        self.pages
            .iter()
            .map(|p| p.educational_fact().as_str())
            .collect()
    }
}
