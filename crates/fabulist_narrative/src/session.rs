//! The story session and its read-only handle.

use fabulist_core::{Page, StoryConfig, StoryState, ThemeSet};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Where a story is in its lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
pub enum StoryPhase {
    /// Configured, nothing generated yet
    #[display("not started")]
    NotStarted,
    /// Generating themes and the ending goal
    #[display("initializing")]
    Initializing,
    /// A page is being generated
    #[display("generating")]
    GeneratingStep,
    /// Waiting for the reader's next choice
    #[display("awaiting choice")]
    AwaitingChoice,
    /// The story has ended; browsing only
    #[display("complete")]
    Complete,
    /// Initialization failed before the first page; restart required
    #[display("failed")]
    Failed,
}

/// Everything one story owns: configuration, themes, pages and phase.
///
/// Only the engine mutates a session. Everyone else reads snapshots through
/// a [`StoryHandle`].
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct StorySession {
    pub(crate) config: StoryConfig,
    pub(crate) themes: Option<ThemeSet>,
    pub(crate) state: StoryState,
    pub(crate) phase: StoryPhase,
}

impl StorySession {
    /// A fresh session for `config`.
    pub fn new(config: StoryConfig) -> Self {
        Self {
            config,
            themes: None,
            state: StoryState::default(),
            phase: StoryPhase::NotStarted,
        }
    }

    /// The page currently shown.
    pub fn current_page(&self) -> Option<&Page> {
        self.state.current_page()
    }

    /// `(pages so far, page cap)`.
    pub fn progress(&self) -> (usize, u32) {
        self.state.progress(*self.config.max_steps())
    }

    /// Whether the shown page is the newest one and the story continues,
    /// i.e. whether a choice can be entered now.
    pub fn accepts_choice(&self) -> bool {
        self.phase == StoryPhase::AwaitingChoice
            && !*self.state.is_loading()
            && self.state.step_number() > 0
            && *self.state.current_page_index() + 1 == self.state.step_number()
    }
}

pub(crate) type SharedSession = Arc<RwLock<StorySession>>;

pub(crate) fn read(session: &SharedSession) -> RwLockReadGuard<'_, StorySession> {
    session.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write(session: &SharedSession) -> RwLockWriteGuard<'_, StorySession> {
    session.write().unwrap_or_else(PoisonError::into_inner)
}

/// Read-only view of a session owned by a [`StoryEngine`](crate::StoryEngine).
///
/// Cheap to clone; every read takes a short lock and never blocks across
/// generation calls.
#[derive(Debug, Clone)]
pub struct StoryHandle {
    session: SharedSession,
}

impl StoryHandle {
    pub(crate) fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// Copy of the whole session.
    pub fn snapshot(&self) -> StorySession {
        read(&self.session).clone()
    }

    /// Current phase.
    pub fn phase(&self) -> StoryPhase {
        read(&self.session).phase
    }

    /// Whether an operation is in flight.
    pub fn is_loading(&self) -> bool {
        *read(&self.session).state.is_loading()
    }

    /// Number of committed pages.
    pub fn page_count(&self) -> usize {
        read(&self.session).state.step_number()
    }

    /// Run `f` against the session under a read lock.
    pub fn with<R>(&self, f: impl FnOnce(&StorySession) -> R) -> R {
        f(&read(&self.session))
    }
}
