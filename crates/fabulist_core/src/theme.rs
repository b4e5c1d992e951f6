//! Story themes fixed at initialization.

use serde::Serialize;

/// Themes, ending goal and visual brief chosen once per story.
///
/// # Examples
///
/// ```
/// use fabulist_core::ThemeSet;
///
/// let themes = ThemeSet::new(
///     vec!["Courage".to_string(), "Curiosity".to_string()],
///     "Reach the summit",
///     Some("A red-haired girl in a yellow raincoat".to_string()),
/// );
/// assert_eq!(themes.joined(), "Courage, Curiosity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct ThemeSet {
    /// Ordered theme strings.
    themes: Vec<String>,
    /// Where the story should end up.
    ending_goal: String,
    /// English description keeping characters visually consistent.
    visual_brief: Option<String>,
}

impl ThemeSet {
    /// Create a theme set.
    pub fn new(
        themes: Vec<String>,
        ending_goal: impl Into<String>,
        visual_brief: Option<String>,
    ) -> Self {
        Self {
            themes,
            ending_goal: ending_goal.into(),
            visual_brief: visual_brief.filter(|b| !b.trim().is_empty()),
        }
    }

    /// Themes joined for inclusion in an instruction.
    pub fn joined(&self) -> String {
        self.themes.join(", ")
    }
}
