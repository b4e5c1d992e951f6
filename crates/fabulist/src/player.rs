//! Terminal presentation of a story: reader commands, page rendering and
//! illustration export.

use fabulist_core::{ImageData, Page, StoryState};
use fabulist_narrative::{StoryPhase, StorySession};
use std::path::{Path, PathBuf};
use tracing::info;

/// One line of reader input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// `:prev`
    Previous,
    /// `:next`
    Next,
    /// `:restart`
    Restart,
    /// `:quit`
    Quit,
    /// `:help`
    Help,
    /// A command starting with `:` that is not recognized
    Unknown(String),
    /// Anything else is a story choice
    Choice(String),
}

impl PlayerCommand {
    /// Interpret a line typed by the reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabulist::player::PlayerCommand;
    ///
    /// assert_eq!(PlayerCommand::parse(" :PREV "), PlayerCommand::Previous);
    /// assert_eq!(
    ///     PlayerCommand::parse("Open the door"),
    ///     PlayerCommand::Choice("Open the door".to_string())
    /// );
    /// ```
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return PlayerCommand::Choice(trimmed.to_string());
        };
        match command.to_ascii_lowercase().as_str() {
            "prev" | "p" => PlayerCommand::Previous,
            "next" | "n" => PlayerCommand::Next,
            "restart" | "r" => PlayerCommand::Restart,
            "quit" | "q" | "exit" => PlayerCommand::Quit,
            "help" | "h" | "?" => PlayerCommand::Help,
            _ => PlayerCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Help text listing the reader commands.
pub const HELP: &str = "Type what you do next, or one of:\n  \
                        :prev     show the previous page\n  \
                        :next     show the next page\n  \
                        :restart  start over with the same settings\n  \
                        :quit     leave the story";

/// `Page N of M` header.
pub fn progress_line(page_number: usize, max_steps: u32) -> String {
    format!("Page {} of {}", page_number, max_steps)
}

/// Render a page for the terminal.
///
/// `page_number` is one-based.
pub fn render_page(page: &Page, page_number: usize, max_steps: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("── {} ──\n", progress_line(page_number, max_steps)));
    if page_number > 1 {
        out.push_str(&format!("> {}\n\n", page.choice()));
    }
    out.push_str(page.story_text().trim());
    out.push_str("\n\n");
    out.push_str(&format!("Did you know? {}\n", page.educational_fact().trim()));
    if !page.question().trim().is_empty() {
        out.push_str(&format!("\n{}\n", page.question().trim()));
    }
    out
}

/// Render the page currently shown in `session`, or nothing before the
/// first page.
///
/// Right-to-left languages are wrapped in an embedding so terminals that
/// honor bidi controls lay the text out correctly.
pub fn render_current(session: &StorySession) -> Option<String> {
    let state = session.state();
    let page = state.current_page()?;
    let rendered = render_page(
        page,
        state.current_page_index() + 1,
        *session.config().max_steps(),
    );
    if session.config().language().is_right_to_left() {
        Some(format!("{}{}{}", RTL_EMBEDDING, rendered, POP_DIRECTIONAL))
    } else {
        Some(rendered)
    }
}

const RTL_EMBEDDING: char = '\u{202B}';
const POP_DIRECTIONAL: char = '\u{202C}';

/// Closing text once the story is over, listing every fact learned.
pub fn render_ending(state: &StoryState) -> String {
    let mut out = String::from("The End.\n");
    let facts = state.facts();
    if !facts.is_empty() {
        out.push_str("\nWhat you learned along the way:\n");
        for (i, fact) in facts.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, fact.trim()));
        }
    }
    out
}

/// Prompt shown before reading the next line.
pub fn prompt_for(session: &StorySession) -> &'static str {
    match session.phase() {
        StoryPhase::Complete => "(browse with :prev/:next, :restart or :quit) ",
        StoryPhase::Failed => "(the story could not begin; :restart or :quit) ",
        StoryPhase::NotStarted => "(:restart to begin, or :quit) ",
        _ if !session.accepts_choice() => "(:next returns to the latest page) ",
        _ => "What do you do? ",
    }
}

/// File name for the illustration of page `page_number`.
pub fn image_file_name(page_number: usize, image: &ImageData) -> String {
    format!("page-{:02}.{}", page_number, image.extension())
}

/// Write the illustration of page `page_number` into `dir`.
///
/// Creates the directory if needed and returns the written path.
pub fn save_page_image(
    dir: &Path,
    page_number: usize,
    image: &ImageData,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(image_file_name(page_number, image));
    std::fs::write(&path, image.bytes())?;
    info!(path = %path.display(), bytes = image.bytes().len(), "Saved illustration");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, question: &str) -> Page {
        Page::builder()
            .story_text(format!("  Story {}  ", n))
            .educational_fact(format!("Fact {}", n))
            .question(question)
            .choice(format!("Choice {}", n))
            .updated_summary("summary")
            .build()
            .unwrap()
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(PlayerCommand::parse(":next"), PlayerCommand::Next);
        assert_eq!(PlayerCommand::parse(":Restart"), PlayerCommand::Restart);
        assert_eq!(PlayerCommand::parse(":q"), PlayerCommand::Quit);
        assert_eq!(PlayerCommand::parse(":?"), PlayerCommand::Help);
        assert_eq!(
            PlayerCommand::parse(":dance"),
            PlayerCommand::Unknown(":dance".to_string())
        );
    }

    #[test]
    fn blank_line_is_an_empty_choice() {
        assert_eq!(PlayerCommand::parse("   \n"), PlayerCommand::Choice(String::new()));
    }

    #[test]
    fn first_page_omits_choice_line() {
        let rendered = render_page(&page(1, "Where now?"), 1, 5);
        assert!(rendered.starts_with("── Page 1 of 5 ──\n"));
        assert!(!rendered.contains("> Choice 1"));
        assert!(rendered.contains("Story 1\n"));
        assert!(rendered.contains("Did you know? Fact 1"));
        assert!(rendered.ends_with("Where now?\n"));
    }

    #[test]
    fn later_pages_echo_the_choice() {
        let rendered = render_page(&page(3, ""), 3, 5);
        assert!(rendered.contains("> Choice 3\n"));
        assert!(rendered.ends_with("Did you know? Fact 3\n"));
    }

    #[test]
    fn ending_lists_facts_in_order() {
        let mut state = StoryState::default();
        state.commit_page(page(1, ""), 2, false);
        state.commit_page(page(2, ""), 2, false);

        let ending = render_ending(&state);
        assert!(ending.starts_with("The End."));
        let first = ending.find("1. Fact 1").unwrap();
        let second = ending.find("2. Fact 2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn nothing_to_render_before_first_page() {
        let config = fabulist_core::StoryConfig::builder()
            .topic("Owls")
            .build()
            .unwrap();
        let session = StorySession::new(config);
        assert!(render_current(&session).is_none());
        assert_eq!(prompt_for(&session), "(:restart to begin, or :quit) ");
    }

    #[test]
    fn saves_illustration_with_numbered_name() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("pictures");
        let image = ImageData::new("image/png", vec![0x89, b'P', b'N', b'G']);

        let path = save_page_image(&target, 4, &image)?;

        assert_eq!(path, target.join("page-04.png"));
        assert_eq!(std::fs::read(&path)?, vec![0x89, b'P', b'N', b'G']);
        Ok(())
    }
}
