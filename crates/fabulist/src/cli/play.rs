//! Interactive story command handler.

use super::PlayArgs;
use fabulist::player::{
    HELP, PlayerCommand, prompt_for, render_current, render_ending, save_page_image,
};
use fabulist::{
    FabulistConfig, FabulistResult, GeminiClient, ImagenClient, RetryDispatcher, StoryConfig,
    StoryEngine, StoryPhase,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

type GeminiEngine = StoryEngine<GeminiClient, ImagenClient>;

/// Terminal session around one story engine.
struct Player {
    engine: GeminiEngine,
    image_dir: Option<PathBuf>,
}

impl Player {
    /// Generate the opening page, or report why the story could not begin.
    async fn begin(&self) {
        println!("Dreaming up your story...");
        match self.engine.start().await {
            Ok(_) => self.show_latest(),
            Err(e) => {
                tracing::error!(error = %e, "Story could not start");
                eprintln!("Could not start the story: {}", e.user_message());
            }
        }
    }

    /// Submit a choice and show the page it produced.
    async fn choose(&self, choice: &str) {
        if !choice.trim().is_empty() {
            println!("Turning the page...");
        }
        match self.engine.submit(choice).await {
            Ok(_) => self.show_latest(),
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    /// Show the newest page, export its illustration, and close the book if
    /// the story just ended.
    fn show_latest(&self) {
        let session = self.engine.snapshot();
        let page_number = session.state().step_number();

        if let Some(page) = session.state().last_page() {
            match (page.image(), &self.image_dir) {
                (Some(image), Some(dir)) => match save_page_image(dir, page_number, image) {
                    Ok(path) => println!("(illustration saved to {})", path.display()),
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not save illustration");
                        eprintln!("Could not save the illustration: {}", e);
                    }
                },
                (None, _) => println!("(no illustration for this page)"),
                (Some(_), None) => {}
            }
        }

        self.show_current();
        if *session.phase() == StoryPhase::Complete {
            println!("{}", render_ending(session.state()));
        }
    }

    fn show_current(&self) {
        let session = self.engine.snapshot();
        if let Some(rendered) = render_current(&session) {
            println!("\n{}", rendered);
        }
    }

    fn prompt(&self) -> std::io::Result<()> {
        let session = self.engine.snapshot();
        print!("{}", prompt_for(&session));
        std::io::stdout().flush()
    }
}

/// Build the engine from configuration and arguments.
fn build_engine(args: &PlayArgs) -> FabulistResult<GeminiEngine> {
    let settings = match &args.config {
        Some(path) => FabulistConfig::from_file(path)?,
        None => FabulistConfig::load()?,
    };

    let config = StoryConfig::builder()
        .topic(args.topic.join(" "))
        .language(args.language)
        .art_style(args.art_style)
        .max_steps(args.max_pages)
        .extra_details(args.details.clone())
        .build()?;

    tracing::info!(
        topic = %config.topic(),
        language = %config.language(),
        art_style = %config.art_style(),
        max_steps = config.max_steps(),
        "Story configured"
    );

    Ok(StoryEngine::new(
        config,
        GeminiClient::from_config(&settings)?,
        ImagenClient::from_config(&settings)?,
        RetryDispatcher::new(settings.retry.clone()),
    ))
}

/// Play a story until the reader quits or input ends.
pub async fn play_story(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let player = Player {
        engine: build_engine(&args)?,
        image_dir: args.image_dir.clone(),
    };

    println!("{}\n", HELP);
    player.begin().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        player.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match PlayerCommand::parse(&line) {
            PlayerCommand::Quit => break,
            PlayerCommand::Help => println!("{}", HELP),
            PlayerCommand::Unknown(command) => {
                println!("Unknown command {}. Type :help for the list.", command)
            }
            PlayerCommand::Previous => {
                player.engine.previous_page();
                player.show_current();
            }
            PlayerCommand::Next => {
                player.engine.next_page();
                player.show_current();
            }
            PlayerCommand::Restart => match player.engine.restart() {
                Ok(()) => player.begin().await,
                Err(e) => eprintln!("{}", e.user_message()),
            },
            PlayerCommand::Choice(choice) => player.choose(&choice).await,
        }
    }

    let (pages, max_steps) = player.engine.progress();
    tracing::info!(pages, max_steps, "Leaving story");
    println!("Goodbye!");
    Ok(())
}
