//! Test utilities for Fabulist engine tests.
//!
//! This module provides mock drivers and canned service payloads.

#![allow(dead_code)]

pub mod mock_drivers;

#[allow(unused_imports)]
pub use mock_drivers::{ImageBehavior, MockBehavior, MockImageClient, MockResponse, MockTextClient};

use fabulist_core::StoryConfig;
use fabulist_dispatch::RetryDispatcher;
use fabulist_narrative::StoryEngine;
use serde_json::json;

/// Engine type used throughout the tests.
pub type TestEngine = StoryEngine<MockTextClient, MockImageClient>;

/// Initialization payload, wrapped in a json code fence the way the
/// service sometimes returns it.
pub fn theme_json() -> String {
    let body = json!({
        "themes": ["Courage", "Curiosity", "Kindness", "Patience", "Honesty"],
        "storyEndingGoal": "Return the lost star to the sky",
        "visualBrief": "A small fox with a blue scarf"
    });
    format!("```json\n{}\n```", body)
}

/// Step payload for page `n`.
pub fn step_json(n: usize, game_over: bool) -> String {
    json!({
        "storyText": format!("Page {} text", n),
        "educationalFact": format!("Fact {}", n),
        "question": format!("What next after {}?", n),
        "imagePrompt": format!("Scene {}", n),
        "isGameOver": game_over,
        "updatedSummary": format!("Summary {}", n)
    })
    .to_string()
}

/// Step payload without the `imagePrompt` field.
pub fn step_json_without_image_prompt(n: usize) -> String {
    json!({
        "storyText": format!("Page {} text", n),
        "educationalFact": format!("Fact {}", n),
        "isGameOver": false,
        "updatedSummary": format!("Summary {}", n)
    })
    .to_string()
}

/// Themes followed by `steps` ordinary pages.
pub fn story_script(steps: usize) -> Vec<MockResponse> {
    let mut script = vec![MockResponse::Success(theme_json())];
    script.extend((1..=steps).map(|n| MockResponse::Success(step_json(n, false))));
    script
}

/// Story configuration with the given page cap.
pub fn config(max_steps: u32) -> StoryConfig {
    StoryConfig::builder()
        .topic("The night sky")
        .max_steps(max_steps)
        .build()
        .expect("valid test configuration")
}

/// Engine with the default retry policy.
pub fn engine(max_steps: u32, text: MockTextClient, image: MockImageClient) -> TestEngine {
    StoryEngine::new(config(max_steps), text, image, RetryDispatcher::default())
}
