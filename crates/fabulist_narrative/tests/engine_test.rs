//! Story step tests against scripted drivers.
//!
//! Time is paused so retry backoff elapses instantly.

mod test_utils;

use fabulist_core::Input;
use fabulist_error::{FabulistErrorKind, ServiceErrorKind, StoryErrorKind};
use fabulist_narrative::{OPENING_ACTION, StoryPhase, THEME_REQUEST};
use test_utils::{
    ImageBehavior, MockImageClient, MockResponse, MockTextClient, engine, step_json,
    step_json_without_image_prompt, story_script, theme_json,
};

fn story_error(err: &fabulist_error::FabulistError) -> Option<StoryErrorKind> {
    match err.kind() {
        FabulistErrorKind::Story(e) => Some(e.kind),
        _ => None,
    }
}

#[tokio::test(start_paused = true)]
async fn start_generates_themes_then_first_page() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(1)),
        MockImageClient::new(ImageBehavior::Image),
    );

    let page = engine.start().await?;

    assert_eq!(page.story_text(), "Page 1 text");
    assert_eq!(page.choice(), OPENING_ACTION);
    assert_eq!(page.question(), "What next after 1?");
    assert!(page.image().is_some());

    let requests = engine.text_driver().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].user_text(), THEME_REQUEST);
    assert_eq!(requests[1].user_text(), "Step: 1/10. User input: Start the story.");
    assert_eq!(requests[1].image_count(), 0);
    assert!(requests[1].system_instruction.contains("Return the lost star to the sky"));
    assert!(requests[1].system_instruction.contains("A small fox with a blue scarf"));

    assert_eq!(
        engine.image_driver().prompts(),
        vec!["Scene 1 in Watercolor style. Detailed, consistent characters, full scene."]
    );

    let session = engine.snapshot();
    assert_eq!(*session.phase(), StoryPhase::AwaitingChoice);
    assert_eq!(session.themes().as_ref().map(|t| t.themes().len()), Some(5));
    assert_eq!(session.state().step_number(), 1);
    assert!(!session.state().is_loading());
    assert!(session.accepts_choice());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn submit_appends_pages_without_rewriting_history() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(4)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;

    let mut previous = engine.snapshot().state().pages().clone();
    for (n, choice) in ["Open the door", "Climb the hill", "Ask the owl"].iter().enumerate() {
        let page = engine.submit(choice).await?;
        assert_eq!(page.choice(), choice);
        assert_eq!(page.story_text(), &format!("Page {} text", n + 2));

        let pages = engine.snapshot().state().pages().clone();
        assert_eq!(pages.len(), previous.len() + 1);
        assert_eq!(&pages[..previous.len()], &previous[..]);
        previous = pages;
    }

    let last = engine.text_driver().last_request().expect("a step request");
    assert_eq!(last.user_text(), "Step: 4/10. User input: Ask the owl");
    assert!(last.system_instruction.contains("Summary 3"));
    assert!(!last.system_instruction.contains("Page 1 text"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn choice_is_trimmed_before_use() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(2)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;

    let page = engine.submit("   Follow the river \n").await?;

    assert_eq!(page.choice(), "Follow the river");
    let last = engine.text_driver().last_request().expect("a step request");
    assert_eq!(last.user_text(), "Step: 2/10. User input: Follow the river");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn single_page_story_ends_on_first_page() -> anyhow::Result<()> {
    let engine = engine(
        1,
        MockTextClient::new_sequence(story_script(1)),
        MockImageClient::new(ImageBehavior::Image),
    );

    engine.start().await?;

    assert_eq!(engine.phase(), StoryPhase::Complete);
    assert!(*engine.snapshot().state().is_game_over());

    let calls = engine.text_driver().call_count();
    let err = engine.submit("Keep going").await.unwrap_err();
    assert_eq!(story_error(&err), Some(StoryErrorKind::GameOver));
    assert_eq!(engine.text_driver().call_count(), calls);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn story_ends_at_page_cap_even_if_service_continues() -> anyhow::Result<()> {
    let engine = engine(
        3,
        MockTextClient::new_sequence(story_script(3)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    engine.submit("Left").await?;
    assert_eq!(engine.phase(), StoryPhase::AwaitingChoice);

    engine.submit("Right").await?;

    assert_eq!(engine.phase(), StoryPhase::Complete);
    assert_eq!(engine.progress(), (3, 3));
    let last = engine.text_driver().last_request().expect("a step request");
    assert_eq!(last.user_text(), "Step: 3/3. User input: Right");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn service_can_end_story_early() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(vec![
            MockResponse::Success(theme_json()),
            MockResponse::Success(step_json(1, false)),
            MockResponse::Success(step_json(2, true)),
        ]),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;

    let page = engine.submit("Free the star").await?;

    assert_eq!(page.story_text(), "Page 2 text");
    assert!(page.image().is_some());
    assert_eq!(engine.phase(), StoryPhase::Complete);
    assert_eq!(engine.progress(), (2, 10));

    let err = engine.submit("Again").await.unwrap_err();
    assert_eq!(story_error(&err), Some(StoryErrorKind::GameOver));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn malformed_step_is_not_retried_and_commits_nothing() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(vec![
            MockResponse::Success(theme_json()),
            MockResponse::Success(step_json(1, false)),
            MockResponse::Success(step_json_without_image_prompt(2)),
            MockResponse::Success(step_json(2, false)),
        ]),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    let before = engine.snapshot();

    let err = engine.submit("Dive in").await.unwrap_err();

    assert!(err.is_malformed_response());
    assert!(err.user_message().contains("imagePrompt"));
    assert_eq!(engine.text_driver().call_count(), 3);
    assert_eq!(engine.image_driver().call_count(), 1);

    let after = engine.snapshot();
    assert_eq!(after.state().pages(), before.state().pages());
    assert!(!after.state().is_loading());
    assert!(after.state().last_error().is_some());
    assert_eq!(*after.phase(), StoryPhase::AwaitingChoice);

    // the same choice can be submitted again
    let page = engine.submit("Dive in").await?;
    assert_eq!(page.story_text(), "Page 2 text");
    assert!(engine.snapshot().state().last_error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_leave_pages_unchanged() -> anyhow::Result<()> {
    let outage = || MockResponse::Error(ServiceErrorKind::status(503, None));
    let engine = engine(
        10,
        MockTextClient::new_sequence(vec![
            MockResponse::Success(theme_json()),
            MockResponse::Success(step_json(1, false)),
            outage(),
            outage(),
            outage(),
            outage(),
            MockResponse::Success(step_json(2, false)),
        ]),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    let started = tokio::time::Instant::now();

    let err = engine.submit("Cross the bridge").await.unwrap_err();

    assert!(matches!(err.kind(), FabulistErrorKind::Service(_)));
    assert_eq!(engine.text_driver().call_count(), 2 + 4);
    assert!(started.elapsed() >= std::time::Duration::from_millis(1500 + 2250 + 3375));

    let session = engine.snapshot();
    assert_eq!(session.state().step_number(), 1);
    assert_eq!(session.state().last_error().as_deref(), Some("Server Error: 503"));
    assert!(!session.state().is_loading());
    assert!(session.accepts_choice());

    engine.submit("Cross the bridge").await?;
    assert_eq!(engine.snapshot().state().step_number(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn transient_failure_recovers_within_one_submit() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(vec![
            MockResponse::Success(theme_json()),
            MockResponse::Success(step_json(1, false)),
            MockResponse::Error(ServiceErrorKind::Transport("connection reset".into())),
            MockResponse::Success(step_json(2, false)),
        ]),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;

    let page = engine.submit("Wave hello").await?;

    assert_eq!(page.story_text(), "Page 2 text");
    assert_eq!(engine.text_driver().call_count(), 4);
    assert!(engine.snapshot().state().last_error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn missing_image_payload_still_commits_page() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(2)),
        MockImageClient::new(ImageBehavior::Empty),
    );

    let page = engine.start().await?;
    assert!(page.image().is_none());

    let page = engine.submit("Look around").await?;
    assert!(page.image().is_none());
    assert_eq!(engine.phase(), StoryPhase::AwaitingChoice);
    assert_eq!(engine.snapshot().state().step_number(), 2);

    let last = engine.text_driver().last_request().expect("a step request");
    assert_eq!(last.image_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failing_image_service_is_retried_then_ignored() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(1)),
        MockImageClient::new(ImageBehavior::Error(ServiceErrorKind::status(500, None))),
    );

    let page = engine.start().await?;

    assert!(page.image().is_none());
    assert_eq!(engine.image_driver().call_count(), 4);
    assert_eq!(engine.phase(), StoryPhase::AwaitingChoice);
    assert!(engine.snapshot().state().last_error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn step_requests_carry_at_most_three_recent_images() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(6)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    for choice in ["a", "b", "c", "d", "e"] {
        engine.submit(choice).await?;
    }

    let counts: Vec<usize> = engine
        .text_driver()
        .requests()
        .iter()
        .skip(1)
        .map(|r| r.image_count())
        .collect();
    assert_eq!(counts, vec![0, 1, 2, 3, 3, 3]);

    // the sixth step sees pages 3, 4 and 5 in order
    let requests = engine.text_driver().requests();
    let bytes: Vec<u8> = requests[6]
        .content
        .iter()
        .filter_map(|input| match input {
            Input::Image(image) => image.bytes().first().copied(),
            Input::Text(_) => None,
        })
        .collect();
    assert_eq!(bytes, vec![3, 4, 5]);
    assert!(matches!(requests[6].content[0], Input::Text(_)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_choice_is_rejected_without_calls() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(2)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    let calls = engine.text_driver().call_count();

    for input in ["", "   ", "\n\t"] {
        let err = engine.submit(input).await.unwrap_err();
        assert_eq!(story_error(&err), Some(StoryErrorKind::EmptyInput));
    }

    assert_eq!(engine.text_driver().call_count(), calls);
    assert_eq!(engine.snapshot().state().step_number(), 1);
    assert!(engine.snapshot().state().last_error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn browsing_does_not_change_pages() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(3)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    engine.submit("one").await?;
    engine.submit("two").await?;

    assert_eq!(engine.previous_page(), 1);
    assert_eq!(engine.previous_page(), 0);
    assert_eq!(engine.previous_page(), 0);
    assert!(!engine.snapshot().accepts_choice());
    assert_eq!(
        engine.snapshot().current_page().map(|p| p.story_text().clone()),
        Some("Page 1 text".to_string())
    );

    assert_eq!(engine.go_to_page(99), 2);
    assert_eq!(engine.next_page(), 2);
    assert!(engine.snapshot().accepts_choice());
    assert_eq!(engine.snapshot().state().step_number(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn new_page_becomes_current() -> anyhow::Result<()> {
    let engine = engine(
        10,
        MockTextClient::new_sequence(story_script(2)),
        MockImageClient::new(ImageBehavior::Image),
    );
    engine.start().await?;
    engine.go_to_page(0);

    engine.submit("onward").await?;

    assert_eq!(*engine.snapshot().state().current_page_index(), 1);
    Ok(())
}
