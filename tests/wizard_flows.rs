//! Keyboard-driven walks through each workflow against the mock API client.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use postdeck::app::{App, Screen};
use postdeck::config::AppConfig;
use postdeck::workflows::WorkflowKind;

fn mock_app() -> App {
    App::new(AppConfig::default(), true)
}

async fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).await;
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

#[tokio::test]
async fn quick_post_publishes_in_three_steps() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::QuickPost);

    type_text(&mut app, "Ship day").await;
    press(&mut app, KeyCode::Tab).await;
    type_text(&mut app, "We just shipped v2!").await;
    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 2);
    assert_eq!(active.next_label(), "Publish to All Platforms NOW");

    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 3);
    assert_eq!(active.receipt().as_deref(), Some("post-mock-1"));
    assert!(active.hide_navigation());
}

#[tokio::test]
async fn ai_post_generates_a_draft_from_the_subject() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::AiPost);
    assert_eq!(app.active.as_ref().unwrap().next_label(), "Generate");

    type_text(&mut app, "Quarterly results recap").await;
    press(&mut app, KeyCode::Enter).await;

    // The generated draft is editable on step 2.
    assert_eq!(app.active.as_ref().unwrap().current_step(), 2);
    assert!(app.form.draft.content().contains("Quarterly results recap"));

    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 4);
    assert_eq!(active.receipt().as_deref(), Some("post-mock-1"));
}

#[tokio::test]
async fn ai_post_requires_a_subject_before_generating() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::AiPost);

    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 1);
    let message = active.message().unwrap();
    assert!(message.is_error);
    assert_eq!(message.text, "Subject is required");
}

#[tokio::test]
async fn manual_post_walks_all_six_steps() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::ManualPost);

    // 1: Compose
    type_text(&mut app, "Feature spotlight").await;
    press(&mut app, KeyCode::Tab).await;
    type_text(&mut app, "Deep dive into the new editor.").await;
    press(&mut app, KeyCode::Enter).await;

    // 2: Platforms
    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Enter).await;

    // 3: Formatting (optional)
    press(&mut app, KeyCode::Enter).await;

    // 4: Schedule — post immediately
    press(&mut app, KeyCode::Char('i')).await;
    press(&mut app, KeyCode::Enter).await;

    // 5: Review
    assert_eq!(app.active.as_ref().unwrap().current_step(), 5);
    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 6);
    assert_eq!(active.receipt().as_deref(), Some("post-mock-1"));
}

#[tokio::test]
async fn schedule_wizard_saves_after_seven_steps() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::Schedule);

    // 1: Subject — too short first, then long enough.
    type_text(&mut app, "Sale!").await;
    press(&mut app, KeyCode::Enter).await;
    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 1);
    assert_eq!(
        active.message().unwrap().text,
        "Subject must be at least 10 characters"
    );

    type_text(&mut app, " Everything must go").await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.active.as_ref().unwrap().current_step(), 2);

    // 2: Platforms
    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Enter).await;

    // 3: Formatting, 4: Media — both optional.
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;

    // 5: Schedule — rejected while empty, then one daily rule.
    assert_eq!(app.active.as_ref().unwrap().current_step(), 5);
    press(&mut app, KeyCode::Enter).await;
    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 5);
    assert_eq!(active.message().unwrap().text, "Schedule Required");

    type_text(&mut app, "09:30").await;
    press(&mut app, KeyCode::Char('d')).await;
    press(&mut app, KeyCode::Enter).await;

    // 6: Review
    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 6);
    assert_eq!(active.next_label(), "Save Schedule");
    press(&mut app, KeyCode::Enter).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 7);
    assert_eq!(active.receipt().as_deref(), Some("sched-mock-1"));
    assert!(active.hide_navigation());
}

#[tokio::test]
async fn media_enter_collects_urls_before_advancing() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::Schedule);

    type_text(&mut app, "Launch day announcement").await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.active.as_ref().unwrap().current_step(), 4);

    type_text(&mut app, "https://cdn.example.com/banner.png").await;
    press(&mut app, KeyCode::Enter).await;

    // The URL was collected; the step did not advance.
    assert_eq!(app.active.as_ref().unwrap().current_step(), 4);
    assert_eq!(app.form.media, vec!["https://cdn.example.com/banner.png"]);

    // An empty input advances past the step.
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.active.as_ref().unwrap().current_step(), 5);
}

#[tokio::test]
async fn review_digits_jump_back_to_earlier_steps() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::Schedule);

    type_text(&mut app, "Launch day announcement").await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char('i')).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.active.as_ref().unwrap().current_step(), 6);

    press(&mut app, KeyCode::Char('1')).await;

    let active = app.active.as_ref().unwrap();
    assert_eq!(active.current_step(), 1);
    // Entered values survive the jump.
    assert_eq!(app.form.subject.content(), "Launch day announcement");
}

#[tokio::test]
async fn escape_abandons_the_wizard() {
    let mut app = mock_app();
    app.start_workflow(WorkflowKind::ManualPost);
    type_text(&mut app, "Half-finished").await;

    press(&mut app, KeyCode::Esc).await;

    assert_eq!(app.screen, Screen::Home);
    assert!(app.active.is_none());
}
