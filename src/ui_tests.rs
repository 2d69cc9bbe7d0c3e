use crate::app::App;
use crate::config::Config;
use crate::controller::QuizController;
use crate::db::MemoryStore;
use crate::dispatch::{DispatchError, Dispatcher, RemotePayload, RemoteSink, UnconfiguredSink};
use crate::models::{DispatchStatus, QuizState, QuizStatus};
use crate::questions::QUESTIONS;
use crate::review::ReviewSummary;
use crate::session::{handle_key, Flow};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Default)]
struct CountingSink {
    attempts: AtomicUsize,
}

#[async_trait]
impl RemoteSink for CountingSink {
    async fn submit(&self, _payload: &RemotePayload) -> Result<(), DispatchError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_config(dir: &std::path::Path) -> Config {
    Config::from_lookup(|key| match key {
        "QUIZ_DATA_DIR" => Some(dir.display().to_string()),
        _ => None,
    })
}

fn app_with_sink(sink: Arc<dyn RemoteSink>, dir: &std::path::Path) -> App {
    App::new(
        test_config(dir),
        QuizController::new(QUESTIONS.clone()),
        Dispatcher::new(sink).unwrap(),
        Box::new(MemoryStore::new()),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) -> Flow {
    handle_key(app, key(code), Instant::now())
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn sign_in(app: &mut App) {
    type_text(app, "Ana Pérez");
    press(app, KeyCode::Tab);
    type_text(app, "0912345678");
    press(app, KeyCode::Enter);
}

/// Answers the current question through the two-step key flow.
fn answer(app: &mut App, option: usize) {
    press(app, KeyCode::Char(char::from_digit(option as u32 + 1, 10).unwrap()));
    press(app, KeyCode::Enter);
}

fn answer_all(app: &mut App, correct: usize) {
    for i in 0..QUESTIONS.len() {
        let q = &QUESTIONS[i];
        let option = if i < correct {
            q.correct_option
        } else {
            (q.correct_option + 1) % 4
        };
        answer(app, option);
    }
}

fn render(app: &App) -> String {
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_sign_in_starts_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);

    assert_eq!(app.status(), QuizStatus::Playing);
    let user = app.controller.state().user.clone().unwrap();
    assert_eq!(user.name, "Ana Pérez");
    assert_eq!(user.id_number, "0912345678");
    assert_eq!(app.dispatch_status(), DispatchStatus::Idle);
}

#[test]
fn test_empty_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "0912345678");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.status(), QuizStatus::Welcome);
    assert_eq!(app.controller.state(), &QuizState::initial());
    assert!(app.welcome.error.is_some());
    assert!(render(&app).contains("please fill in all required fields"));
}

#[test]
fn test_wrong_admin_password_stays_on_welcome() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    press(&mut app, KeyCode::F(2));
    type_text(&mut app, "guess");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.status(), QuizStatus::Welcome);
    let prompt = app.welcome.admin_prompt.as_ref().unwrap();
    assert_eq!(prompt.error.as_deref(), Some("incorrect password"));
    assert!(prompt.input.is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(app.welcome.admin_prompt.is_none());
    assert_eq!(app.status(), QuizStatus::Welcome);
}

#[test]
fn test_admin_login_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    press(&mut app, KeyCode::F(2));
    type_text(&mut app, "admin123");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status(), QuizStatus::Admin);
    assert!(render(&app).contains("No results recorded yet."));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.status(), QuizStatus::Welcome);
    assert_eq!(app.controller.state(), &QuizState::initial());
}

#[test]
fn test_arrow_navigation_and_lock() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.quiz_view.cursor, 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.quiz_view.locked, Some(1));
    // Locked choices cannot be changed
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.quiz_view.locked, Some(1));
    assert!(app.controller.state().answers.is_empty());

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.controller.state().answers.len(), 1);
    assert_eq!(app.controller.state().current_question_index, 1);
    assert!(app.quiz_view.locked.is_none());
    assert_eq!(app.quiz_view.cursor, 0);
}

#[test]
fn test_cursor_stays_in_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.quiz_view.cursor, 0);
    for _ in 0..10 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.quiz_view.cursor, 3);
    press(&mut app, KeyCode::Char('9'));
    assert!(app.quiz_view.locked.is_none());
}

#[test]
fn test_full_run_dispatches_once() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(CountingSink::default());
    let mut app = app_with_sink(sink.clone(), dir.path());
    sign_in(&mut app);
    answer_all(&mut app, 20);

    assert_eq!(app.status(), QuizStatus::Finished);
    assert_eq!(app.controller.state().score, 20);
    assert_eq!(app.last_result.as_ref().unwrap().score, 20);
    assert_eq!(
        app.dispatcher.wait_for_outcome(Duration::from_secs(5)),
        DispatchStatus::Success
    );

    // Further events on the result screen must not dispatch again.
    app.on_timer(Instant::now() + Duration::from_secs(60));
    app.poll_dispatch();
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(ReviewSummary::load(app.store()).count(), 1);
    assert!(render(&app).contains("Result saved successfully"));
}

#[test]
fn test_nineteen_of_twenty() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(CountingSink::default()), dir.path());
    sign_in(&mut app);
    answer_all(&mut app, 19);

    let result = app.last_result.clone().unwrap();
    assert_eq!(result.score, 19);
    assert_eq!(result.total_questions, 20);
    let screen = render(&app);
    assert!(screen.contains("19 / 20"));
    assert!(screen.contains("95%"));
    assert!(screen.contains("Correct: 19    Incorrect: 1"));
    assert!(screen.contains("Results - Ana Pérez (0912345678)"));
}

#[test]
fn test_timeout_finishes_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    let start = Instant::now();
    type_text(&mut app, "Ana");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "1");
    handle_key(&mut app, key(KeyCode::Enter), start);

    for i in 0..15 {
        answer(&mut app, QUESTIONS[i].correct_option);
    }
    app.on_timer(start + Duration::from_secs(1200));

    let state = app.controller.state();
    assert_eq!(state.status, QuizStatus::Finished);
    assert_eq!(state.answers.len(), 20);
    assert_eq!(state.score, 15);
    let result = app.last_result.clone().unwrap();
    assert_eq!(result.time_spent_secs, 1200);
    assert_eq!(
        app.dispatcher.wait_for_outcome(Duration::from_secs(5)),
        DispatchStatus::Error
    );
    assert_eq!(ReviewSummary::load(app.store()).count(), 1);
}

#[test]
fn test_restart_resets_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    answer_all(&mut app, 3);
    app.dispatcher.wait_for_outcome(Duration::from_secs(5));

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.controller.state(), &QuizState::initial());
    assert_eq!(app.dispatch_status(), DispatchStatus::Idle);
    assert!(app.last_result.is_none());
}

#[test]
fn test_share_popup_toggles() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    answer_all(&mut app, 20);

    press(&mut app, KeyCode::Char('s'));
    assert!(app.show_share);
    assert!(render(&app).contains("Score: 20/20 (100%)"));
    press(&mut app, KeyCode::Char('x'));
    assert!(!app.show_share);
    assert_eq!(app.status(), QuizStatus::Finished);
}

#[test]
fn test_admin_export_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    answer_all(&mut app, 12);
    app.dispatcher.wait_for_outcome(Duration::from_secs(5));
    press(&mut app, KeyCode::Char('r'));

    press(&mut app, KeyCode::F(2));
    type_text(&mut app, "admin123");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.review.count(), 1);
    assert!(render(&app).contains("Ana Pérez"));

    press(&mut app, KeyCode::Char('e'));
    let exported: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("quiz_results_"))
        .collect();
    assert_eq!(exported.len(), 1);

    press(&mut app, KeyCode::Char('d'));
    assert!(app.admin_view.confirm_clear);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.review.count(), 1);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert!(app.review.is_empty());
    assert!(ReviewSummary::load(app.store()).is_empty());
    assert!(app.export_results().is_none());

    press(&mut app, KeyCode::Char('d'));
    assert!(!app.admin_view.confirm_clear);
}

#[test]
fn test_ctrl_c_quits_from_any_screen() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    let flow = handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn test_quiz_screen_shows_clock() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_with_sink(Arc::new(UnconfiguredSink), dir.path());
    sign_in(&mut app);
    let screen = render(&app);
    assert!(screen.contains("Question 1 / 20"));
    assert!(screen.contains("20:00"));
}
