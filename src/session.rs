use crate::app::App;
use crate::models::QuizStatus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    match app.status() {
        QuizStatus::Welcome => handle_welcome_input(app, key, now),
        QuizStatus::Playing => {
            handle_quiz_input(app, key);
            Flow::Continue
        }
        QuizStatus::Finished => handle_result_input(app, key),
        QuizStatus::Admin => {
            handle_admin_input(app, key);
            Flow::Continue
        }
    }
}

pub fn handle_welcome_input(app: &mut App, key: KeyEvent, now: Instant) -> Flow {
    if app.welcome.admin_prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.close_admin_prompt(),
            KeyCode::Enter => {
                let _ = app.attempt_admin_login();
            }
            KeyCode::Backspace => {
                if let Some(prompt) = app.welcome.admin_prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = app.welcome.admin_prompt.as_mut() {
                    prompt.input.push(c);
                    prompt.error = None;
                }
            }
            _ => {}
        }
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::F(2) => app.open_admin_prompt(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.welcome.toggle_focus();
        }
        KeyCode::Enter => {
            let _ = app.start_quiz(now);
        }
        KeyCode::Backspace => {
            app.welcome.focused_input().pop();
            app.welcome.error = None;
        }
        KeyCode::Char(c) => {
            app.welcome.focused_input().push(c);
            app.welcome.error = None;
        }
        _ => {}
    }
    Flow::Continue
}

/// Options are chosen in two steps: the first Enter (or a digit key) locks
/// the choice and reveals the feedback, the next Enter moves on.
pub fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    let option_count = app
        .controller
        .current_question()
        .map(|q| q.options.len())
        .unwrap_or(0);
    if option_count == 0 {
        return;
    }

    if let Some(locked) = app.quiz_view.locked {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right)
            && let Err(e) = app.submit_answer(locked)
        {
            tracing::warn!(error = %e, "answer rejected");
        }
        return;
    }

    let view = &mut app.quiz_view;
    match key.code {
        KeyCode::Up => {
            view.cursor = view.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if view.cursor < option_count - 1 {
                view.cursor += 1;
            }
        }
        KeyCode::Enter => {
            view.locked = Some(view.cursor);
        }
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10)
                && digit >= 1
                && (digit as usize) <= option_count
            {
                view.cursor = digit as usize - 1;
                view.locked = Some(view.cursor);
            }
        }
        _ => {}
    }
}

pub fn handle_result_input(app: &mut App, key: KeyEvent) -> Flow {
    if app.show_share {
        app.show_share = false;
        return Flow::Continue;
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.restart(),
        KeyCode::Char('s') => app.show_share = true,
        KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
        _ => {}
    }
    Flow::Continue
}

pub fn handle_admin_input(app: &mut App, key: KeyEvent) {
    if app.admin_view.confirm_clear {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_clear(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_clear(false),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.exit_admin(),
        KeyCode::Char('e') => {
            app.export_results();
        }
        KeyCode::Char('d') => app.request_clear(),
        KeyCode::Char('r') => app.refresh_review(),
        KeyCode::Up => {
            app.admin_view.selected_row = app.admin_view.selected_row.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.admin_view.selected_row + 1 < app.review.count() {
                app.admin_view.selected_row += 1;
            }
        }
        _ => {}
    }
}
