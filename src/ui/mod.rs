pub mod layout;
mod admin;
mod dates;
mod quiz;
mod summary;
mod welcome;

use crate::app::App;
use crate::models::QuizStatus;
use ratatui::Frame;

pub use admin::{draw_admin, draw_clear_confirmation};
pub use layout::{calculate_admin_chunks, calculate_quiz_chunks, centered_rect};
pub use quiz::draw_quiz;
pub use dates::format_result_date;
pub use summary::draw_summary;
pub use welcome::draw_welcome;

pub fn draw(f: &mut Frame, app: &App) {
    match app.status() {
        QuizStatus::Welcome => draw_welcome(f, &app.welcome),
        QuizStatus::Playing => draw_quiz(f, app),
        QuizStatus::Finished => draw_summary(f, app),
        QuizStatus::Admin => draw_admin(f, app),
    }
}
