use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Time limit for one session, in seconds.
pub const QUIZ_DURATION: u32 = 20 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(rename = "idNumber")]
    pub id_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Welcome,
    Playing,
    Finished,
    Admin,
}

/// One slot of the answer log. Wrong and skipped questions share the
/// `Unanswered` marker; only correctness is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Chosen(usize),
    Unanswered,
}

impl Answer {
    pub fn is_correct_for(&self, question: &Question) -> bool {
        matches!(self, Answer::Chosen(index) if *index == question.correct_option)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    pub status: QuizStatus,
    pub user: Option<User>,
    pub current_question_index: usize,
    pub score: u32,
    pub answers: Vec<Answer>,
    pub time_remaining_secs: u32,
}

impl QuizState {
    pub fn initial() -> Self {
        Self {
            status: QuizStatus::Welcome,
            user: None,
            current_question_index: 0,
            score: 0,
            answers: Vec::new(),
            time_remaining_secs: QUIZ_DURATION,
        }
    }

    pub fn time_spent_secs(&self) -> u32 {
        QUIZ_DURATION.saturating_sub(self.time_remaining_secs)
    }
}

impl Default for QuizState {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub user: User,
    pub score: u32,
    pub total_questions: u32,
    pub date: String,
    #[serde(rename = "timeSpent")]
    pub time_spent_secs: u32,
}

impl QuizResult {
    /// Score as a whole percentage, rounded half up.
    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total_questions)
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date).ok()
    }
}

pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    IdNumber,
}

#[derive(Debug, Clone, Default)]
pub struct PasswordPrompt {
    pub input: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WelcomeForm {
    pub name: String,
    pub id_number: String,
    pub focus: FormField,
    pub error: Option<String>,
    pub admin_prompt: Option<PasswordPrompt>,
}

impl WelcomeForm {
    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::IdNumber => &mut self.id_number,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::IdNumber,
            FormField::IdNumber => FormField::Name,
        };
    }
}

/// Per-question view state. `locked` holds the option the participant
/// committed to; the controller only sees it once they move on.
#[derive(Debug, Clone, Default)]
pub struct QuizView {
    pub cursor: usize,
    pub locked: Option<usize>,
    pub question_index: usize,
}

impl QuizView {
    pub fn sync_to(&mut self, question_index: usize) {
        if self.question_index != question_index {
            *self = QuizView {
                question_index,
                ..QuizView::default()
            };
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminView {
    pub confirm_clear: bool,
    pub selected_row: usize,
    pub message: Option<String>,
}
