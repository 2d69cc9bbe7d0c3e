use crate::models::{Answer, Question, QuizState, QuizStatus, User, QUIZ_DURATION};
use crate::timer::Countdown;
use std::time::{Duration, Instant};
use thiserror::Error;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("please fill in all required fields")]
    Validation,

    #[error("incorrect password")]
    Auth,

    #[error("{operation} is not allowed while {status:?}")]
    InvalidState {
        operation: &'static str,
        status: QuizStatus,
    },

    #[error("option {0} does not exist for this question")]
    InvalidOption(usize),
}

/// What an event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Advanced,
    Finished,
}

/// Owns the quiz state machine and the countdown that drives it.
#[derive(Debug)]
pub struct QuizController {
    questions: Vec<Question>,
    state: QuizState,
    countdown: Option<Countdown>,
    session_id: u64,
}

impl QuizController {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            state: QuizState::initial(),
            countdown: None,
            session_id: 0,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Identity of the current session. Bumped on every start and restart so
    /// late work from an earlier session can be recognised and dropped.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.state.status != QuizStatus::Playing {
            return None;
        }
        self.questions.get(self.state.current_question_index)
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn start(&mut self, name: &str, id_number: &str, now: Instant) -> Result<(), QuizError> {
        self.require(QuizStatus::Welcome, "start")?;

        let name = name.trim();
        let id_number = id_number.trim();
        if name.is_empty() || id_number.is_empty() {
            return Err(QuizError::Validation);
        }

        self.session_id += 1;
        self.state = QuizState {
            status: QuizStatus::Playing,
            user: Some(User {
                name: name.to_string(),
                id_number: id_number.to_string(),
            }),
            current_question_index: 0,
            score: 0,
            answers: Vec::with_capacity(self.questions.len()),
            time_remaining_secs: QUIZ_DURATION,
        };
        self.countdown = Some(Countdown::start(now, TICK_PERIOD));
        tracing::info!(session = self.session_id, participant = name, "quiz started");
        Ok(())
    }

    /// Password is compared by exact equality against `expected`.
    pub fn enter_admin(&mut self, password: &str, expected: &str) -> Result<(), QuizError> {
        self.require(QuizStatus::Welcome, "enter_admin")?;
        if password != expected {
            tracing::warn!("admin login rejected");
            return Err(QuizError::Auth);
        }
        self.state.status = QuizStatus::Admin;
        tracing::info!("admin review opened");
        Ok(())
    }

    pub fn exit_admin(&mut self) {
        self.restart();
    }

    pub fn restart(&mut self) {
        self.countdown = None;
        self.session_id += 1;
        self.state = QuizState::initial();
        tracing::debug!(session = self.session_id, "session reset");
    }

    pub fn submit_answer(&mut self, selected: usize) -> Result<Transition, QuizError> {
        self.require(QuizStatus::Playing, "submit_answer")?;

        let index = self.state.current_question_index;
        let Some(question) = self.questions.get(index) else {
            return Err(QuizError::InvalidOption(selected));
        };
        if selected >= question.options.len() {
            return Err(QuizError::InvalidOption(selected));
        }

        if selected == question.correct_option {
            self.state.answers.push(Answer::Chosen(selected));
            self.state.score += 1;
        } else {
            self.state.answers.push(Answer::Unanswered);
        }

        if index + 1 == self.questions.len() {
            self.finish();
            Ok(Transition::Finished)
        } else {
            self.state.current_question_index += 1;
            Ok(Transition::Advanced)
        }
    }

    pub fn tick(&mut self) {
        if self.state.status != QuizStatus::Playing {
            return;
        }
        self.state.time_remaining_secs = self.state.time_remaining_secs.saturating_sub(1);
    }

    pub fn time_expire(&mut self) -> Transition {
        if self.state.status != QuizStatus::Playing {
            return Transition::Stay;
        }
        let missing = self.questions.len().saturating_sub(self.state.answers.len());
        self.state
            .answers
            .extend(std::iter::repeat_n(Answer::Unanswered, missing));
        tracing::info!(
            session = self.session_id,
            unanswered = missing,
            "time expired"
        );
        self.finish();
        Transition::Finished
    }

    /// Delivers every tick that fell due by `now`, expiring the session once
    /// the clock reaches zero.
    pub fn pump_timer(&mut self, now: Instant) -> Transition {
        let Some(countdown) = self.countdown.as_mut() else {
            return Transition::Stay;
        };
        let due = countdown.due_ticks(now);
        for _ in 0..due {
            self.tick();
            if self.state.time_remaining_secs == 0 {
                return self.time_expire();
            }
        }
        Transition::Stay
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.countdown.as_ref().map(|c| c.time_until_next(now))
    }

    fn finish(&mut self) {
        self.countdown = None;
        self.state.status = QuizStatus::Finished;
        tracing::info!(
            session = self.session_id,
            score = self.state.score,
            total = self.questions.len(),
            "quiz finished"
        );
    }

    fn require(&self, status: QuizStatus, operation: &'static str) -> Result<(), QuizError> {
        if self.state.status == status {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                operation,
                status: self.state.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QUESTIONS;

    fn controller() -> QuizController {
        QuizController::new(QUESTIONS.clone())
    }

    fn started(now: Instant) -> QuizController {
        let mut c = controller();
        c.start("Ana Pérez", "0912345678", now).unwrap();
        c
    }

    fn correct_of(c: &QuizController) -> usize {
        c.current_question().unwrap().correct_option
    }

    fn wrong_of(c: &QuizController) -> usize {
        (correct_of(c) + 1) % 4
    }

    fn assert_score_invariant(c: &QuizController) {
        let state = c.state();
        let expected = state
            .answers
            .iter()
            .zip(c.questions())
            .filter(|(a, q)| a.is_correct_for(q))
            .count() as u32;
        assert_eq!(state.score, expected);
    }

    #[test]
    fn test_start_sets_playing_state() {
        let c = started(Instant::now());
        let state = c.state();
        assert_eq!(state.status, QuizStatus::Playing);
        assert_eq!(state.user.as_ref().unwrap().name, "Ana Pérez");
        assert_eq!(state.current_question_index, 0);
        assert_eq!(state.score, 0);
        assert!(state.answers.is_empty());
        assert_eq!(state.time_remaining_secs, QUIZ_DURATION);
        assert!(c.is_timer_running());
    }

    #[test]
    fn test_start_rejects_blank_fields() {
        let mut c = controller();
        assert_eq!(
            c.start("", "123", Instant::now()),
            Err(QuizError::Validation)
        );
        assert_eq!(
            c.start("Ana", "   ", Instant::now()),
            Err(QuizError::Validation)
        );
        assert_eq!(c.state(), &QuizState::initial());
        assert!(!c.is_timer_running());
    }

    #[test]
    fn test_start_trims_input() {
        let mut c = controller();
        c.start("  Ana  ", " 42 ", Instant::now()).unwrap();
        let user = c.state().user.clone().unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.id_number, "42");
    }

    #[test]
    fn test_start_only_from_welcome() {
        let now = Instant::now();
        let mut c = started(now);
        assert!(matches!(
            c.start("Bob", "1", now),
            Err(QuizError::InvalidState { .. })
        ));
        assert_eq!(c.state().user.as_ref().unwrap().name, "Ana Pérez");
    }

    #[test]
    fn test_answers_track_index_while_playing() {
        let mut c = started(Instant::now());
        for i in 0..10 {
            assert_eq!(c.state().answers.len(), c.state().current_question_index);
            let choice = if i % 2 == 0 { correct_of(&c) } else { wrong_of(&c) };
            assert_eq!(c.submit_answer(choice).unwrap(), Transition::Advanced);
            assert_score_invariant(&c);
        }
        assert_eq!(c.state().answers.len(), 10);
        assert_eq!(c.state().score, 5);
    }

    #[test]
    fn test_wrong_answer_recorded_as_sentinel() {
        let mut c = started(Instant::now());
        let wrong = wrong_of(&c);
        c.submit_answer(wrong).unwrap();
        assert_eq!(c.state().answers, vec![Answer::Unanswered]);
        assert_eq!(c.state().score, 0);
    }

    #[test]
    fn test_nineteen_right_last_wrong() {
        let mut c = started(Instant::now());
        for _ in 0..19 {
            let choice = correct_of(&c);
            c.submit_answer(choice).unwrap();
        }
        let wrong = wrong_of(&c);
        assert_eq!(c.submit_answer(wrong).unwrap(), Transition::Finished);
        let state = c.state();
        assert_eq!(state.status, QuizStatus::Finished);
        assert_eq!(state.score, 19);
        assert_eq!(state.answers.len(), 20);
        assert_eq!(state.answers[19], Answer::Unanswered);
        assert!(!c.is_timer_running());
        assert_score_invariant(&c);
    }

    #[test]
    fn test_submit_rejects_out_of_range_option() {
        let mut c = started(Instant::now());
        assert_eq!(c.submit_answer(4), Err(QuizError::InvalidOption(4)));
        assert!(c.state().answers.is_empty());
    }

    #[test]
    fn test_submit_outside_playing_is_rejected() {
        let mut c = controller();
        assert!(matches!(
            c.submit_answer(0),
            Err(QuizError::InvalidState { .. })
        ));
        assert_eq!(c.state(), &QuizState::initial());
    }

    #[test]
    fn test_tick_decrements_and_floors() {
        let mut c = started(Instant::now());
        c.tick();
        assert_eq!(c.state().time_remaining_secs, QUIZ_DURATION - 1);
        for _ in 0..QUIZ_DURATION + 10 {
            c.tick();
        }
        assert_eq!(c.state().time_remaining_secs, 0);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut c = controller();
        c.tick();
        assert_eq!(c.state(), &QuizState::initial());
    }

    #[test]
    fn test_time_expire_pads_unanswered() {
        let now = Instant::now();
        let mut c = started(now);
        for _ in 0..15 {
            let choice = correct_of(&c);
            c.submit_answer(choice).unwrap();
        }
        let elapsed = now + Duration::from_secs(QUIZ_DURATION as u64);
        assert_eq!(c.pump_timer(elapsed), Transition::Finished);

        let state = c.state();
        assert_eq!(state.status, QuizStatus::Finished);
        assert_eq!(state.time_remaining_secs, 0);
        assert_eq!(state.answers.len(), 20);
        assert!(state.answers[15..].iter().all(|a| *a == Answer::Unanswered));
        assert_eq!(state.score, 15);
        assert!(!c.is_timer_running());
        assert_score_invariant(&c);
    }

    #[test]
    fn test_events_after_finish_do_not_alter_state() {
        let now = Instant::now();
        let mut c = started(now);
        c.time_expire();
        let frozen = c.state().clone();

        c.tick();
        assert_eq!(c.time_expire(), Transition::Stay);
        assert_eq!(
            c.pump_timer(now + Duration::from_secs(5000)),
            Transition::Stay
        );
        assert_eq!(c.state(), &frozen);
    }

    #[test]
    fn test_pump_timer_never_increases_time() {
        let now = Instant::now();
        let mut c = started(now);
        let mut last = c.state().time_remaining_secs;
        for ms in (0..5000).step_by(250) {
            c.pump_timer(now + Duration::from_millis(ms));
            let remaining = c.state().time_remaining_secs;
            assert!(remaining <= last);
            last = remaining;
        }
        assert_eq!(last, QUIZ_DURATION - 4);
    }

    #[test]
    fn test_answering_last_question_stops_timer() {
        let now = Instant::now();
        let mut c = started(now);
        for _ in 0..20 {
            let choice = correct_of(&c);
            c.submit_answer(choice).unwrap();
        }
        assert!(!c.is_timer_running());
        let remaining = c.state().time_remaining_secs;
        c.pump_timer(now + Duration::from_secs(30));
        assert_eq!(c.state().time_remaining_secs, remaining);
        assert_eq!(c.state().score, 20);
    }

    #[test]
    fn test_restart_yields_initial_state_from_any_status() {
        let now = Instant::now();

        let mut c = started(now);
        c.submit_answer(0).unwrap();
        c.restart();
        assert_eq!(c.state(), &QuizState::initial());
        assert!(!c.is_timer_running());

        let mut c = started(now);
        c.time_expire();
        c.restart();
        assert_eq!(c.state(), &QuizState::initial());

        let mut c = controller();
        c.enter_admin("admin123", "admin123").unwrap();
        c.exit_admin();
        assert_eq!(c.state(), &QuizState::initial());
    }

    #[test]
    fn test_restart_bumps_session_id() {
        let mut c = started(Instant::now());
        let first = c.session_id();
        c.restart();
        assert!(c.session_id() > first);
    }

    #[test]
    fn test_admin_requires_exact_password() {
        let mut c = controller();
        assert_eq!(c.enter_admin("admin", "admin123"), Err(QuizError::Auth));
        assert_eq!(c.enter_admin("admin123 ", "admin123"), Err(QuizError::Auth));
        assert_eq!(c.state().status, QuizStatus::Welcome);

        c.enter_admin("admin123", "admin123").unwrap();
        assert_eq!(c.state().status, QuizStatus::Admin);
    }

    #[test]
    fn test_admin_not_reachable_while_playing() {
        let mut c = started(Instant::now());
        assert!(matches!(
            c.enter_admin("admin123", "admin123"),
            Err(QuizError::InvalidState { .. })
        ));
        assert_eq!(c.state().status, QuizStatus::Playing);
    }
}
