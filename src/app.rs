use crate::config::Config;
use crate::controller::{QuizController, QuizError, Transition};
use crate::csv::write_export;
use crate::db::KeyValueStore;
use crate::dispatch::Dispatcher;
use crate::models::{
    AdminView, DispatchStatus, PasswordPrompt, QuizResult, QuizStatus, QuizView, WelcomeForm,
};
use crate::review::ReviewSummary;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Idle poll interval for the event loop when no tick is pending.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Everything the terminal front end needs: the session controller, the
/// dispatcher, the injected store and per-screen view state.
pub struct App {
    pub config: Config,
    pub controller: QuizController,
    pub dispatcher: Dispatcher,
    store: Box<dyn KeyValueStore>,
    pub welcome: WelcomeForm,
    pub quiz_view: QuizView,
    pub admin_view: AdminView,
    pub review: ReviewSummary,
    pub last_result: Option<QuizResult>,
    pub show_share: bool,
}

impl App {
    pub fn new(
        config: Config,
        controller: QuizController,
        dispatcher: Dispatcher,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            controller,
            dispatcher,
            store,
            welcome: WelcomeForm::default(),
            quiz_view: QuizView::default(),
            admin_view: AdminView::default(),
            review: ReviewSummary::default(),
            last_result: None,
            show_share: false,
        }
    }

    pub fn status(&self) -> QuizStatus {
        self.controller.state().status
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn start_quiz(&mut self, now: Instant) -> Result<(), QuizError> {
        let outcome = self
            .controller
            .start(&self.welcome.name, &self.welcome.id_number, now);
        match outcome {
            Ok(()) => {
                self.dispatcher.reset(self.controller.session_id());
                self.welcome = WelcomeForm::default();
                self.quiz_view = QuizView::default();
                self.last_result = None;
                self.show_share = false;
                Ok(())
            }
            Err(e) => {
                self.welcome.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn open_admin_prompt(&mut self) {
        self.welcome.admin_prompt = Some(PasswordPrompt::default());
    }

    pub fn close_admin_prompt(&mut self) {
        self.welcome.admin_prompt = None;
    }

    pub fn attempt_admin_login(&mut self) -> Result<(), QuizError> {
        let password = self
            .welcome
            .admin_prompt
            .as_ref()
            .map(|p| p.input.clone())
            .unwrap_or_default();

        match self
            .controller
            .enter_admin(&password, &self.config.admin_password)
        {
            Ok(()) => {
                self.welcome = WelcomeForm::default();
                self.admin_view = AdminView::default();
                self.refresh_review();
                Ok(())
            }
            Err(e) => {
                if let Some(prompt) = self.welcome.admin_prompt.as_mut() {
                    prompt.error = Some(e.to_string());
                    prompt.input.clear();
                }
                Err(e)
            }
        }
    }

    /// Commits the participant's choice for the current question.
    pub fn submit_answer(&mut self, selected: usize) -> Result<Transition, QuizError> {
        let transition = self.controller.submit_answer(selected)?;
        self.after_transition(transition);
        Ok(transition)
    }

    pub fn on_timer(&mut self, now: Instant) -> Transition {
        let transition = self.controller.pump_timer(now);
        self.after_transition(transition);
        transition
    }

    pub fn poll_dispatch(&mut self) -> bool {
        self.dispatcher.poll()
    }

    /// How long the event loop may block before the next timer tick is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.controller
            .time_until_next_tick(now)
            .map(|d| d.min(IDLE_POLL))
            .unwrap_or(IDLE_POLL)
    }

    pub fn restart(&mut self) {
        self.controller.restart();
        self.dispatcher.reset(self.controller.session_id());
        self.welcome = WelcomeForm::default();
        self.quiz_view = QuizView::default();
        self.admin_view = AdminView::default();
        self.last_result = None;
        self.show_share = false;
    }

    pub fn exit_admin(&mut self) {
        self.controller.exit_admin();
        self.dispatcher.reset(self.controller.session_id());
        self.admin_view = AdminView::default();
        self.review = ReviewSummary::default();
    }

    pub fn refresh_review(&mut self) {
        self.review = ReviewSummary::load(self.store.as_ref());
        let last = self.review.count().saturating_sub(1);
        self.admin_view.selected_row = self.admin_view.selected_row.min(last);
    }

    pub fn request_clear(&mut self) {
        if self.review.can_clear() {
            self.admin_view.confirm_clear = true;
        }
    }

    pub fn resolve_clear(&mut self, confirmed: bool) {
        self.admin_view.confirm_clear = false;
        match self.review.clear(self.store.as_mut(), confirmed) {
            Ok(true) => {
                self.admin_view.message = Some("All results deleted".to_string());
                self.admin_view.selected_row = 0;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "failed to clear results");
                self.admin_view.message = Some(format!("Could not delete results: {}", e));
            }
        }
    }

    pub fn export_results(&mut self) -> Option<PathBuf> {
        if !self.review.can_export() {
            return None;
        }
        let today = chrono::Local::now().date_naive();
        match write_export(&self.config.data_dir, &self.review.results, today) {
            Ok(path) => {
                if let Some(ref path) = path {
                    self.admin_view.message = Some(format!("Exported to {}", path.display()));
                }
                path
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.admin_view.message = Some(format!("Export failed: {}", e));
                None
            }
        }
    }

    pub fn dispatch_status(&self) -> DispatchStatus {
        self.dispatcher.status()
    }

    fn after_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Finished => {
                let state = self.controller.state();
                if let Some(result) = self.dispatcher.dispatch(
                    self.controller.session_id(),
                    state,
                    self.controller.questions(),
                    self.store.as_mut(),
                ) {
                    self.last_result = Some(result);
                }
            }
            Transition::Advanced => {
                self.quiz_view.sync_to(self.controller.state().current_question_index);
            }
            Transition::Stay => {}
        }
    }
}
