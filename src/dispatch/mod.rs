pub mod sink;
pub mod worker;

pub use sink::{DispatchError, HttpSink, RemotePayload, RemoteSink, UnconfiguredSink};
pub use worker::{spawn_dispatch_worker, DispatchRequest, DispatchResponse};

use crate::db::results::append_result;
use crate::db::KeyValueStore;
use crate::models::{DispatchStatus, Question, QuizResult, QuizState, QuizStatus, User};
use chrono::{DateTime, SecondsFormat, Utc};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub fn build_result(user: &User, state: &QuizState, total: usize, now: DateTime<Utc>) -> QuizResult {
    QuizResult {
        id: now.timestamp_millis().to_string(),
        user: user.clone(),
        score: state.score,
        total_questions: total as u32,
        date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        time_spent_secs: state.time_spent_secs(),
    }
}

/// Correct and incorrect question ids, in bank order, with counts.
pub fn build_details(questions: &[Question], state: &QuizState) -> String {
    let (correct, incorrect): (Vec<_>, Vec<_>) = questions
        .iter()
        .enumerate()
        .partition(|(i, q)| state.answers.get(*i).is_some_and(|a| a.is_correct_for(q)));

    let join = |qs: &[(usize, &Question)]| {
        qs.iter()
            .map(|(_, q)| q.id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Correct ({}): {} | Incorrect ({}): {}",
        correct.len(),
        join(&correct),
        incorrect.len(),
        join(&incorrect)
    )
}

/// Persists finished sessions locally and forwards them to the remote sink.
///
/// Status is tracked per session: `reset` binds the dispatcher to a session
/// id, and worker responses carrying any other id are discarded.
pub struct Dispatcher {
    status: DispatchStatus,
    session_id: u64,
    request_tx: Sender<DispatchRequest>,
    response_rx: Receiver<DispatchResponse>,
    last_error: Option<String>,
    local_error: Option<String>,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn RemoteSink>) -> std::io::Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();
        spawn_dispatch_worker(sink, response_tx, request_rx)?;
        Ok(Self {
            status: DispatchStatus::Idle,
            session_id: 0,
            request_tx,
            response_rx,
            last_error: None,
            local_error: None,
        })
    }

    pub fn status(&self) -> DispatchStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn local_error(&self) -> Option<&str> {
        self.local_error.as_deref()
    }

    pub fn reset(&mut self, session_id: u64) {
        self.status = DispatchStatus::Idle;
        self.session_id = session_id;
        self.last_error = None;
        self.local_error = None;
    }

    /// Records a finished session. Only fires once per session: further
    /// calls return `None` until the next `reset`.
    pub fn dispatch(
        &mut self,
        session_id: u64,
        state: &QuizState,
        questions: &[Question],
        store: &mut dyn KeyValueStore,
    ) -> Option<QuizResult> {
        if self.status != DispatchStatus::Idle || session_id != self.session_id {
            return None;
        }
        if state.status != QuizStatus::Finished {
            return None;
        }
        let user = state.user.as_ref()?;

        let result = build_result(user, state, questions.len(), Utc::now());
        let details = build_details(questions, state);

        match append_result(store, &result) {
            Ok(count) => {
                tracing::info!(session = session_id, stored = count, "result saved locally");
            }
            Err(e) => {
                tracing::error!(session = session_id, error = %e, "failed to save result locally");
                self.local_error = Some(e.to_string());
            }
        }

        self.status = DispatchStatus::Saving;
        let request = DispatchRequest::Submit {
            session_id,
            payload: RemotePayload {
                result: result.clone(),
                details,
            },
        };
        if self.request_tx.send(request).is_err() {
            tracing::error!(session = session_id, "dispatch worker is gone");
            self.status = DispatchStatus::Error;
            self.last_error = Some(DispatchError::WorkerGone.to_string());
        }

        Some(result)
    }

    /// Applies any finished remote submissions. Returns true when the
    /// current session's status changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.response_rx.try_recv() {
            changed |= self.apply(response);
        }
        changed
    }

    /// Blocks until the current session's submission resolves or `timeout`
    /// passes.
    pub fn wait_for_outcome(&mut self, timeout: Duration) -> DispatchStatus {
        let deadline = Instant::now() + timeout;
        while self.status == DispatchStatus::Saving {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.response_rx.recv_timeout(remaining) {
                Ok(response) => {
                    self.apply(response);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.status
    }

    fn apply(&mut self, response: DispatchResponse) -> bool {
        if response.session_id() != self.session_id || self.status != DispatchStatus::Saving {
            tracing::debug!(
                session = response.session_id(),
                current = self.session_id,
                "discarding stale dispatch response"
            );
            return false;
        }
        match response {
            DispatchResponse::Delivered { .. } => {
                tracing::info!(session = self.session_id, "result sent to remote sink");
                self.status = DispatchStatus::Success;
            }
            DispatchResponse::Failed { error, .. } => {
                self.status = DispatchStatus::Error;
                self.last_error = Some(error);
            }
        }
        true
    }
}
