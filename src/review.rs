use crate::db::results::{clear_results, load_results};
use crate::db::{KeyValueStore, StoreError};
use crate::models::QuizResult;
use std::cmp::Ordering;

/// Snapshot of the stored results, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewSummary {
    pub results: Vec<QuizResult>,
}

impl ReviewSummary {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut results = load_results(store);
        sort_newest_first(&mut results);
        Self { results }
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn average_score(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let total: u64 = self.results.iter().map(|r| r.score as u64).sum();
        total as f64 / self.results.len() as f64
    }

    pub fn average_display(&self) -> String {
        if self.results.is_empty() {
            "0".to_string()
        } else {
            format!("{:.1}", self.average_score())
        }
    }

    /// Export and clear are only offered when something is stored.
    pub fn can_export(&self) -> bool {
        !self.is_empty()
    }

    pub fn can_clear(&self) -> bool {
        !self.is_empty()
    }

    /// Removes every stored result. Does nothing unless `confirmed`.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore, confirmed: bool) -> Result<bool, StoreError> {
        if !confirmed {
            return Ok(false);
        }
        clear_results(store)?;
        tracing::info!(removed = self.results.len(), "stored results cleared");
        self.results.clear();
        Ok(true)
    }
}

fn sort_newest_first(results: &mut [QuizResult]) {
    results.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.date.cmp(&a.date),
    });
}
