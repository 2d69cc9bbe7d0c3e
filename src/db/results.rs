use super::{KeyValueStore, StoreError};
use crate::models::QuizResult;

pub const RESULTS_KEY: &str = "quiz_results";

/// Reads the stored collection. A corrupt or unreadable value is logged and
/// treated as an empty collection.
pub fn load_results(store: &dyn KeyValueStore) -> Vec<QuizResult> {
    match store.get(RESULTS_KEY) {
        Ok(raw) => parse_results(raw.as_deref()),
        Err(e) => {
            tracing::error!(error = %e, "failed to read stored results");
            Vec::new()
        }
    }
}

fn parse_results(raw: Option<&str>) -> Vec<QuizResult> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!(error = %e, "stored results are corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Appends one result and writes the collection back. A failed read aborts
/// without writing; only corrupt contents are replaced.
pub fn append_result(store: &mut dyn KeyValueStore, result: &QuizResult) -> Result<usize, StoreError> {
    let raw = store.get(RESULTS_KEY)?;
    let mut results = parse_results(raw.as_deref());
    results.push(result.clone());
    let json = serde_json::to_string(&results)?;
    store.set(RESULTS_KEY, &json)?;
    Ok(results.len())
}

pub fn clear_results(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(RESULTS_KEY)
}
