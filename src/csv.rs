use crate::models::QuizResult;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_HEADERS: [&str; 7] = [
    "Date",
    "Name",
    "ID",
    "Score",
    "Total",
    "Percentage",
    "Time (s)",
];

const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Quotes a field when it contains a delimiter, quote or line break.
/// Embedded quotes are doubled.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn local_date(result: &QuizResult) -> String {
    match result.timestamp() {
        Some(ts) => ts.with_timezone(&Local).format(LOCAL_DATE_FORMAT).to_string(),
        None => result.date.clone(),
    }
}

pub fn format_row(result: &QuizResult) -> String {
    [
        escape_field(&local_date(result)),
        escape_field(&result.user.name),
        escape_field(&result.user.id_number),
        result.score.to_string(),
        result.total_questions.to_string(),
        format!("{}%", result.percentage()),
        result.time_spent_secs.to_string(),
    ]
    .join(",")
}

/// Renders the whole collection, or `None` when there is nothing to export.
pub fn export_csv(results: &[QuizResult]) -> Option<String> {
    if results.is_empty() {
        return None;
    }
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(EXPORT_HEADERS.join(","));
    lines.extend(results.iter().map(format_row));
    Some(lines.join("\n"))
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("quiz_results_{}.csv", date.format("%Y-%m-%d"))
}

pub fn write_export(dir: &Path, results: &[QuizResult], date: NaiveDate) -> std::io::Result<Option<PathBuf>> {
    let Some(content) = export_csv(results) else {
        return Ok(None);
    };
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), rows = results.len(), "results exported");
    Ok(Some(path))
}
