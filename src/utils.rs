use crate::models::{percentage, User};
use unicode_width::UnicodeWidthChar;

/// Truncates to at most `max_width` display columns, ending in "..." when
/// something was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Countdown display, e.g. `19:05`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed time display, e.g. `14m 5s`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    NeedsWork,
}

impl Grade {
    pub fn from_percentage(pct: u32) -> Self {
        if pct >= 80 {
            Grade::Excellent
        } else if pct >= 60 {
            Grade::Good
        } else {
            Grade::NeedsWork
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent work!",
            Grade::Good => "Good job, but there is room to improve",
            Grade::NeedsWork => "You need to review this material",
        }
    }
}

pub fn share_text(user: &User, score: u32, total: u32, elapsed_secs: u32) -> String {
    format!(
        "I completed the Mathematics Assessment!\nStudent: {}\nScore: {}/{} ({}%)\nTime: {}",
        user.name,
        score,
        total,
        percentage(score, total),
        format_duration(elapsed_secs)
    )
}
