use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "quiz_debug.log";

/// Routes `tracing` output to a log file in `dir`; the terminal belongs to
/// the UI. Level comes from `RUST_LOG`, defaulting to `info`.
///
/// Returns the log path, or `None` if the file could not be opened or a
/// subscriber was already installed.
pub fn init(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
