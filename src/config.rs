use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub sink_url: Option<String>,
    pub sheet_url: Option<String>,
    pub admin_password: String,
    pub http_timeout: Duration,
}

fn default_data_dir(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = lookup("USERPROFILE").unwrap_or_else(|| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\timed-quiz")
    } else {
        let home = lookup("HOME").unwrap_or_else(|| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/timed-quiz")
    }
}

fn ignore_missing<T>(result: Result<T, dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

impl Config {
    /// Loads a `.env` file from the working directory when one is present.
    /// A missing file is not an error.
    pub fn load_dotenv() -> Result<(), dotenvy::Error> {
        ignore_missing(dotenvy::dotenv())
    }

    /// Reads `QUIZ_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("QUIZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&lookup));

        let http_timeout = non_empty("QUIZ_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            data_dir,
            sink_url: non_empty("QUIZ_SINK_URL"),
            sheet_url: non_empty("QUIZ_SHEET_URL"),
            admin_password: lookup("QUIZ_ADMIN_PASSWORD")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            http_timeout: Duration::from_secs(http_timeout),
        }
    }
}
