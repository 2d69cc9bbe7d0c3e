pub mod app;
pub mod config;
pub mod controller;
pub mod csv;
pub mod db;
pub mod dispatch;
pub mod logger;
pub mod models;
pub mod questions;
pub mod review;
pub mod session;
pub mod timer;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use controller::{QuizController, QuizError, Transition};
pub use db::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
pub use dispatch::{DispatchError, Dispatcher, HttpSink, RemoteSink, UnconfiguredSink};
pub use models::{Answer, DispatchStatus, Question, QuizResult, QuizState, QuizStatus, User};
pub use questions::QUESTIONS;
pub use review::ReviewSummary;
pub use session::{handle_key, Flow};
