pub mod bank;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod progress;
pub mod session;
pub mod store;
pub mod ui;
pub mod utils;

mod ui_tests;

// Re-exports for convenience
pub use bank::{load_bank, parse_bank};
pub use config::Config;
pub use controller::{AnswerFeedback, Boundary, HomeStats, Navigation, QuizController, Removal};
pub use db::SqliteStore;
pub use error::{QuizError, StoreError};
pub use models::{
    AppState, Direction, Notice, NoticeKind, OptionLabel, Question, QuestionBank, QuestionId,
    QuestionType, QuizMode, ReviewList,
};
pub use session::{handle_key, App};
pub use store::{KeyValueStore, MemoryStore};
pub use ui::draw;
