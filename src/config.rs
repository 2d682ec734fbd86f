use std::path::PathBuf;

pub const BANK_PATH_ENV: &str = "QUIZ_BANK_PATH";
pub const DATA_DIR_ENV: &str = "QUIZ_BANK_DATA_DIR";
pub const DEFAULT_BANK_FILE: &str = "question_bank.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bank_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Bank path from the first CLI argument, then `QUIZ_BANK_PATH`, then
    /// `question_bank.json` in the working directory.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    pub fn resolve(arg: Option<String>, env: impl Fn(&str) -> Option<String>) -> Self {
        let bank_path = arg
            .filter(|a| !a.trim().is_empty())
            .or_else(|| env(BANK_PATH_ENV).filter(|v| !v.trim().is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BANK_FILE));

        let data_dir = env(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&env));

        Self {
            bank_path,
            data_dir,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("quiz-bank.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("quiz-bank.log")
    }
}

fn default_data_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = env("USERPROFILE").unwrap_or_else(|| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\quiz-bank")
    } else {
        let home = env("HOME").unwrap_or_else(|| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/quiz-bank")
    }
}
