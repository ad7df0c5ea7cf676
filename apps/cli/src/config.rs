use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "LEDGER_DB_PATH";
pub const LOG_FORMAT_ENV: &str = "LEDGER_LOG_FORMAT";

const DATA_DIR: &str = "data";
const DB_FILE_NAME: &str = "ledger.db";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| default_db_path());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .map(|v| LogFormat::from_env_value(&v))
            .unwrap_or_default();
        Self {
            db_path,
            log_format,
        }
    }

    /// Applies a command-line database path, which wins over the environment.
    pub fn with_db_path(mut self, db_path: Option<String>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        self
    }
}

/// `<install root>/data/ledger.db`, where the install root is the parent of
/// the directory holding the executable.
pub fn default_db_path() -> String {
    install_root()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR)
        .join(DB_FILE_NAME)
        .to_string_lossy()
        .into_owned()
}

fn install_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent()?.parent().map(Path::to_path_buf)
}
