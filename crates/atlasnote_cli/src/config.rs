//! Runtime configuration resolved from flags and environment.

use crate::args::Cli;
use atlasnote_core::{default_log_level, init_logging, LoggingError};
use std::path::PathBuf;

const DEFAULT_DB_FILE: &str = "atlasnote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let db_path = cli
            .db
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE));
        let log_dir = cli
            .log_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(str::to_string);
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            db_path,
            log_dir,
            log_level,
        }
    }

    /// Starts file logging when a directory is configured.
    pub fn start_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::args::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn explicit_flags_win() {
        let cli = Cli::try_parse_from([
            "atlasnote",
            "--db",
            "/data/notes.sqlite3",
            "--log-dir",
            " /var/log/atlasnote ",
            "--log-level",
            "warn",
            "stats",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.db_path, PathBuf::from("/data/notes.sqlite3"));
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/atlasnote"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_log_dir_disables_logging() {
        let cli = Cli::try_parse_from(["atlasnote", "--log-dir", "  ", "stats"]).unwrap();
        let config = Config::from_cli(&cli);
        assert!(config.log_dir.is_none());
        assert!(!config.start_logging().unwrap());
    }
}
