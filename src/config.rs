//! Runtime configuration resolved from command-line flags and environment.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::cli::Cli;
use crate::error::Result;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DATA_DIR_NAME: &str = ".prohub";
pub const LOG_FILE: &str = "prohub.log";

/// Deployment mode of the stub server. Production hides error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    /// Holds `preferences.json` and the dashboard log.
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Config {
    /// Resolve the configuration and make sure the data directory exists.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = cli.dir.clone().unwrap_or_else(default_data_dir);
        fs::create_dir_all(&data_dir)?;
        Ok(Config {
            data_dir,
            log_level: cli.log_level.clone(),
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// `~/.prohub`, or `./.prohub` when there is no home directory.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_resolve_creates_data_dir() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("data");
        let cli = Cli::parse_from(["prohub", "--dir", dir.to_str().unwrap(), "theme"]);
        let config = Config::resolve(&cli).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.log_path(), dir.join(LOG_FILE));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_default_data_dir_name() {
        assert!(default_data_dir().ends_with(DATA_DIR_NAME));
    }
}
