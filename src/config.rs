use directories_next::ProjectDirs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to find config directory")]
    ConfigDir,

    #[error("failed to load config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to deserialize config file: {0}")]
    Deserialize(#[from] toml::de::Error),
}

/// Settings read from `config.toml` in the platform config directory. Everything in here
/// is ambient; the command line surface is the same whether or not the file exists.
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log level filter. An environment variable override still wins.
    log_level: String,

    /// Flush the output channel after every byte instead of leaving buffering to the
    /// host. Programs that prompt without a newline need this.
    pub flush_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: String::from("warn"),
            flush_output: false,
        }
    }
}

impl Config {
    fn load_from_file() -> Result<Self, ConfigError> {
        let project = ProjectDirs::from("maskine", "", "").ok_or(ConfigError::ConfigDir)?;
        let directory = project
            .config_dir()
            .to_str()
            .ok_or(ConfigError::ConfigDir)?;
        let path: PathBuf = [directory, "config.toml"].iter().collect();
        Ok(toml::from_str(&fs::read_to_string(&path)?)?)
    }

    /// Load the config file, falling back to defaults. A missing file is the normal
    /// case; any other failure is reported so it can be logged once the logger is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::load_from_file() {
            Ok(config) => (config, None),
            Err(ConfigError::Io(ref err)) if err.kind() == io::ErrorKind::NotFound => {
                (Self::default(), None)
            }
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}
