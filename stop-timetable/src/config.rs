//! Runtime configuration for the timetable tool.

use std::path::PathBuf;
use std::str::FromStr;

/// Default location of the saved catalogue response.
const DEFAULT_CATALOGUE_PATH: &str = "API_copy.json";

/// Default location of the schedule bundle.
const DEFAULT_CONTAINER_PATH: &str = "bus_services.zip";

/// Error building configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Output format other than `text` or `json`
    #[error("unknown output format {0:?}: expected \"text\" or \"json\"")]
    UnknownOutputFormat(String),
}

/// How the finished timetable is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable blocks, one per line.
    #[default]
    Text,
    /// The entry list as a JSON array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownOutputFormat(s.to_string())),
        }
    }
}

/// Where the inputs live and how to print the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableConfig {
    /// Saved catalogue snapshot (JSON).
    pub catalogue_path: PathBuf,
    /// Outer schedule bundle (ZIP).
    pub container_path: PathBuf,
    pub output: OutputFormat,
}

impl TimetableConfig {
    /// Defaults overridden by `TIMETABLE_CATALOGUE`, `TIMETABLE_CONTAINER`
    /// and `TIMETABLE_OUTPUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("TIMETABLE_CATALOGUE") {
            config.catalogue_path = path.into();
        }
        if let Some(path) = lookup("TIMETABLE_CONTAINER") {
            config.container_path = path.into();
        }
        if let Some(format) = lookup("TIMETABLE_OUTPUT") {
            config.output = format.parse()?;
        }

        Ok(config)
    }

    /// Set the catalogue path.
    pub fn with_catalogue_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalogue_path = path.into();
        self
    }

    /// Set the container path.
    pub fn with_container_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.container_path = path.into();
        self
    }

    /// Set the output format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            catalogue_path: DEFAULT_CATALOGUE_PATH.into(),
            container_path: DEFAULT_CONTAINER_PATH.into(),
            output: OutputFormat::Text,
        }
    }
}
