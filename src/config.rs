//! Configuration management and validation.
//!
//! Settings come from four layers, each overriding the previous one:
//! built-in defaults, a JSON file, environment variables and finally the
//! command line (applied by the CLI through the `with_*` builders).

use crate::app::services::race_table::{SourceRewrite, TableFormat};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FILE_PATTERN, DEFAULT_OUTPUT_FILE,
    DEFAULT_PARALLEL_WORKERS, ENV_LOG_LEVEL, ENV_WORKERS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How result sheets are found and parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of sheets parsed concurrently
    pub workers: usize,

    /// Glob pattern matched against file names during discovery
    pub file_pattern: String,

    /// Track name to use instead of the one found on each sheet
    pub track_name: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, DEFAULT_PARALLEL_WORKERS),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            track_name: None,
        }
    }
}

/// How the results table is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output: PathBuf,
    pub format: TableFormat,

    /// Drop round, result kind and hometown columns
    pub compact: bool,

    /// Map local text paths to published PDF URLs
    pub source_rewrite: Option<SourceRewrite>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            format: TableFormat::Csv,
            compact: false,
            source_rewrite: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no `-v`/`--quiet` flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Global configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Location of the per-user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read configuration {}", path.display()), e)
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::config_parse(path.display().to_string(), e))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load defaults, then the configuration file, then the environment
    ///
    /// An explicitly named file must exist; the per-user default file is
    /// used only when present.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) if !path.exists() => {
                return Err(Error::configuration(format!(
                    "Configuration file {} does not exist",
                    path.display()
                )));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(workers) = lookup(ENV_WORKERS) {
            self.processing.workers = workers.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be a number, got '{}'", ENV_WORKERS, workers))
            })?;
            debug!("Workers from environment: {}", self.processing.workers);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|level| !level.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
        Ok(())
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::config_parse(path.display().to_string(), e))?;
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("Failed to write configuration {}", path.display()), e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if self.processing.file_pattern.trim().is_empty() {
            return Err(Error::configuration("file pattern must not be empty"));
        }
        glob::Pattern::new(&self.processing.file_pattern).map_err(|e| {
            Error::configuration(format!(
                "invalid file pattern '{}': {}",
                self.processing.file_pattern, e
            ))
        })?;
        Ok(())
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.processing.workers = workers;
        self
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.processing.file_pattern = pattern.into();
        self
    }

    pub fn with_track_name(mut self, track_name: impl Into<String>) -> Self {
        self.processing.track_name = Some(track_name.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.export.output = output.into();
        self
    }

    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.export.format = format;
        self
    }

    pub fn with_compact(mut self) -> Self {
        self.export.compact = true;
        self
    }
}
