//! MX Results Library
//!
//! A Rust library for turning text extracted from AMA motocross result sheets
//! into structured race events.
//!
//! This library provides tools for:
//! - Parsing result sheets with a stateful, heuristic line parser
//! - Locating header facts (track, location, round, date, class, result kind)
//! - Building a column extractor chain from the results table header
//! - Exporting events to CSV or Parquet and loading them back
//! - Filtering exported results and rendering bounded listings
//! - Parsing whole directories of sheets concurrently

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_processor;
        pub mod race_table;
        pub mod results_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Listing, RaceEvent, ResultRow};
pub use app::services::results_parser::{parse_file, parse_text};
pub use config::Config;

/// Result type alias for the results parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for parsing, export and configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Result sheet does not exist
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Writing or reading the results table failed
    #[error("Results table error: {message}")]
    TableExport {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Results table has an unexpected layout
    #[error("Results table format error in '{file}': {message}")]
    TableFormat { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration file '{path}' is invalid: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// A parse task on the blocking pool failed
    #[error("Parse task failed: {message}")]
    TaskFailed { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a source not found error
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a results table error
    pub fn table_export(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::TableExport {
            message: message.into(),
            source,
        }
    }

    /// Create a results table format error
    pub fn table_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a task failure error
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::TableExport {
            message: "Polars operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
