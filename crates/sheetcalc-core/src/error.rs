//! Error types for sheetcalc core.

use std::path::PathBuf;

use thiserror::Error;

use sheetcalc_engine::EngineError;

/// Errors that can occur while loading, evaluating or saving a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {}", .path.display(), .source)]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}, cell {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Config file {}: {}", .path.display(), .source)]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
