//! Error types for griddiff core.

use std::path::PathBuf;
use thiserror::Error;

use griddiff_engine::EngineError;

/// Errors that can occur while comparing sheets and books
#[derive(Error, Debug)]
pub enum DiffError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate sheet name {name} in {path}")]
    DuplicateSheet { path: PathBuf, name: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Comparison cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, DiffError>;
