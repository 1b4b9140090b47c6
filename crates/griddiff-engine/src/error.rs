//! Error types for the griddiff engine.

use thiserror::Error;

use crate::paired::Side;

/// Errors that can occur inside the correlation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No value on side {0}")]
    NotFound(Side),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
