//! Core error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the vocabulary core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Deck file exists but nothing could be salvaged from it.
    #[error("Failed to load deck {path}: {reason}")]
    DeckLoad { path: PathBuf, reason: String },

    /// Deck file could not be written.
    #[error("Failed to save deck {path}: {reason}")]
    DeckSave { path: PathBuf, reason: String },

    /// Module name already registered.
    #[error("Module already exists: {0}")]
    DuplicateModule(String),

    /// Module name not present in the registry.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// No module has been selected yet.
    #[error("No module selected")]
    NoActiveModule,

    /// Module name yields no usable file name.
    #[error("Invalid module name: {0:?}")]
    InvalidModuleName(String),

    /// Row index outside the deck.
    #[error("Index {index} out of range for deck of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Registry error.
    #[error("Registry error: {0}")]
    Registry(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
