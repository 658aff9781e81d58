//! Error types for icy_gallery

use std::path::PathBuf;
use thiserror::Error;

/// Errors of the ambient layers (options, key bindings).
///
/// The viewer core itself never fails: bad indices are normalized and
/// failed loads degrade to a placeholder tile.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read options file '{path}': {message}")]
    ReadOptions { path: PathBuf, message: String },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid hotkey '{binding}' for command '{command}'")]
    InvalidHotkey { command: String, binding: String },

    #[error("Unknown command id: {0}")]
    UnknownCommand(String),

    #[error("No configuration directory available")]
    NoConfigDir,
}

pub type GalleryResult<T> = Result<T, GalleryError>;

/// Why a full-resolution resource could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to read '{source_ref}': {message}")]
    Io { source_ref: String, message: String },

    #[error("Failed to fetch '{source_ref}': {message}")]
    Http { source_ref: String, message: String },

    #[error("Failed to decode '{source_ref}': {message}")]
    Decode { source_ref: String, message: String },
}
