// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApkBenchError {
    /// Form input rejected before a command was built (e.g. a blank
    /// required path).
    #[error("{0}")]
    Validation(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApkBenchError {
    /// Shorthand for the "please select ..." style errors raised by the
    /// argument builders.
    pub fn validation(message: impl Into<String>) -> Self {
        ApkBenchError::Validation(message.into())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ApkBenchError>;
