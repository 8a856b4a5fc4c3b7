//! Error types for content loading and page presentation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a content unit.
///
/// Both `NotFound` and `Malformed` are fatal: a page whose content cannot be
/// loaded never reaches the layout stage.
#[derive(Debug, Error)]
pub enum ContentError {
    /// No content is registered under the requested id.
    #[error("no content registered under '{0}'")]
    NotFound(String),

    /// The content body could not be turned into a page tree.
    #[error("content '{id}' is malformed: {reason}")]
    Malformed { id: String, reason: String },

    /// Reading a content directory failed.
    #[error("failed to read content at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a render sink while presenting a page tree.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write page to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render page template: {0}")]
    Template(#[from] askama::Error),
}
