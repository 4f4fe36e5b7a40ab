//! Error types for the Phalanx node.

use std::path::PathBuf;

use thiserror::Error;

use crate::parse::ParseError;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in node operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Inbound line could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Nobody is listening on the renderer socket
    #[error("No renderer listening on {}: {source}", .path.display())]
    NoRenderer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer connection dropped mid-session
    #[error("Renderer disconnected")]
    RendererDisconnected,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error only affects the one inbound line that caused it.
    pub fn is_dropped_input(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}
