//! Error types for station-index

use thiserror::Error;

/// Result type alias using station-index's Error
pub type Result<T> = std::result::Result<T, Error>;

/// station-index error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tree error: {message}")]
    Tree { message: String },

    #[error("Malformed node {node}: {message}")]
    MalformedNode { node: String, message: String },

    #[error("Cannot address point {node}: {message}")]
    Addressing { node: String, message: String },

    #[error("Invalid handle: {handle}")]
    InvalidHandle { handle: String },

    #[error("No node for handle: {handle}")]
    NodeNotFound { handle: String },

    #[error("Invalid point id: {id}")]
    InvalidPointId { id: String },

    #[error("Rebuild already in progress")]
    RebuildInProgress,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for a per-node structural failure
    pub fn malformed(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedNode {
            node: node.into(),
            message: message.into(),
        }
    }
}
