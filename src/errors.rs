//! Error types for rapid_wordgraph
//!
//! This module defines the error types used throughout the library.
//! An unreachable target is not an error: path queries return an empty
//! result instead, so callers can tell "no route" apart from "unknown word".

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordGraphError>;

/// Main error type for rapid_wordgraph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordGraphError {
    /// One or more queried words are not vertices of the graph
    #[error("Word(s) not in graph: {}", .words.join(", "))]
    NodeNotFound { words: Vec<String> },

    /// The corpus produced a graph with no nodes
    #[error("Empty corpus: {message}")]
    EmptyCorpus { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Writing a walk or a graph dump failed
    #[error("I/O error: {message}")]
    Io { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WordGraphError {
    /// Create a node-not-found error for the given missing words
    pub fn node_not_found<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NodeNotFound {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an empty corpus error
    pub fn empty_corpus(message: impl Into<String>) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error means a queried word is absent from the graph
    pub fn is_node_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }
}

impl From<serde_json::Error> for WordGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for WordGraphError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
