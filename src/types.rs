//! Core types for rapid_wordgraph
//!
//! This module defines the plain data handed back to callers (tokens, paths,
//! walks) and the configuration shared by every stage.

use crate::errors::{Result, WordGraphError};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Token
// ============================================================================

/// A token from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// The normalized form (lowercase); this is the graph vertex identity
    pub word: String,
    /// Byte offset (start) in original text
    pub start: usize,
    /// Byte offset (end) in original text
    pub end: usize,
    /// Token index within the document
    pub token_idx: usize,
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        word: impl Into<String>,
        start: usize,
        end: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            word: word.into(),
            start,
            end,
            token_idx,
        }
    }
}

// ============================================================================
// Paths & Walks
// ============================================================================

/// A path through the graph together with its total edge weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPath {
    /// Visited words, source first
    pub words: Vec<String>,
    /// Sum of traversed edge weights
    pub cost: u64,
}

impl WordPath {
    /// Create a new path
    pub fn new(words: Vec<String>, cost: u64) -> Self {
        Self { words, cost }
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Render as `a -> b -> c`
    pub fn arrow_joined(&self) -> String {
        self.words.join(" -> ")
    }
}

/// Why a random walk stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum WalkStop {
    /// The last node has no outgoing edges
    DeadEnd,
    /// The directed edge `from -> to` was drawn a second time
    RepeatedEdge { from: String, to: String },
}

/// The result of a random walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walk {
    /// Visited words in order; a repeated edge's destination appears once more at the end
    pub words: Vec<String>,
    /// Termination reason
    pub stop: WalkStop,
}

impl Walk {
    /// Space-joined form, as persisted by walk sinks
    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }

    /// Number of edges drawn during the walk
    pub fn steps(&self) -> usize {
        self.words.len().saturating_sub(1)
    }
}

// ============================================================================
// Edge Selection
// ============================================================================

/// How the random walker chooses among outgoing edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSelection {
    /// Every distinct outgoing edge is equally likely
    #[default]
    Uniform,
    /// Edges are drawn proportionally to their co-occurrence weight
    Weighted,
}

impl EdgeSelection {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "weighted" | "weight" | "frequency" => EdgeSelection::Weighted,
            _ => EdgeSelection::Uniform,
        }
    }
}

impl std::str::FromStr for EdgeSelection {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(EdgeSelection::parse(value))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for graph construction and the randomized queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordGraphConfig {
    /// Corpus tokens shorter than this many characters are dropped
    ///
    /// Applies to the corpus only: such words never become vertices, but
    /// text passed to augmentation keeps them, so no word of the input is lost.
    pub min_token_length: usize,
    /// Seed for the session RNG (None = OS entropy)
    pub seed: Option<u64>,
    /// Next-edge policy for random walks
    pub edge_selection: EdgeSelection,
    /// Token count at which graph construction switches to the parallel builder
    pub parallel_threshold: usize,
}

impl Default for WordGraphConfig {
    fn default() -> Self {
        Self {
            min_token_length: 1,
            seed: None,
            edge_selection: EdgeSelection::Uniform,
            parallel_threshold: 1000,
        }
    }
}

impl WordGraphConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(WordGraphError::invalid_config(
                "min_token_length must be > 0",
            ));
        }

        if self.parallel_threshold < 2 {
            return Err(WordGraphError::invalid_config(
                "parallel_threshold must be >= 2",
            ));
        }

        Ok(())
    }

    /// Builder method: set minimum token length
    pub fn with_min_token_length(mut self, min_token_length: usize) -> Self {
        self.min_token_length = min_token_length;
        self
    }

    /// Builder method: fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the walk edge selection policy
    pub fn with_edge_selection(mut self, selection: EdgeSelection) -> Self {
        self.edge_selection = selection;
        self
    }

    /// Builder method: set the parallel build threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
