//! # rapid_wordgraph
//!
//! Word-adjacency graph analysis over free-form text.
//!
//! A corpus is normalized into lowercase words and turned into a directed
//! graph whose edge `a -> b` counts how often `b` immediately follows `a`.
//! The graph is built once and then queried read-only.
//!
//! ## Features
//!
//! - **Bridge words**: every `w` with `a -> w -> b`
//! - **Text augmentation**: insert a random bridge word into each bridgeable pair
//! - **Shortest paths**: all least-weight paths between two words, ties included
//! - **Random walks**: stop at a dead end or on the first repeated edge
//!
//! ## Example
//!
//! ```
//! use rapid_wordgraph::{WordGraphConfig, WordGraphSession};
//!
//! let session = WordGraphSession::new(
//!     "the cat sat on the mat the cat ran",
//!     WordGraphConfig::default().with_seed(7),
//! )
//! .unwrap();
//!
//! assert_eq!(session.bridge_words("the", "sat").unwrap(), vec!["cat"]);
//! assert!(session.bridge_words("x", "the").unwrap_err().is_node_not_found());
//! ```

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod query;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, WordGraphError};
pub use types::{EdgeSelection, Token, Walk, WalkStop, WordGraphConfig, WordPath};

// Re-export main functionality
pub use graph::{builder::GraphBuilder, digraph::WordGraph, export::GraphSnapshot};
pub use nlp::tokenizer::Tokenizer;
pub use query::{
    augment::{apply_insertions, Insertion, TextAugmenter},
    bridge::find_bridge_words,
    shortest_path::all_shortest_paths,
    walk::{FileSink, RandomWalker, WalkSink, WriterSink},
};
pub use session::WordGraphSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
