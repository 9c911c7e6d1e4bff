//! Word-adjacency graph construction and storage
//!
//! - [`builder`]: mutable, append-only construction from a word stream
//! - [`digraph`]: the immutable [`WordGraph`](digraph::WordGraph) queried by every stage
//! - [`export`]: adjacency snapshots and text dumps

pub mod builder;
pub mod digraph;
pub mod export;
