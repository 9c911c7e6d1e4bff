//! Queries over a built word graph
//!
//! - [`bridge`]: words linking an ordered pair in two hops
//! - [`augment`]: inserting bridge words into new text
//! - [`shortest_path`]: every least-weight path between two words
//! - [`walk`]: random walks and walk sinks

pub mod augment;
pub mod bridge;
pub mod shortest_path;
pub mod walk;
