//! Plain-data views of a graph
//!
//! [`GraphSnapshot`] is the node -> weighted-edges mapping handed to
//! presentation layers; it serializes to JSON. The two text dumps write one
//! word per line and one `source target weight` triple per line.

use crate::errors::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::digraph::WordGraph;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One outgoing edge in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub target: String,
    pub weight: u32,
}

/// One node with its outgoing edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub word: String,
    pub edges: Vec<SnapshotEdge>,
}

/// Adjacency mapping of a whole graph, nodes in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

impl GraphSnapshot {
    /// Capture the adjacency of `graph`
    pub fn from_graph(graph: &WordGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|word| SnapshotNode {
                word: word.to_string(),
                edges: graph
                    .neighbors(word)
                    .into_iter()
                    .map(|(target, weight)| SnapshotEdge {
                        target: target.to_string(),
                        weight,
                    })
                    .collect(),
            })
            .collect();
        Self { nodes }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the graph this snapshot was taken from
    ///
    /// Node order follows the snapshot. Entries without a usable incident
    /// edge (none listed, zero weight, or only a self-edge) are dropped, so
    /// every vertex of the result has at least one edge.
    pub fn to_graph(&self) -> WordGraph {
        let mut incident: FxHashSet<&str> = FxHashSet::default();
        for node in &self.nodes {
            for edge in &node.edges {
                if edge.weight > 0 && edge.target != node.word {
                    incident.insert(&node.word);
                    incident.insert(&edge.target);
                }
            }
        }

        let mut builder = GraphBuilder::with_capacity(incident.len());
        for node in &self.nodes {
            if incident.contains(node.word.as_str()) {
                builder.get_or_create_node(&node.word);
            }
        }
        for node in &self.nodes {
            for edge in &node.edges {
                builder.add_edge_weighted(&node.word, &edge.target, edge.weight);
            }
        }
        WordGraph::from_builder(&builder)
    }
}

/// Write every node, one word per line
pub fn write_nodes<W: Write>(graph: &WordGraph, mut out: W) -> Result<()> {
    for word in graph.nodes() {
        writeln!(out, "{word}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write every edge as `source target weight`, one per line
pub fn write_edge_list<W: Write>(graph: &WordGraph, mut out: W) -> Result<()> {
    for (source, target, weight) in graph.edges() {
        writeln!(out, "{source} {target} {weight}")?;
    }
    out.flush()?;
    Ok(())
}
