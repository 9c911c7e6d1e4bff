//! Immutable weighted word graph
//!
//! [`WordGraph`] is the read-only form of a [`GraphBuilder`]. Outgoing and
//! incoming edges are stored in compressed (offset + flat array) form, so
//! successor and predecessor lookups are plain slices. The graph has no
//! interior mutability and is `Sync`; concurrent read-only queries need no
//! locking.

use crate::graph::builder::{
    build_graph_parallel_with_threshold, GraphBuilder, PARALLEL_THRESHOLD,
};
use crate::nlp::tokenizer::Tokenizer;
use rustc_hash::FxHashMap;

/// A directed graph over words with integer co-occurrence weights
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    /// Node ID -> word
    words: Vec<String>,
    /// Word -> node ID
    word_to_id: FxHashMap<String, u32>,
    /// `out_edges[out_offsets[i]..out_offsets[i + 1]]` are the edges leaving node i
    out_offsets: Vec<usize>,
    out_edges: Vec<(u32, u32)>,
    /// `in_edges[in_offsets[i]..in_offsets[i + 1]]` are the edges entering node i
    in_offsets: Vec<usize>,
    in_edges: Vec<(u32, u32)>,
    /// (source, target) -> weight
    weights: FxHashMap<(u32, u32), u32>,
}

impl WordGraph {
    /// Freeze a builder into a read-only graph
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let n = builder.node_count();
        let mut words = Vec::with_capacity(n);
        let mut word_to_id = FxHashMap::with_capacity_and_hasher(n, Default::default());
        let mut out_offsets = Vec::with_capacity(n + 1);
        let mut out_edges = Vec::with_capacity(builder.edge_count());
        let mut weights =
            FxHashMap::with_capacity_and_hasher(builder.edge_count(), Default::default());
        let mut in_degree = vec![0usize; n];

        out_offsets.push(0);
        for (id, node) in builder.nodes() {
            words.push(node.word.clone());
            word_to_id.insert(node.word.clone(), id);
            for &(target, weight) in &node.edges {
                out_edges.push((target, weight));
                weights.insert((id, target), weight);
                in_degree[target as usize] += 1;
            }
            out_offsets.push(out_edges.len());
        }

        // Incoming edges, grouped by target, sources in ID order
        let mut in_offsets = Vec::with_capacity(n + 1);
        in_offsets.push(0);
        for degree in &in_degree {
            let last = in_offsets[in_offsets.len() - 1];
            in_offsets.push(last + degree);
        }
        let mut cursor = in_offsets.clone();
        let mut in_edges = vec![(0u32, 0u32); out_edges.len()];
        for source in 0..n {
            for &(target, weight) in &out_edges[out_offsets[source]..out_offsets[source + 1]] {
                let slot = &mut cursor[target as usize];
                in_edges[*slot] = (source as u32, weight);
                *slot += 1;
            }
        }

        Self {
            words,
            word_to_id,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
            weights,
        }
    }

    /// Build a graph from an already-normalized word sequence
    pub fn from_words<S: AsRef<str> + Sync>(words: &[S]) -> Self {
        Self::from_builder(&build_graph_parallel_with_threshold(words, PARALLEL_THRESHOLD))
    }

    /// Tokenize raw text with the default tokenizer and build its graph
    pub fn from_text(text: &str) -> Self {
        Self::from_words(&Tokenizer::new().words(text))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.words.len()
    }

    /// Number of distinct directed edges
    pub fn edge_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Sum of all edge weights (the number of counted adjacencies)
    pub fn total_weight(&self) -> u64 {
        self.out_edges.iter().map(|&(_, w)| u64::from(w)).sum()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether `word` is a vertex
    pub fn has_node(&self, word: &str) -> bool {
        self.word_to_id.contains_key(word)
    }

    /// Node ID for a word
    pub fn node_id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Word for a node ID
    pub fn word(&self, id: u32) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    /// Outgoing (target, weight) pairs of a node, in discovery order
    pub fn successors(&self, id: u32) -> &[(u32, u32)] {
        let i = id as usize;
        if i >= self.words.len() {
            return &[];
        }
        &self.out_edges[self.out_offsets[i]..self.out_offsets[i + 1]]
    }

    /// Incoming (source, weight) pairs of a node, sorted by source ID
    pub fn predecessors(&self, id: u32) -> &[(u32, u32)] {
        let i = id as usize;
        if i >= self.words.len() {
            return &[];
        }
        &self.in_edges[self.in_offsets[i]..self.in_offsets[i + 1]]
    }

    /// Weight of the edge `from -> to` by node ID
    pub fn edge_weight_by_id(&self, from: u32, to: u32) -> Option<u32> {
        self.weights.get(&(from, to)).copied()
    }

    /// Weight of the edge `from -> to`
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<u32> {
        self.edge_weight_by_id(self.node_id(from)?, self.node_id(to)?)
    }

    /// Check whether the edge `from -> to` exists
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Outgoing (word, weight) pairs; empty if `word` is absent
    pub fn neighbors(&self, word: &str) -> Vec<(&str, u32)> {
        let Some(id) = self.node_id(word) else {
            return Vec::new();
        };
        self.successors(id)
            .iter()
            .map(|&(t, w)| (self.label(t), w))
            .collect()
    }

    /// All words, in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// All edges as (source, target, weight), grouped by source in discovery order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        (0..self.words.len() as u32).flat_map(move |source| {
            let from = self.label(source);
            self.successors(source)
                .iter()
                .map(move |&(target, weight)| (from, self.label(target), weight))
        })
    }

    fn label(&self, id: u32) -> &str {
        self.words[id as usize].as_str()
    }

    /// Adjacency listing: every word with its outgoing (word, weight) pairs
    pub fn to_adjacency(&self) -> Vec<(&str, Vec<(&str, u32)>)> {
        self.nodes().map(|word| (word, self.neighbors(word))).collect()
    }

    /// Depth-first visiting order over the whole graph
    ///
    /// Roots are taken in discovery order; from each root, successors are
    /// followed in edge order and each node is emitted the first time it is
    /// reached.
    pub fn dfs_order(&self) -> Vec<&str> {
        let n = self.words.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        // (node, next successor position)
        let mut stack: Vec<(u32, usize)> = Vec::new();

        for root in 0..n as u32 {
            if visited[root as usize] {
                continue;
            }
            visited[root as usize] = true;
            order.push(self.words[root as usize].as_str());
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, pos) = *frame;
                let succ = self.successors(node);
                if pos >= succ.len() {
                    stack.pop();
                    continue;
                }
                frame.1 += 1;
                let next = succ[pos].0;
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    order.push(self.words[next as usize].as_str());
                    stack.push((next, 0));
                }
            }
        }

        order
    }
}

impl From<GraphBuilder> for WordGraph {
    fn from(builder: GraphBuilder) -> Self {
        Self::from_builder(&builder)
    }
}
