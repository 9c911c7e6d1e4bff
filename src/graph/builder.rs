//! Graph builder with efficient edge handling
//!
//! This module provides a mutable, append-only directed graph builder that
//! uses FxHashMap for O(1) node and edge lookups during construction. Node
//! IDs and each node's edge list follow first-observation order, so the same
//! corpus always yields the same graph.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Corpora with fewer tokens than this are built sequentially
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Adjacent-pair count handled by one parallel task
const PAIRS_PER_CHUNK: usize = 512;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The normalized word for this node
    pub word: String,
    /// Outgoing edges in discovery order: (target node ID, weight)
    pub edges: Vec<(u32, u32)>,
    /// Target node ID -> position in `edges`
    edge_index: FxHashMap<u32, usize>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
        }
    }

    /// Weight of the edge to `to`, if present
    pub fn weight_to(&self, to: u32) -> Option<u32> {
        self.edge_index.get(&to).map(|&pos| self.edges[pos].1)
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    /// Maps word -> node ID
    word_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
    /// Number of distinct directed edges
    edge_count: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            word_to_id: FxHashMap::default(),
            nodes: Vec::new(),
            edge_count: 0,
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            word_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Get or create a node for the given word, returning its ID
    pub fn get_or_create_node(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.word_to_id.insert(word.to_string(), id);
        self.nodes.push(BuilderNode::new(word));
        id
    }

    /// Record one more observation of `from` immediately followed by `to`
    ///
    /// Identical words are ignored, and no node is created for them: a node
    /// exists only once it has an incident edge.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_edge_weighted(from, to, 1);
    }

    /// Add `weight` observations of the ordered pair `from -> to`
    pub fn add_edge_weighted(&mut self, from: &str, to: &str, weight: u32) {
        if from == to || weight == 0 {
            return;
        }
        let from_id = self.get_or_create_node(from);
        let to_id = self.get_or_create_node(to);
        self.increment_edge(from_id, to_id, weight);
    }

    /// Increment the edge weight between two existing nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    /// If it exists, the weight is added to the existing weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: u32) {
        if from == to || to as usize >= self.nodes.len() {
            return; // No self-loops
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            match node.edge_index.get(&to) {
                Some(&pos) => node.edges[pos].1 += weight,
                None => {
                    node.edge_index.insert(to, node.edges.len());
                    node.edges.push((to, weight));
                    self.edge_count += 1;
                }
            }
        }
    }

    /// Build a graph from a word sequence, one edge per adjacent pair
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut builder = Self::with_capacity(words.len() / 2);
        for pair in words.windows(2) {
            builder.add_edge(pair[0].as_ref(), pair[1].as_ref());
        }
        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct directed edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by word
    pub fn get_node_id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Get the word for a node ID
    pub fn get_word(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.word.as_str())
    }

    /// Weight of `from -> to`, if the edge exists
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<u32> {
        let from_id = self.get_node_id(from)?;
        let to_id = self.get_node_id(to)?;
        self.nodes[from_id as usize].weight_to(to_id)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build a graph from words, in parallel for large corpora
///
/// Uses [`PARALLEL_THRESHOLD`] to decide between the two paths.
pub fn build_graph_parallel<S: AsRef<str> + Sync>(words: &[S]) -> GraphBuilder {
    build_graph_parallel_with_threshold(words, PARALLEL_THRESHOLD)
}

/// Build a graph from words, in parallel when `words.len() >= threshold`
///
/// The pair stream is split into chunks; each chunk counts its pairs in
/// first-seen order, and partial counts are merged in chunk order. Merging
/// that way reproduces the sequential builder exactly, including node IDs
/// and edge order.
pub fn build_graph_parallel_with_threshold<S: AsRef<str> + Sync>(
    words: &[S],
    threshold: usize,
) -> GraphBuilder {
    // For small documents, sequential is faster
    if words.len() < threshold || words.len() < 2 {
        return GraphBuilder::from_words(words);
    }

    let num_pairs = words.len() - 1;
    let chunk_starts: Vec<usize> = (0..num_pairs).step_by(PAIRS_PER_CHUNK).collect();

    let partial_counts: Vec<Vec<(&str, &str, u32)>> = chunk_starts
        .par_iter()
        .map(|&start| {
            let end = (start + PAIRS_PER_CHUNK).min(num_pairs);
            let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
            let mut counts: Vec<(&str, &str, u32)> = Vec::new();

            for i in start..end {
                let a = words[i].as_ref();
                let b = words[i + 1].as_ref();
                if a == b {
                    continue;
                }
                match index.get(&(a, b)) {
                    Some(&pos) => counts[pos].2 += 1,
                    None => {
                        index.insert((a, b), counts.len());
                        counts.push((a, b, 1));
                    }
                }
            }
            counts
        })
        .collect();

    let mut builder = GraphBuilder::with_capacity(words.len() / 2);
    for partial in partial_counts {
        for (a, b, weight) in partial {
            builder.add_edge_weighted(a, b, weight);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");
        let id_c = builder.get_or_create_node("machine"); // duplicate

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_edge_incrementing_is_directed() {
        let mut builder = GraphBuilder::new();

        builder.add_edge("machine", "learning");
        builder.add_edge("machine", "learning");

        assert_eq!(builder.edge_weight("machine", "learning"), Some(2));
        assert_eq!(builder.edge_weight("learning", "machine"), None);
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("test", "test");

        // No node without an incident edge
        assert!(builder.is_empty());

        let id = builder.get_or_create_node("test");
        builder.increment_edge(id, id, 1);
        assert!(builder.get_node(id).unwrap().edges.is_empty());
    }

    #[test]
    fn test_from_words_counts_adjacent_pairs() {
        let builder = GraphBuilder::from_words(&words("the cat sat on the mat the cat ran"));

        assert_eq!(builder.edge_weight("the", "cat"), Some(2));
        assert_eq!(builder.edge_weight("cat", "sat"), Some(1));
        assert_eq!(builder.edge_weight("cat", "ran"), Some(1));
        assert_eq!(builder.edge_weight("mat", "the"), Some(1));
        assert_eq!(builder.node_count(), 6);
    }

    #[test]
    fn test_discovery_order() {
        let builder = GraphBuilder::from_words(&words("a b a c a b"));

        let a = builder.get_node_id("a").unwrap();
        assert_eq!(a, 0);
        let targets: Vec<&str> = builder
            .get_node(a)
            .unwrap()
            .edges
            .iter()
            .map(|&(t, _)| builder.get_word(t).unwrap())
            .collect();
        assert_eq!(targets, vec!["b", "c"]);
        assert_eq!(builder.edge_weight("a", "b"), Some(2));
    }

    #[test]
    fn test_repeated_words_skip_self_loop_only() {
        let builder = GraphBuilder::from_words(&words("go go go now"));

        assert_eq!(builder.edge_weight("go", "now"), Some(1));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vocab = [
            "alpha", "beta", "gamma", "delta", "beta", "alpha", "alpha", "omega",
        ];
        let corpus: Vec<String> = (0..3000)
            .map(|i| vocab[(i * 7 + i / 3) % vocab.len()].to_string())
            .collect();

        let sequential = GraphBuilder::from_words(&corpus);
        let parallel = build_graph_parallel_with_threshold(&corpus, 100);

        assert_eq!(sequential.node_count(), parallel.node_count());
        assert_eq!(sequential.edge_count(), parallel.edge_count());
        for (id, node) in sequential.nodes() {
            let other = parallel.get_node(id).unwrap();
            assert_eq!(node.word, other.word);
            assert_eq!(node.edges, other.edges);
        }
    }

    #[test]
    fn test_parallel_small_input_falls_back() {
        let builder = build_graph_parallel(&words("one two"));
        assert_eq!(builder.edge_weight("one", "two"), Some(1));

        let empty: Vec<String> = Vec::new();
        assert!(build_graph_parallel_with_threshold(&empty, 2).is_empty());
    }
}
