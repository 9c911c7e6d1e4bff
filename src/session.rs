//! Session facade: one corpus graph, one config, one RNG.
//!
//! [`WordGraphSession`] builds the graph once from a corpus and then serves
//! every query against that same immutable graph. The randomized queries
//! (augmentation and walks) draw from a session-owned `StdRng`, seeded from
//! [`WordGraphConfig::seed`] when set, so a seeded session replays exactly.

use crate::errors::Result;
use crate::graph::builder::build_graph_parallel_with_threshold;
use crate::graph::digraph::WordGraph;
use crate::graph::export::GraphSnapshot;
use crate::nlp::tokenizer::Tokenizer;
use crate::query::augment::{apply_insertions, TextAugmenter};
use crate::query::bridge::find_bridge_words;
use crate::query::shortest_path::all_shortest_paths;
use crate::query::walk::{RandomWalker, WalkSink};
use crate::types::{Walk, WordGraphConfig, WordPath};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a session stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("session_stage", stage = $name).entered();
    };
}

/// A corpus graph plus everything needed to query it
#[derive(Debug, Clone)]
pub struct WordGraphSession {
    config: WordGraphConfig,
    graph: WordGraph,
    rng: StdRng,
}

impl WordGraphSession {
    /// Tokenize `corpus` and build its graph
    ///
    /// An empty corpus is accepted; every lookup against it reports
    /// `NodeNotFound` and walks report `EmptyCorpus`.
    pub fn new(corpus: &str, config: WordGraphConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new().with_min_length(config.min_token_length);

        let words = {
            trace_stage!("tokenize");
            tokenizer.words(corpus)
        };

        let graph = {
            trace_stage!("build_graph");
            let builder = build_graph_parallel_with_threshold(&words, config.parallel_threshold);
            WordGraph::from_builder(&builder)
        };

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                tokens = words.len(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "corpus graph built"
            );
            if graph.is_empty() {
                tracing::warn!("corpus produced no graph nodes");
            }
        }

        Ok(Self::assemble(graph, config))
    }

    /// Wrap an already-built graph
    pub fn from_graph(graph: WordGraph, config: WordGraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(graph, config))
    }

    fn assemble(graph: WordGraph, config: WordGraphConfig) -> Self {
        Self {
            rng: match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
            config,
            graph,
        }
    }

    /// Normalize one query word the way corpus text is normalized
    ///
    /// Input that tokenizes into anything other than exactly one word (such
    /// as `don't`, which the corpus splits into `don` and `t`) is only trimmed
    /// and lowercased, so it never matches a vertex.
    fn query_word(word: &str) -> String {
        match Tokenizer::new().words(word).as_slice() {
            [single] => single.clone(),
            _ => word.trim().to_lowercase(),
        }
    }

    /// The corpus graph
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// The active configuration
    pub fn config(&self) -> &WordGraphConfig {
        &self.config
    }

    /// Node -> weighted-edges mapping of the corpus graph
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from_graph(&self.graph)
    }

    /// Bridge words from `word1` to `word2`
    ///
    /// Each query word is normalized like corpus text (surrounding
    /// punctuation dropped, lowercased) and must come out as a single word.
    /// Words shorter than `min_token_length` are not vertices and are
    /// reported as `NodeNotFound`.
    pub fn bridge_words(&self, word1: &str, word2: &str) -> Result<Vec<String>> {
        trace_stage!("bridge_words");
        let a = Self::query_word(word1);
        let b = Self::query_word(word2);
        let bridges = find_bridge_words(&self.graph, &a, &b)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(from = %a, to = %b, found = bridges.len(), "bridge lookup");

        Ok(bridges.into_iter().map(String::from).collect())
    }

    /// Rewrite `text`, inserting a random bridge word into every bridgeable pair
    ///
    /// `text` is split without the corpus minimum token length, so every word
    /// of the input survives into the output.
    pub fn generate_new_text(&mut self, text: &str) -> Vec<String> {
        trace_stage!("generate");
        let augmenter = TextAugmenter::new(&self.graph);
        let words = Tokenizer::new().words(text);
        let insertions = augmenter.plan(&words, &mut self.rng);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            words = words.len(),
            inserted = insertions.len(),
            "text augmented"
        );

        apply_insertions(&words, &insertions)
    }

    /// Every least-weight path from `source` to `target`
    ///
    /// Query words are normalized as in [`Self::bridge_words`].
    pub fn shortest_paths(&self, source: &str, target: &str) -> Result<Vec<WordPath>> {
        trace_stage!("shortest_paths");
        let a = Self::query_word(source);
        let b = Self::query_word(target);
        let paths = all_shortest_paths(&self.graph, &a, &b)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = %a,
            to = %b,
            paths = paths.len(),
            cost = paths.first().map(|p| p.cost),
            "shortest paths"
        );

        Ok(paths)
    }

    /// One random walk under the configured edge policy
    pub fn random_walk(&mut self) -> Result<Walk> {
        trace_stage!("random_walk");
        let walk = RandomWalker::new(&self.graph)
            .with_edge_selection(self.config.edge_selection)
            .walk(&mut self.rng)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(steps = walk.steps(), stop = ?walk.stop, "random walk");

        Ok(walk)
    }

    /// One random walk, also handed to `sink`
    pub fn random_walk_into<S: WalkSink + ?Sized>(&mut self, sink: &mut S) -> Result<Walk> {
        let walk = self.random_walk()?;
        sink.write_walk(&walk)?;
        Ok(walk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WordGraphError;
    use crate::query::walk::WriterSink;
    use crate::types::EdgeSelection;

    const CORPUS: &str = "the cat sat on the mat the cat ran";

    fn session(config: WordGraphConfig) -> WordGraphSession {
        WordGraphSession::new(CORPUS, config).unwrap()
    }

    #[test]
    fn test_session_queries() {
        let session = session(WordGraphConfig::default());

        assert_eq!(session.graph().node_count(), 6);
        assert_eq!(session.bridge_words("The", " sat ").unwrap(), vec!["cat"]);
        let paths = session.shortest_paths("cat", "mat").unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].cost, 4);
    }

    #[test]
    fn test_query_words_normalized_like_corpus() {
        let config = WordGraphConfig::default();
        let session = WordGraphSession::new("Don't stop", config).unwrap();

        // The corpus holds "don" -> "t" -> "stop"
        assert_eq!(session.bridge_words("Don", "stop!").unwrap(), vec!["t"]);
        let paths = session.shortest_paths("\"don\"", "STOP").unwrap();
        assert_eq!(paths[0].arrow_joined(), "don -> t -> stop");

        match session.bridge_words("don't", "stop") {
            Err(WordGraphError::NodeNotFound { words }) => assert_eq!(words, vec!["don't"]),
            other => panic!("expected NodeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_short_query_words_are_not_vertices() {
        let session = session(WordGraphConfig::default().with_min_token_length(3));

        assert!(!session.graph().has_node("on"));
        let err = session.bridge_words("sat", "on").unwrap_err();
        assert!(err.is_node_not_found());
    }

    #[test]
    fn test_seeded_sessions_replay() {
        let config = WordGraphConfig::default()
            .with_seed(11)
            .with_edge_selection(EdgeSelection::Weighted);
        let mut a = session(config.clone());
        let mut b = session(config);

        assert_eq!(a.random_walk().unwrap(), b.random_walk().unwrap());
        let text = "the sat";
        assert_eq!(a.generate_new_text(text), b.generate_new_text(text));
    }

    #[test]
    fn test_generate_inserts_bridge() {
        let mut session = session(WordGraphConfig::default());
        assert_eq!(
            session.generate_new_text("The sat; on mat!"),
            vec!["the", "cat", "sat", "on", "the", "mat"]
        );
    }

    #[test]
    fn test_generate_keeps_short_words() {
        let mut session = session(WordGraphConfig::default().with_min_token_length(3));

        // "on" is not a vertex, but it is part of the text being rewritten
        assert_eq!(
            session.generate_new_text("the sat on a mat"),
            vec!["the", "cat", "sat", "on", "a", "mat"]
        );
    }

    #[test]
    fn test_empty_corpus() {
        let config = WordGraphConfig::default();
        let mut session = WordGraphSession::new("  ", config).unwrap();

        let err = session.bridge_words("a", "b").unwrap_err();
        assert!(err.is_node_not_found());
        let err = session.shortest_paths("a", "b").unwrap_err();
        assert!(err.is_node_not_found());
        assert!(matches!(
            session.random_walk(),
            Err(WordGraphError::EmptyCorpus { .. })
        ));
        assert_eq!(session.generate_new_text("a b"), vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WordGraphConfig::default().with_min_token_length(0);
        assert!(WordGraphSession::new(CORPUS, config).is_err());
    }

    #[test]
    fn test_walk_into_sink() {
        let mut session = session(WordGraphConfig::default().with_seed(3));
        let mut sink = WriterSink::new(Vec::new());
        let walk = session.random_walk_into(&mut sink).unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, format!("{}\n", walk.sentence()));
    }
}
