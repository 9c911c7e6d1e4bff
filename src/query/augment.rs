//! Text augmentation by bridge-word insertion
//!
//! For every adjacent pair of the input that has at least one bridge word in
//! the corpus graph, one bridge word is drawn uniformly at random and placed
//! between the pair. Original words are never dropped or reordered.

use crate::graph::digraph::WordGraph;
use crate::nlp::tokenizer::Tokenizer;
use crate::query::bridge::bridge_ids;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A planned insertion: `word` goes right after original index `after`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    /// Index (into the original words) of the left word of the trigger pair
    pub after: usize,
    /// The bridge word to insert
    pub word: String,
}

/// Rewrites text by inserting bridge words from a corpus graph
#[derive(Debug, Clone)]
pub struct TextAugmenter<'g> {
    graph: &'g WordGraph,
    tokenizer: Tokenizer,
}

impl<'g> TextAugmenter<'g> {
    /// Create an augmenter over `graph` with the default tokenizer
    pub fn new(graph: &'g WordGraph) -> Self {
        Self {
            graph,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Use a custom tokenizer for the input text
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Decide which bridge word (if any) follows each original position
    ///
    /// Pairs whose words are missing from the graph, or that have no bridge
    /// word, contribute nothing. Insertions come out in ascending `after` order.
    pub fn plan<S, R>(&self, words: &[S], rng: &mut R) -> Vec<Insertion>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut insertions = Vec::new();

        for (i, pair) in words.windows(2).enumerate() {
            let from = self.graph.node_id(pair[0].as_ref());
            let to = self.graph.node_id(pair[1].as_ref());
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };

            let bridges: Vec<u32> = bridge_ids(self.graph, from, to).collect();
            if let Some(&pick) = bridges.choose(rng) {
                if let Some(word) = self.graph.word(pick) {
                    insertions.push(Insertion {
                        after: i,
                        word: word.to_string(),
                    });
                }
            }
        }

        insertions
    }

    /// Tokenize `text` and return it with bridge words inserted
    pub fn generate<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Vec<String> {
        let words = self.tokenizer.words(text);
        let insertions = self.plan(&words, rng);
        apply_insertions(&words, &insertions)
    }
}

/// Apply insertions in one pass over the original words
///
/// Insertions are taken in ascending `after` order (stable for equal
/// indices), so each inserted word lands immediately after its trigger
/// word and every later insertion point shifts right by one. Indices past
/// the end of `words` are appended at the end.
pub fn apply_insertions<S: AsRef<str>>(words: &[S], insertions: &[Insertion]) -> Vec<String> {
    let mut ordered: Vec<&Insertion> = insertions.iter().collect();
    ordered.sort_by_key(|ins| ins.after);

    let mut out = Vec::with_capacity(words.len() + ordered.len());
    let mut pending = ordered.into_iter().peekable();

    for (i, word) in words.iter().enumerate() {
        out.push(word.as_ref().to_string());
        while let Some(ins) = pending.next_if(|ins| ins.after == i) {
            out.push(ins.word.clone());
        }
    }
    out.extend(pending.map(|ins| ins.word.clone()));

    out
}
