//! Text normalization and word splitting
//!
//! Every maximal run of non-alphanumeric characters (punctuation, hyphens,
//! whitespace, line breaks) separates words. Alphanumeric is judged by
//! Unicode properties, so accented Latin and CJK characters stay inside words.
//! Lowercasing can expand a letter into a base letter plus a combining mark
//! (`İ` becomes `i` + U+0307); such marks are dropped so every normalized word
//! is purely alphanumeric.

use crate::types::Token;

/// A tokenizer producing lowercase words
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Minimum token length (in chars) to keep
    min_token_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a new tokenizer with default settings
    pub fn new() -> Self {
        Self {
            min_token_length: 1,
        }
    }

    /// Set minimum token length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length.max(1);
        self
    }

    /// Tokenize text, keeping surface forms and byte offsets
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run_start: Option<usize> = None;

        for (idx, c) in text.char_indices() {
            match (c.is_alphanumeric(), run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    self.push_token(text, start, idx, &mut tokens);
                    run_start = None;
                }
                _ => {}
            }
        }

        // Handle last run
        if let Some(start) = run_start {
            self.push_token(text, start, text.len(), &mut tokens);
        }

        tokens
    }

    /// Tokenize text into normalized words only
    pub fn words(&self, text: &str) -> Vec<String> {
        self.tokenize(text).into_iter().map(|t| t.word).collect()
    }

    fn push_token(&self, text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        let surface = &text[start..end];
        if surface.chars().count() < self.min_token_length {
            return;
        }

        let word = Self::normalize(surface);
        if word.is_empty() {
            return;
        }
        let token_idx = tokens.len();
        tokens.push(Token::new(surface, word, start, end, token_idx));
    }

    /// Lowercase a single word, keeping only alphanumeric chars; no stemming
    pub fn normalize(word: &str) -> String {
        word.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect()
    }
}
