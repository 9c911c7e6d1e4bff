//! Bridge-word lookup
//!
//! A bridge word `w` for the ordered pair `(a, b)` is any word with edges
//! `a -> w` and `w -> b`, i.e. the middle vertex of a three-vertex path.
//! Lookup intersects the successors of `a` with the predecessors of `b`;
//! predecessors are sorted by node ID, so each successor costs one binary
//! search.

use crate::errors::{Result, WordGraphError};
use crate::graph::digraph::WordGraph;

/// Find every bridge word between `word1` and `word2`
///
/// Returns `NodeNotFound` (listing the absent words) when either word is
/// not a vertex, and an empty vector when both exist but nothing connects
/// them in two hops. Results follow the edge order of `word1`'s successors.
pub fn find_bridge_words<'g>(
    graph: &'g WordGraph,
    word1: &str,
    word2: &str,
) -> Result<Vec<&'g str>> {
    let (from, to) = resolve_pair(graph, word1, word2)?;
    Ok(bridge_ids(graph, from, to)
        .filter_map(|id| graph.word(id))
        .collect())
}

/// Bridge node IDs between two known node IDs, in `from`'s edge order
pub(crate) fn bridge_ids(
    graph: &WordGraph,
    from: u32,
    to: u32,
) -> impl Iterator<Item = u32> + '_ {
    let into_target = graph.predecessors(to);
    graph
        .successors(from)
        .iter()
        .map(|&(mid, _)| mid)
        .filter(move |mid| into_target.binary_search_by_key(mid, |&(s, _)| s).is_ok())
}

/// Look up both words, reporting every absent one
pub(crate) fn resolve_pair(graph: &WordGraph, word1: &str, word2: &str) -> Result<(u32, u32)> {
    match (graph.node_id(word1), graph.node_id(word2)) {
        (Some(a), Some(b)) => Ok((a, b)),
        (a, b) => {
            let mut missing = Vec::new();
            if a.is_none() {
                missing.push(word1);
            }
            if b.is_none() && (word2 != word1 || a.is_some()) {
                missing.push(word2);
            }
            Err(WordGraphError::node_not_found(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "To explore strange new worlds, to seek out new life and new \
                          civilizations, to boldly go where no one has gone before. \
                          We went to find out the truth.";

    #[test]
    fn test_single_bridge() {
        let graph = WordGraph::from_text(CORPUS);
        let bridges = find_bridge_words(&graph, "to", "strange").unwrap();
        assert_eq!(bridges, vec!["explore"]);
    }

    #[test]
    fn test_multiple_bridges_in_discovery_order() {
        let graph = WordGraph::from_text(CORPUS);
        let bridges = find_bridge_words(&graph, "to", "out").unwrap();
        assert_eq!(bridges, vec!["seek", "find"]);
    }

    #[test]
    fn test_no_bridge_is_empty_not_error() {
        let graph = WordGraph::from_text(CORPUS);
        let bridges = find_bridge_words(&graph, "out", "explore").unwrap();
        assert!(bridges.is_empty());
    }

    #[test]
    fn test_bridges_need_edge_into_target() {
        // "b" and "c" both follow "a"; only "c" also precedes "d"
        let graph = WordGraph::from_text("a b x d a c d c b");
        let d = graph.node_id("d").unwrap();
        let preds: Vec<&str> = graph
            .predecessors(d)
            .iter()
            .map(|&(s, _)| graph.word(s).unwrap())
            .collect();
        assert_eq!(preds, vec!["x", "c"]);

        let bridges = find_bridge_words(&graph, "a", "d").unwrap();
        assert_eq!(bridges, vec!["c"]);
    }

    #[test]
    fn test_missing_words() {
        let graph = WordGraph::from_text(CORPUS);

        let err = find_bridge_words(&graph, "x", "to").unwrap_err();
        assert_eq!(err, WordGraphError::node_not_found(["x"]));

        let err = find_bridge_words(&graph, "to", "y").unwrap_err();
        assert_eq!(err, WordGraphError::node_not_found(["y"]));

        let err = find_bridge_words(&graph, "x", "y").unwrap_err();
        assert_eq!(err, WordGraphError::node_not_found(["x", "y"]));

        let err = find_bridge_words(&graph, "x", "x").unwrap_err();
        assert_eq!(err, WordGraphError::node_not_found(["x"]));
    }

    #[test]
    fn test_cat_corpus() {
        let graph = WordGraph::from_text("the cat sat on the mat the cat ran");
        let bridges = |a: &str, b: &str| find_bridge_words(&graph, a, b).unwrap();

        assert_eq!(bridges("the", "sat"), vec!["cat"]);
        assert_eq!(bridges("the", "ran"), vec!["cat"]);
        assert_eq!(bridges("on", "mat"), vec!["the"]);
    }

    #[test]
    fn test_empty_graph_degrades_to_not_found() {
        let graph = WordGraph::from_text("");
        let err = find_bridge_words(&graph, "a", "b").unwrap_err();
        assert!(err.is_node_not_found());
    }
}
