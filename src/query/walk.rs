//! Random walks with repeated-edge termination
//!
//! A walk starts at a uniformly random node and repeatedly follows a random
//! outgoing edge. It stops at a node with no outgoing edges, or right after
//! drawing a directed edge it has already traversed; in the latter case the
//! repeated destination is recorded once more before stopping. Each edge can
//! be traversed at most once without ending the walk, so a walk draws at
//! most `edge_count + 1` edges.

use crate::errors::{Result, WordGraphError};
use crate::graph::digraph::WordGraph;
use crate::types::{EdgeSelection, Walk, WalkStop};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generates random walks over a word graph
#[derive(Debug, Clone)]
pub struct RandomWalker<'g> {
    graph: &'g WordGraph,
    selection: EdgeSelection,
}

impl<'g> RandomWalker<'g> {
    /// Create a walker choosing edges uniformly
    pub fn new(graph: &'g WordGraph) -> Self {
        Self {
            graph,
            selection: EdgeSelection::Uniform,
        }
    }

    /// Set the next-edge policy
    pub fn with_edge_selection(mut self, selection: EdgeSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Walk from a uniformly random start node
    ///
    /// An empty graph has no start node and yields `EmptyCorpus`.
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Walk> {
        let n = self.graph.node_count();
        if n == 0 {
            return Err(WordGraphError::empty_corpus(
                "cannot start a random walk on a graph with no nodes",
            ));
        }
        let start = rng.random_range(0..n) as u32;
        self.walk_from_id(start, rng)
    }

    /// Walk from a given start word
    pub fn walk_from<R: Rng + ?Sized>(&self, start: &str, rng: &mut R) -> Result<Walk> {
        let id = self
            .graph
            .node_id(start)
            .ok_or_else(|| WordGraphError::node_not_found([start]))?;
        self.walk_from_id(id, rng)
    }

    fn walk_from_id<R: Rng + ?Sized>(&self, start: u32, rng: &mut R) -> Result<Walk> {
        let mut path = vec![start];
        let mut traversed: FxHashSet<(u32, u32)> = FxHashSet::default();
        let mut current = start;

        let stop = loop {
            let successors = self.graph.successors(current);
            if successors.is_empty() {
                break WalkStop::DeadEnd;
            }

            let next = successors[self.pick_edge(successors, rng)?].0;
            path.push(next);

            if !traversed.insert((current, next)) {
                break WalkStop::RepeatedEdge {
                    from: self.word(current),
                    to: self.word(next),
                };
            }
            current = next;
        };

        Ok(Walk {
            words: path.into_iter().map(|id| self.word(id)).collect(),
            stop,
        })
    }

    fn pick_edge<R: Rng + ?Sized>(&self, edges: &[(u32, u32)], rng: &mut R) -> Result<usize> {
        match self.selection {
            EdgeSelection::Uniform => Ok(rng.random_range(0..edges.len())),
            EdgeSelection::Weighted => {
                let weights = edges.iter().map(|&(_, w)| w);
                let dist = WeightedIndex::<u32>::new(weights)
                    .map_err(|e| WordGraphError::internal(format!("edge sampler: {e}")))?;
                Ok(dist.sample(rng))
            }
        }
    }

    fn word(&self, id: u32) -> String {
        self.graph.word(id).unwrap_or_default().to_string()
    }
}

// ============================================================================
// Walk sinks
// ============================================================================

/// Destination for a finished walk
pub trait WalkSink {
    /// Persist one walk
    fn write_walk(&mut self, walk: &Walk) -> Result<()>;
}

/// Writes the walk as one line of space-separated words, replacing the file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WalkSink for FileSink {
    fn write_walk(&mut self, walk: &Walk) -> Result<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(walk.sentence().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Writes each walk as a newline-terminated line to any writer
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> WalkSink for WriterSink<W> {
    fn write_walk(&mut self, walk: &Walk) -> Result<()> {
        writeln!(self.writer, "{}", walk.sentence())?;
        self.writer.flush()?;
        Ok(())
    }
}
