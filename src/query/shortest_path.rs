//! All-ties weighted shortest paths
//!
//! Best-first search ordered by accumulated weight. Unlike single-path
//! Dijkstra, a neighbor is re-queued whenever the new cost is *less than or
//! equal to* the best cost recorded for it, so every cost-equal route stays
//! on the frontier. Arrivals at the target are collected instead of ending
//! the search, and the cheapest arrivals are returned.
//!
//! Queue entries are ordered by `(cost, insertion sequence)`; paths are
//! reported in the order they reach the target, which makes the result
//! deterministic for a given graph.

use crate::errors::Result;
use crate::graph::digraph::WordGraph;
use crate::query::bridge::resolve_pair;
use crate::types::WordPath;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node reached along one particular route; the route is the parent chain
#[derive(Debug, Clone, Copy)]
struct Arrival {
    node: u32,
    parent: Option<usize>,
}

/// Every least-cost path from `source` to `target`
///
/// Returns `NodeNotFound` if either word is absent, `Ok(vec![])` if the
/// target is unreachable, and `[source]` with cost 0 when both are equal.
pub fn all_shortest_paths(
    graph: &WordGraph,
    source: &str,
    target: &str,
) -> Result<Vec<WordPath>> {
    let (from, to) = resolve_pair(graph, source, target)?;

    let root = Arrival {
        node: from,
        parent: None,
    };
    let mut arrivals: Vec<Arrival> = vec![root];
    let mut best: Vec<Option<u64>> = vec![None; graph.node_count()];
    best[from as usize] = Some(0);

    let mut queue: BinaryHeap<Reverse<(u64, u64, usize)>> = BinaryHeap::new();
    queue.push(Reverse((0, 0, 0)));
    let mut seq: u64 = 1;

    let mut reached: Vec<(u64, usize)> = Vec::new();

    while let Some(Reverse((cost, _, idx))) = queue.pop() {
        // Weights are >= 1, so nothing popped after a costlier entry can tie the best arrival
        if let Some(&(min_cost, _)) = reached.first() {
            if cost > min_cost {
                break;
            }
        }

        let node = arrivals[idx].node;
        if node == to {
            reached.push((cost, idx));
            continue;
        }

        for &(next, weight) in graph.successors(node) {
            let new_cost = cost + u64::from(weight);
            let slot = &mut best[next as usize];
            if slot.map_or(true, |known| new_cost <= known) {
                *slot = Some(new_cost);
                arrivals.push(Arrival {
                    node: next,
                    parent: Some(idx),
                });
                queue.push(Reverse((new_cost, seq, arrivals.len() - 1)));
                seq += 1;
            }
        }
    }

    let Some(min_cost) = reached.iter().map(|&(c, _)| c).min() else {
        return Ok(Vec::new());
    };

    Ok(reached
        .into_iter()
        .filter(|&(c, _)| c == min_cost)
        .map(|(c, idx)| WordPath::new(trace_route(graph, &arrivals, idx), c))
        .collect())
}

/// Follow parent links back to the source and return the words source-first
fn trace_route(graph: &WordGraph, arrivals: &[Arrival], mut idx: usize) -> Vec<String> {
    let mut words = Vec::new();
    loop {
        let arrival = arrivals[idx];
        words.push(graph.word(arrival.node).unwrap_or_default().to_string());
        match arrival.parent {
            Some(parent) => idx = parent,
            None => break,
        }
    }
    words.reverse();
    words
}
