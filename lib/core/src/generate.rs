// Random graph generation
use crate::graph::{Cost, DirectedGraph, NodeId};
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;

/// Costs assigned to generated edges
pub const RANDOM_COST_RANGE: RangeInclusive<Cost> = 1..=100;

/// Build a graph with `nodes` empty nodes and exactly `edges` distinct
/// directed edges drawn uniformly from `[0, nodes) x [0, nodes)`.
///
/// Colliding draws are redrawn, so the call never returns when `edges`
/// exceeds `nodes * nodes`; checking that is up to the caller.
///
/// # Panics
///
/// Panics if `nodes == 0` and `edges > 0`.
pub fn random_graph(nodes: usize, edges: usize) -> DirectedGraph {
    random_graph_with_rng(&mut rand::rng(), nodes, edges)
}

/// [`random_graph`] driven by a caller-supplied generator
pub fn random_graph_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    nodes: usize,
    edges: usize,
) -> DirectedGraph {
    let mut graph = DirectedGraph::with_nodes(nodes);
    let mut redraws = 0usize;

    for _ in 0..edges {
        let (start, end) = loop {
            let start: NodeId = rng.random_range(0..nodes);
            let end: NodeId = rng.random_range(0..nodes);
            if !graph.is_edge(start, end) {
                break (start, end);
            }
            redraws += 1;
        };
        let cost = rng.random_range(RANDOM_COST_RANGE);
        // endpoints are drawn from 0..nodes, all live, and the pair is fresh
        graph.link(start, end, cost);
    }

    debug!(nodes, edges, redraws, "generated random graph");
    graph
}
