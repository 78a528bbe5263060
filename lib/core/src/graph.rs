// Editable directed graph with integer edge costs
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, trace};

pub type NodeId = usize;
pub type Cost = u64;

/// A directed edge together with its cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
    pub cost: Cost,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(start: NodeId, end: NodeId, cost: Cost) -> Self {
        Self { start, end, cost }
    }
}

/// Directed graph over integer node handles.
///
/// Handles are allocated monotonically and never reused: removing a node
/// leaves a hole in the handle space until [`DirectedGraph::reindex`]
/// compacts it. A node without edges on one side simply has an empty
/// adjacency list on that side; existence is tracked separately.
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    nodes: BTreeSet<NodeId>,
    inbound: HashMap<NodeId, Vec<NodeId>>,
    outbound: HashMap<NodeId, Vec<NodeId>>,
    costs: BTreeMap<(NodeId, NodeId), Cost>,
    // next handle to allocate; last_node() is one less
    next_node: NodeId,
    hidden: bool,
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
            inbound: HashMap::new(),
            outbound: HashMap::new(),
            costs: BTreeMap::new(),
            next_node: 0,
            hidden: true,
        }
    }

    /// Create a graph with `count` empty nodes, handles `0..count`
    #[must_use]
    pub fn with_nodes(count: usize) -> Self {
        let mut graph = Self::new();
        for _ in 0..count {
            graph.add_empty_node();
        }
        graph
    }

    /// Allocate the next handle as a node with no edges
    pub fn add_empty_node(&mut self) -> NodeId {
        let node = self.next_node;
        self.nodes.insert(node);
        self.inbound.insert(node, Vec::new());
        self.outbound.insert(node, Vec::new());
        self.next_node += 1;
        node
    }

    /// Remove `node` only if it has no edges in either direction.
    ///
    /// Returns whether the node was removed.
    pub fn remove_empty_node(&mut self, node: NodeId) -> bool {
        let empty = self.is_node(node)
            && self.inbound.get(&node).is_some_and(Vec::is_empty)
            && self.outbound.get(&node).is_some_and(Vec::is_empty);
        if !empty {
            return false;
        }
        self.detach(node);
        true
    }

    /// Remove `node` and every edge touching it
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if !self.is_node(node) {
            return Err(Error::NodeNotFound(node));
        }

        let incident: Vec<(NodeId, NodeId)> = self
            .costs
            .keys()
            .filter(|(start, end)| *start == node || *end == node)
            .copied()
            .collect();
        for (start, end) in incident {
            self.unlink(start, end);
        }

        self.detach(node);
        debug!(node, "removed node");
        Ok(())
    }

    #[inline]
    pub fn is_node(&self, node: NodeId) -> bool {
        node < self.next_node
            && self.nodes.contains(&node)
            && self.inbound.contains_key(&node)
            && self.outbound.contains_key(&node)
    }

    /// Highest handle ever allocated, `None` for a graph that never had nodes
    #[inline]
    pub fn last_node(&self) -> Option<NodeId> {
        self.next_node.checked_sub(1)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when some handle below `next_node` no longer names a node
    #[inline]
    pub fn has_holes(&self) -> bool {
        self.nodes.len() != self.next_node
    }

    /// Live node handles in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// All edges ordered by start, then end
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.costs
            .iter()
            .map(|(&(start, end), &cost)| Edge::new(start, end, cost))
    }

    pub fn add_edge(&mut self, start: NodeId, end: NodeId, cost: Cost) -> Result<()> {
        if !self.is_node(start) {
            return Err(Error::InvalidNode(start));
        }
        if !self.is_node(end) {
            return Err(Error::InvalidNode(end));
        }
        if self.is_edge(start, end) {
            return Err(Error::DuplicateEdge { start, end });
        }

        self.link(start, end, cost);
        Ok(())
    }

    /// Remove the edge `start -> end`; fails if it does not exist
    pub fn remove_edge(&mut self, start: NodeId, end: NodeId) -> Result<()> {
        if !self.is_edge(start, end) {
            return Err(Error::EdgeNotFound { start, end });
        }
        self.unlink(start, end);
        Ok(())
    }

    #[inline]
    pub fn is_edge(&self, start: NodeId, end: NodeId) -> bool {
        self.costs.contains_key(&(start, end))
    }

    pub fn cost(&self, start: NodeId, end: NodeId) -> Result<Cost> {
        self.costs
            .get(&(start, end))
            .copied()
            .ok_or(Error::EdgeNotFound { start, end })
    }

    /// Update the cost of an existing edge. Never creates an edge.
    pub fn set_cost(&mut self, start: NodeId, end: NodeId, cost: Cost) -> Result<()> {
        match self.costs.get_mut(&(start, end)) {
            Some(slot) => {
                *slot = cost;
                Ok(())
            }
            None => Err(Error::EdgeNotFound { start, end }),
        }
    }

    pub fn in_degree(&self, node: NodeId) -> Result<usize> {
        self.inbound(node).map(<[NodeId]>::len)
    }

    pub fn out_degree(&self, node: NodeId) -> Result<usize> {
        self.outbound(node).map(<[NodeId]>::len)
    }

    /// Nodes with an edge into `node`, in insertion order
    pub fn inbound(&self, node: NodeId) -> Result<&[NodeId]> {
        if !self.is_node(node) {
            return Err(Error::InvalidNode(node));
        }
        self.inbound
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::InvalidNode(node))
    }

    /// Nodes reached by an edge out of `node`, in insertion order
    pub fn outbound(&self, node: NodeId) -> Result<&[NodeId]> {
        if !self.is_node(node) {
            return Err(Error::InvalidNode(node));
        }
        self.outbound
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::InvalidNode(node))
    }

    /// `(source, cost)` for every edge ending at `node`
    pub fn inbound_edges_with_costs(&self, node: NodeId) -> Result<Vec<(NodeId, Cost)>> {
        Ok(self
            .inbound(node)?
            .iter()
            .filter_map(|&source| self.costs.get(&(source, node)).map(|&c| (source, c)))
            .collect())
    }

    /// `(target, cost)` for every edge starting at `node`
    pub fn outbound_edges_with_costs(&self, node: NodeId) -> Result<Vec<(NodeId, Cost)>> {
        Ok(self
            .outbound(node)?
            .iter()
            .filter_map(|&target| self.costs.get(&(node, target)).map(|&c| (target, c)))
            .collect())
    }

    /// Order-preserving compaction of the handle space.
    ///
    /// Live nodes are renumbered `0..node_count()` in ascending order of their
    /// current handles, and both adjacency maps are rebuilt from the relabeled
    /// edge set. `self` is left untouched.
    #[must_use]
    pub fn compacted(&self) -> DirectedGraph {
        let mut relabel: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.nodes.len());
        for (new, &old) in self.nodes.iter().enumerate() {
            relabel.insert(old, new);
        }

        let mut graph = DirectedGraph::with_nodes(self.nodes.len());
        graph.hidden = self.hidden;

        let total = self.costs.len();
        let step = (total / 10).max(1);
        for (done, (&(start, end), &cost)) in self.costs.iter().enumerate() {
            // cost keys only ever reference live nodes
            if let (Some(&start), Some(&end)) = (relabel.get(&start), relabel.get(&end)) {
                graph.link(start, end, cost);
            }
            if done % step == 0 {
                trace!("reindexing costs: {}% done ({}/{})", done * 100 / total, done, total);
            }
        }
        graph
    }

    /// Compact the handle space in place. Returns false when there were no
    /// holes and nothing changed.
    pub fn reindex(&mut self) -> bool {
        if !self.has_holes() {
            return false;
        }
        let before = self.last_node();
        *self = self.compacted();
        debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            "reindexed graph (last node {:?} -> {:?})",
            before,
            self.last_node()
        );
        true
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Flip visibility, returning the new hidden state
    pub fn toggle_hidden(&mut self) -> bool {
        self.hidden = !self.hidden;
        self.hidden
    }

    /// Render the node, edge and cost sets for display
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Record `start -> end` without validation. Callers guarantee both
    /// endpoints are live and the pair has no cost entry yet.
    pub(crate) fn link(&mut self, start: NodeId, end: NodeId, cost: Cost) {
        self.outbound.entry(start).or_default().push(end);
        self.inbound.entry(end).or_default().push(start);
        self.costs.insert((start, end), cost);
    }

    fn unlink(&mut self, start: NodeId, end: NodeId) {
        if let Some(targets) = self.outbound.get_mut(&start) {
            remove_first(targets, end);
        }
        if let Some(sources) = self.inbound.get_mut(&end) {
            remove_first(sources, start);
        }
        self.costs.remove(&(start, end));
    }

    fn detach(&mut self, node: NodeId) {
        self.nodes.remove(&node);
        self.inbound.remove(&node);
        self.outbound.remove(&node);
    }
}

fn remove_first(list: &mut Vec<NodeId>, value: NodeId) {
    if let Some(pos) = list.iter().position(|&n| n == value) {
        list.remove(pos);
    }
}

impl fmt::Display for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<NodeId> = self.nodes().collect();
        let edges: Vec<(NodeId, NodeId)> = self.costs.keys().copied().collect();
        let costs: Vec<Cost> = self.costs.values().copied().collect();
        write!(f, "Nodes: {:?}\nEdges: {:?}\nCosts: {:?}", nodes, edges, costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn edges_of(graph: &DirectedGraph) -> Vec<(NodeId, NodeId, Cost)> {
        graph.edges().map(|e| (e.start, e.end, e.cost)).collect()
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = DirectedGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.last_node(), None);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_hidden());
        assert!(!graph.is_node(0));
    }

    #[test]
    fn test_add_and_remove_nodes() {
        let mut graph = DirectedGraph::new();
        assert_eq!(graph.add_empty_node(), 0);
        assert_eq!(graph.add_empty_node(), 1);
        assert_eq!(graph.add_empty_node(), 2);

        graph.remove_node(1).unwrap();
        assert!(graph.is_node(0));
        assert!(!graph.is_node(1));
        assert!(graph.is_node(2));
        assert!(!graph.is_node(3));
        assert_eq!(graph.last_node(), Some(2));

        // handles are never reused
        assert_eq!(graph.add_empty_node(), 3);
        assert!(!graph.is_node(1));
    }

    #[test]
    fn test_is_node_tracks_random_add_remove_sequences() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let mut graph = DirectedGraph::new();
            let mut live: BTreeSet<NodeId> = BTreeSet::new();
            let mut allocated = 0;

            for _ in 0..200 {
                if live.is_empty() || rng.random_bool(0.6) {
                    let node = graph.add_empty_node();
                    assert_eq!(node, allocated);
                    allocated += 1;
                    live.insert(node);
                } else {
                    // removal targets include holes and never-allocated handles
                    let node = rng.random_range(0..allocated + 3);
                    let removed = graph.remove_node(node).is_ok();
                    assert_eq!(removed, live.remove(&node));
                }

                for node in 0..allocated + 3 {
                    assert_eq!(graph.is_node(node), live.contains(&node), "handle {}", node);
                }
                assert_eq!(graph.node_count(), live.len());
                assert_eq!(graph.last_node(), allocated.checked_sub(1));
            }
        }
    }

    #[test]
    fn test_remove_missing_node() {
        let mut graph = DirectedGraph::with_nodes(2);
        assert!(matches!(graph.remove_node(5), Err(Error::NodeNotFound(5))));
        graph.remove_node(0).unwrap();
        assert!(matches!(graph.remove_node(0), Err(Error::NodeNotFound(0))));
    }

    #[test]
    fn test_remove_empty_node_refuses_connected() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 1, 4).unwrap();

        assert!(!graph.remove_empty_node(0));
        assert!(!graph.remove_empty_node(1));
        assert!(graph.is_node(0) && graph.is_node(1));

        assert!(graph.remove_empty_node(2));
        assert!(!graph.is_node(2));
        assert!(!graph.remove_empty_node(2));
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(1, 2, 2).unwrap();
        graph.add_edge(2, 0, 3).unwrap();

        graph.remove_node(1).unwrap();
        assert_eq!(edges_of(&graph), vec![(2, 0, 3)]);
        assert_eq!(graph.out_degree(0).unwrap(), 0);
        assert_eq!(graph.in_degree(2).unwrap(), 0);
        assert_eq!(graph.in_degree(0).unwrap(), 1);
    }

    #[test]
    fn test_degrees() {
        let mut graph = DirectedGraph::new();
        let a = graph.add_empty_node();
        let b = graph.add_empty_node();
        assert_eq!(graph.in_degree(a).unwrap(), 0);
        assert_eq!(graph.out_degree(a).unwrap(), 0);

        graph.add_edge(a, b, 10).unwrap();
        assert_eq!(graph.out_degree(a).unwrap(), 1);
        assert_eq!(graph.in_degree(a).unwrap(), 0);
        assert_eq!(graph.in_degree(b).unwrap(), 1);

        assert!(matches!(graph.in_degree(9), Err(Error::InvalidNode(9))));
    }

    #[test]
    fn test_add_edge_validation() {
        let mut graph = DirectedGraph::with_nodes(2);
        assert!(matches!(graph.add_edge(0, 2, 1), Err(Error::InvalidNode(2))));
        assert!(matches!(graph.add_edge(3, 0, 1), Err(Error::InvalidNode(3))));

        graph.add_edge(0, 1, 5).unwrap();
        let result = graph.add_edge(0, 1, 9);
        assert!(matches!(result, Err(Error::DuplicateEdge { start: 0, end: 1 })));
        assert_eq!(graph.cost(0, 1).unwrap(), 5);
        assert_eq!(graph.outbound(0).unwrap(), &[1]);
        assert_eq!(graph.inbound(1).unwrap(), &[0]);

        // reverse direction is a different edge
        graph.add_edge(1, 0, 6).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_then_remove_edge_restores_state() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 2, 1).unwrap();
        let before_edges = edges_of(&graph);

        graph.add_edge(0, 1, 42).unwrap();
        graph.remove_edge(0, 1).unwrap();

        assert_eq!(edges_of(&graph), before_edges);
        assert!(!graph.is_edge(0, 1));
        assert_eq!(graph.outbound(0).unwrap(), &[2]);
        assert!(graph.inbound(1).unwrap().is_empty());
        assert_eq!(graph.in_degree(1).unwrap(), 0);
        assert_eq!(graph.out_degree(0).unwrap(), 1);
    }

    #[test]
    fn test_missing_edge_operations_fail() {
        let mut graph = DirectedGraph::with_nodes(2);
        assert!(matches!(
            graph.remove_edge(0, 1),
            Err(Error::EdgeNotFound { start: 0, end: 1 })
        ));
        assert!(matches!(graph.cost(0, 1), Err(Error::EdgeNotFound { .. })));
        assert!(matches!(graph.set_cost(0, 1, 3), Err(Error::EdgeNotFound { .. })));
        // no dangling cost entry was created
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.is_edge(0, 1));
    }

    #[test]
    fn test_set_cost() {
        let mut graph = DirectedGraph::with_nodes(2);
        graph.add_edge(1, 0, 3).unwrap();
        graph.set_cost(1, 0, 77).unwrap();
        assert_eq!(graph.cost(1, 0).unwrap(), 77);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop() {
        let mut graph = DirectedGraph::with_nodes(1);
        graph.add_edge(0, 0, 2).unwrap();
        assert_eq!(graph.in_degree(0).unwrap(), 1);
        assert_eq!(graph.out_degree(0).unwrap(), 1);
        graph.remove_edge(0, 0).unwrap();
        assert_eq!(graph.in_degree(0).unwrap(), 0);
        assert!(graph.remove_empty_node(0));
    }

    #[test]
    fn test_edges_with_costs() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 2, 7).unwrap();
        graph.add_edge(1, 2, 8).unwrap();
        graph.add_edge(2, 0, 9).unwrap();

        assert_eq!(graph.inbound_edges_with_costs(2).unwrap(), vec![(0, 7), (1, 8)]);
        assert_eq!(graph.outbound_edges_with_costs(2).unwrap(), vec![(0, 9)]);
        assert_eq!(graph.outbound_edges_with_costs(1).unwrap(), vec![(2, 8)]);
        assert!(graph.inbound_edges_with_costs(4).is_err());
    }

    #[test]
    fn test_reindex_without_holes_is_noop() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(2, 1, 2).unwrap();
        let before = edges_of(&graph);

        assert!(!graph.reindex());
        assert_eq!(edges_of(&graph), before);
        assert_eq!(graph.last_node(), Some(2));
        assert_eq!(graph.outbound(2).unwrap(), &[1]);
    }

    #[test]
    fn test_reindex_compacts_preserving_order() {
        let mut graph = DirectedGraph::with_nodes(6);
        graph.add_edge(0, 2, 7).unwrap();
        graph.add_edge(2, 5, 3).unwrap();
        for hole in [1, 3, 4] {
            graph.remove_node(hole).unwrap();
        }

        assert!(graph.reindex());
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(graph.last_node(), Some(2));
        assert_eq!(edges_of(&graph), vec![(0, 1, 7), (1, 2, 3)]);
        assert!(!graph.has_holes());
    }

    #[test]
    fn test_reindex_keeps_directions_apart() {
        let mut graph = DirectedGraph::with_nodes(4);
        graph.add_edge(1, 3, 5).unwrap();
        graph.add_edge(3, 2, 6).unwrap();
        graph.remove_node(0).unwrap();
        graph.reindex();

        // old 1 -> 0, old 2 -> 1, old 3 -> 2
        assert_eq!(graph.outbound(0).unwrap(), &[2]);
        assert!(graph.inbound(0).unwrap().is_empty());
        assert_eq!(graph.inbound(2).unwrap(), &[0]);
        assert_eq!(graph.outbound(2).unwrap(), &[1]);
        assert_eq!(graph.in_degree(1).unwrap(), 1);
        assert_eq!(graph.out_degree(1).unwrap(), 0);
    }

    #[test]
    fn test_compacted_leaves_original_untouched() {
        let mut graph = DirectedGraph::with_nodes(3);
        graph.add_edge(0, 2, 1).unwrap();
        graph.remove_node(1).unwrap();

        let compact = graph.compacted();
        assert_eq!(compact.last_node(), Some(1));
        assert_eq!(graph.last_node(), Some(2));
        assert!(graph.is_edge(0, 2));
        assert!(compact.is_edge(0, 1));
    }

    #[test]
    fn test_reindex_after_removing_everything() {
        let mut graph = DirectedGraph::with_nodes(2);
        graph.remove_node(0).unwrap();
        graph.remove_node(1).unwrap();
        assert!(graph.reindex());
        assert_eq!(graph.last_node(), None);
        assert_eq!(graph.add_empty_node(), 0);
    }

    #[test]
    fn test_describe_and_visibility() {
        let mut graph = DirectedGraph::with_nodes(2);
        graph.add_edge(1, 0, 4).unwrap();
        assert_eq!(graph.describe(), "Nodes: [0, 1]\nEdges: [(1, 0)]\nCosts: [4]");

        assert!(!graph.toggle_hidden());
        assert!(!graph.is_hidden());
        graph.set_hidden(true);
        assert!(graph.is_hidden());
    }
}
