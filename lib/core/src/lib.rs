//! # digraph Core
//!
//! Core library for the digraph editor.
//!
//! This crate provides the graph itself and everything that does not touch
//! the filesystem:
//!
//! - [`DirectedGraph`] - Editable directed graph with integer edge costs
//! - [`random_graph`] - Uniform random graph generation
//! - [`read_graph`] / [`write_graph`] - Line-oriented text codec
//!
//! ## Example
//!
//! ```rust
//! use digraph_core::DirectedGraph;
//!
//! let mut graph = DirectedGraph::with_nodes(3);
//! graph.add_edge(0, 2, 7).unwrap();
//! graph.remove_node(1).unwrap();
//!
//! // Compact handles before writing them out
//! graph.reindex();
//! assert_eq!(graph.cost(0, 1).unwrap(), 7);
//! ```

pub mod error;
pub mod format;
pub mod generate;
pub mod graph;

pub use error::{Error, Result};
pub use format::{read_graph, write_graph};
pub use generate::{random_graph, random_graph_with_rng, RANDOM_COST_RANGE};
pub use graph::{Cost, DirectedGraph, Edge, NodeId};
