//! # digraph
//!
//! An in-memory editable directed graph with integer edge costs.
//!
//! Nodes are integer handles allocated in increasing order; removing a node
//! leaves a hole that is compacted away (order-preserving) before the graph
//! is written to its plain-text file format.
//!
//! ## Quick Start
//!
//! ### As an interactive tool
//!
//! ```bash
//! digraph --load graph.txt --show
//! digraph --nodes 10 --edges 20 --seed 42
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use digraph::prelude::*;
//!
//! let mut graph = random_graph(10, 20);
//! graph.remove_node(3).unwrap();
//!
//! // Saving compacts handles to 0..9 first
//! GraphFile::new("graph.txt").save(&mut graph).unwrap();
//! let loaded = GraphFile::new("graph.txt").load().unwrap();
//! assert_eq!(loaded.node_count(), 9);
//! ```
//!
//! ## Crate Structure
//!
//! - [`digraph-core`](https://docs.rs/digraph-core) - Graph, random generation, text codec
//! - [`digraph-storage`](https://docs.rs/digraph-storage) - File load/save
//! - [`console`] - Text menu driving a graph from any reader/writer pair

pub mod console;

// Re-export core types
pub use digraph_core::{
    random_graph, random_graph_with_rng, read_graph, write_graph,
    Cost, DirectedGraph, Edge, NodeId,
    Error, Result,
};

// Re-export storage
pub use digraph_storage::GraphFile;

pub use console::{Console, ConsoleError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        random_graph, random_graph_with_rng,
        Cost, DirectedGraph, Edge, NodeId,
        Error, Result,
        GraphFile,
        Console,
    };
}
