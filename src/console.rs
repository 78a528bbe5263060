// Text menu over a DirectedGraph
//
// Only calls the public graph and storage operations; generic over its input
// and output so sessions can be scripted.
use digraph_core::{random_graph, random_graph_with_rng, Cost, DirectedGraph, NodeId};
use digraph_storage::GraphFile;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Invalid number: '{0}'")]
    NotANumber(String),

    #[error("Invalid node: {0}")]
    NegativeNode(i64),

    #[error("The cost cannot be negative!")]
    NegativeCost(i64),

    #[error("Cannot place {edges} distinct edges between {nodes} nodes")]
    TooManyEdges { nodes: usize, edges: usize },

    #[error(transparent)]
    Graph(#[from] digraph_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("end of input")]
    EndOfInput,
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive session owning the current graph
pub struct Console<R, W> {
    input: R,
    output: W,
    graph: DirectedGraph,
    rng: Option<StdRng>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, graph: DirectedGraph) -> Self {
        Self {
            input,
            output,
            graph,
            rng: None,
        }
    }

    /// Make random generation reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DirectedGraph {
        self.graph
    }

    /// Run the menu until the user exits or input runs out
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) | Err(ConsoleError::EndOfInput) => return Ok(()),
                Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
                Err(e) => {
                    debug!("refused: {}", e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }

    fn step(&mut self) -> Result<Flow, ConsoleError> {
        self.print_menu()?;
        let choice = self.read_line("Enter your choice: ")?;
        match choice.as_str() {
            "1" => self.load()?,
            "2" => self.generate()?,
            "3" => self.modify()?,
            "4" => self.degrees()?,
            "8" => self.save()?,
            "9" => {
                self.graph.toggle_hidden();
            }
            "0" => return Ok(Flow::Exit),
            _ => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n---------Graph---------")?;
        if self.graph.is_empty() {
            writeln!(self.output, "The graph is empty")?;
        } else if self.graph.is_hidden() {
            writeln!(self.output, "The graph is hidden")?;
        } else {
            writeln!(self.output, "{}", self.graph)?;
        }
        writeln!(self.output, "\n---------Menu---------")?;
        writeln!(self.output, "1. Load graph from file")?;
        writeln!(self.output, "2. Generate a random graph")?;
        writeln!(self.output, "3. Modify the graph")?;
        writeln!(self.output, "4. Calculate the in degree and out degree of a node")?;
        writeln!(self.output, "8. Copy the graph to text file")?;
        writeln!(self.output, "9. Show/Hide Graph")?;
        writeln!(self.output, "0. Exit")
    }

    fn load(&mut self) -> Result<(), ConsoleError> {
        let path = self.read_line("Enter the path of the graph file: ")?;
        let mut graph = GraphFile::new(&path).load()?;
        graph.set_hidden(self.graph.is_hidden());
        self.graph = graph;
        writeln!(self.output, "Loaded graph from {}", path)?;
        Ok(())
    }

    fn generate(&mut self) -> Result<(), ConsoleError> {
        let nodes = self.read_count("Enter the number of nodes: ")?;
        let edges = self.read_count("Enter the number of edges: ")?;
        if edges > nodes.saturating_mul(nodes) {
            return Err(ConsoleError::TooManyEdges { nodes, edges });
        }

        let mut graph = match self.rng.as_mut() {
            Some(rng) => random_graph_with_rng(rng, nodes, edges),
            None => random_graph(nodes, edges),
        };
        graph.set_hidden(self.graph.is_hidden());
        self.graph = graph;
        Ok(())
    }

    fn modify(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "---------Modify Menu---------")?;
        writeln!(self.output, "1. Add a node")?;
        writeln!(self.output, "2. Remove a node")?;
        writeln!(self.output, "3. Add an edge")?;
        writeln!(self.output, "4. Remove an edge")?;
        writeln!(self.output, "5. Get the cost of an edge")?;
        writeln!(self.output, "6. Change the cost of an edge")?;
        writeln!(self.output, "0. Back")?;

        let choice = self.read_line("Enter your choice: ")?;
        match choice.as_str() {
            "1" => {
                let node = self.graph.add_empty_node();
                writeln!(self.output, "Added node {}", node)?;
            }
            "2" => {
                let node = self.read_node("Enter the node: ")?;
                self.graph.remove_node(node)?;
            }
            "3" => {
                let start = self.read_node("Enter the start node: ")?;
                let end = self.read_node("Enter the end node: ")?;
                let cost = self.read_cost("Enter the cost: ")?;
                self.graph.add_edge(start, end, cost)?;
            }
            "4" => {
                let start = self.read_node("Enter the start node: ")?;
                let end = self.read_node("Enter the end node: ")?;
                self.graph.remove_edge(start, end)?;
            }
            "5" => {
                let start = self.read_node("Enter the start node: ")?;
                let end = self.read_node("Enter the end node: ")?;
                let cost = self.graph.cost(start, end)?;
                writeln!(self.output, "The cost of the edge is: {}", cost)?;
            }
            "6" => {
                let start = self.read_node("Enter the start node: ")?;
                let end = self.read_node("Enter the end node: ")?;
                let cost = self.read_cost("Enter the new cost: ")?;
                self.graph.set_cost(start, end, cost)?;
            }
            "0" => {}
            _ => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(())
    }

    fn degrees(&mut self) -> Result<(), ConsoleError> {
        let node = self.read_node("Enter the node: ")?;
        let in_degree = self.graph.in_degree(node)?;
        let out_degree = self.graph.out_degree(node)?;
        writeln!(self.output, "In degree: {}", in_degree)?;
        writeln!(self.output, "Out degree: {}", out_degree)?;
        Ok(())
    }

    fn save(&mut self) -> Result<(), ConsoleError> {
        let name = self.read_line("Enter the name of the savefile (without .txt): ")?;
        let file = GraphFile::new(format!("{}.txt", name));
        file.save(&mut self.graph)?;
        writeln!(self.output, "Graph saved to {}", file.path().display())?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn read_number(&mut self, prompt: &str) -> Result<i64, ConsoleError> {
        let text = self.read_line(prompt)?;
        text.parse().map_err(|_| ConsoleError::NotANumber(text))
    }

    fn read_node(&mut self, prompt: &str) -> Result<NodeId, ConsoleError> {
        let value = self.read_number(prompt)?;
        NodeId::try_from(value).map_err(|_| ConsoleError::NegativeNode(value))
    }

    fn read_cost(&mut self, prompt: &str) -> Result<Cost, ConsoleError> {
        let value = self.read_number(prompt)?;
        Cost::try_from(value).map_err(|_| ConsoleError::NegativeCost(value))
    }

    fn read_count(&mut self, prompt: &str) -> Result<usize, ConsoleError> {
        let text = self.read_line(prompt)?;
        text.parse().map_err(|_| ConsoleError::NotANumber(text))
    }
}
