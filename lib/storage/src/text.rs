// Graph files in the line-oriented text format
use atomicwrites::{AtomicFile, OverwriteBehavior};
use digraph_core::{read_graph, write_graph, DirectedGraph, Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A graph stored as a text file on disk
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file into a brand-new graph.
    ///
    /// Nothing outside the returned value is touched, so a failed load leaves
    /// whatever graph the caller already holds intact.
    pub fn load(&self) -> Result<DirectedGraph> {
        let file = File::open(&self.path)?;
        let graph = read_graph(BufReader::new(file))?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph from {:?}",
            self.path
        );
        Ok(graph)
    }

    /// Reindex `graph` and write it out, replacing the file atomically.
    pub fn save(&self, graph: &mut DirectedGraph) -> Result<()> {
        if graph.reindex() {
            debug!("compacted node handles before saving");
        }

        AtomicFile::new(self.target(), OverwriteBehavior::AllowOverwrite)
            .write(|file| {
                let mut writer = BufWriter::new(file);
                write_graph(graph, &mut writer)?;
                writer.flush()?;
                Ok::<(), Error>(())
            })
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) => Error::Io(e),
                atomicwrites::Error::User(e) => e,
            })?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "saved graph to {:?}",
            self.path
        );
        Ok(())
    }

    // AtomicFile stages its temp file next to the target; a bare file name
    // has an empty parent, so anchor it to the working directory.
    fn target(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(".").join(&self.path),
            _ => self.path.clone(),
        }
    }
}
