// Line-oriented text format
//
//   N M
//   start end cost     (M lines)
//
// Handles in the file are always contiguous `0..N`.
use crate::graph::{Cost, DirectedGraph, NodeId};
use crate::{Error, Result};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Parse a graph from `reader`.
///
/// Builds a fresh graph; any format violation, out-of-range endpoint or
/// duplicate edge is reported as [`Error::Malformed`] with its line number.
/// Non-UTF-8 content counts as malformed; [`Error::Io`] is left for failures
/// of the reader itself.
///
/// The header's node count is trusted: all `N` nodes are allocated before
/// the first edge line is read, so a huge `N` costs memory up front.
pub fn read_graph<R: BufRead>(reader: R) -> Result<DirectedGraph> {
    let mut lines = reader.lines();

    let header = match next_line(&mut lines, 1)? {
        Some(line) => line,
        None => return Err(Error::malformed(1, "missing header")),
    };
    let [nodes, edges] = fields::<2>(&header, 1)?;
    let node_count: usize = parse(nodes, 1)?;
    let edge_count: usize = parse(edges, 1)?;

    let mut graph = DirectedGraph::with_nodes(node_count);

    for index in 0..edge_count {
        let line_no = index + 2;
        let line = match next_line(&mut lines, line_no)? {
            Some(line) => line,
            None => {
                return Err(Error::malformed(
                    line_no,
                    format!("expected {} edges, found {}", edge_count, index),
                ))
            }
        };

        let [start, end, cost] = fields::<3>(&line, line_no)?;
        let start: NodeId = parse(start, line_no)?;
        let end: NodeId = parse(end, line_no)?;
        let cost: Cost = parse(cost, line_no)?;

        graph
            .add_edge(start, end, cost)
            .map_err(|e| Error::malformed(line_no, e.to_string()))?;
    }

    let mut line_no = edge_count + 2;
    while let Some(line) = next_line(&mut lines, line_no)? {
        if !line.trim().is_empty() {
            return Err(Error::malformed(line_no, "unexpected content after the last edge"));
        }
        line_no += 1;
    }

    Ok(graph)
}

/// Write `graph` to `writer`.
///
/// A graph with holes in its handle space is written in compacted form;
/// the graph itself is not modified.
pub fn write_graph<W: Write>(graph: &DirectedGraph, mut writer: W) -> Result<()> {
    let graph: Cow<'_, DirectedGraph> = if graph.has_holes() {
        Cow::Owned(graph.compacted())
    } else {
        Cow::Borrowed(graph)
    };

    writeln!(writer, "{} {}", graph.node_count(), graph.edge_count())?;
    for edge in graph.edges() {
        writeln!(writer, "{} {} {}", edge.start, edge.end, edge.cost)?;
    }
    writer.flush()?;
    Ok(())
}

fn next_line<I>(lines: &mut I, line_no: usize) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    match lines.next() {
        None => Ok(None),
        Some(Ok(line)) => Ok(Some(line)),
        Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
            Err(Error::malformed(line_no, "invalid UTF-8"))
        }
        Some(Err(e)) => Err(e.into()),
    }
}

/// Split `line` into exactly `N` whitespace-separated tokens
fn fields<const N: usize>(line: &str, line_no: usize) -> Result<[&str; N]> {
    let mut out = [""; N];
    let mut tokens = line.split_ascii_whitespace();
    for slot in out.iter_mut() {
        *slot = tokens
            .next()
            .ok_or_else(|| Error::malformed(line_no, format!("expected {} integers", N)))?;
    }
    if let Some(extra) = tokens.next() {
        return Err(Error::malformed(line_no, format!("unexpected token '{}'", extra)));
    }
    Ok(out)
}

fn parse<T: FromStr>(token: &str, line_no: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::malformed(line_no, format!("invalid integer '{}'", token)))
}
