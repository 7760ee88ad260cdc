//! Flow graph input files.
//!
//! Graphs are written in TOML as two arrays of tables:
//!
//! ```toml
//! [[nodes]]
//! label = "Total"
//! color = "#3b82f6"   # optional
//!
//! [[nodes]]
//! label = "Teaching"
//!
//! [[edges]]
//! source = 0
//! target = 1
//! value = 450.0
//! ```
//!
//! `name` is accepted for `label`, and `links` for `edges`.

use log::debug;

use wattflow::{WattflowError, graph::FlowGraph};

/// Parses a graph description.
///
/// Only the shape of the file is checked here; references, values and
/// colors are validated by the layout engine.
///
/// # Errors
///
/// Returns [`WattflowError::Input`] carrying the source and the location of
/// the problem when the TOML is malformed or does not describe a graph.
pub fn parse_graph(source: &str) -> Result<FlowGraph, WattflowError> {
    let graph: FlowGraph = toml::from_str(source)
        .map_err(|err| WattflowError::new_input_error(err.message(), err.span(), source))?;

    debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Graph parsed"
    );
    Ok(graph)
}
