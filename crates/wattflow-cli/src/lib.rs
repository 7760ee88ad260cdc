//! CLI logic for the Wattflow flow diagram tool.
//!
//! This module contains the core CLI logic: it reads a graph file, loads the
//! configuration and writes the rendered SVG.

pub mod error_adapter;

mod args;
mod config;
mod input;

pub use args::Args;

use std::fs;

use log::info;

use wattflow::{FlowDiagramBuilder, WattflowError, geometry::Size};

/// Run the Wattflow CLI application
///
/// # Errors
///
/// Returns `WattflowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph files
/// - Layout errors (invalid graphs, options or canvas size)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), WattflowError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing flow graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let graph = input::parse_graph(&source)?;

    let builder = FlowDiagramBuilder::new(app_config);
    builder.export_svg(&graph, Size::new(args.width, args.height), &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
