//! Wattflow - Sankey-style flow diagrams.
//!
//! Lays out weighted directed acyclic graphs as columns of node rectangles
//! joined by ribbons whose thickness is proportional to the flow they carry,
//! and renders the result to SVG.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! - [`layout::compute_layout`] turns a [`FlowGraph`](graph::FlowGraph) and a
//!   viewport into a [`layout::Layout`].
//! - [`render::render`] draws a layout onto any [`draw::Surface`].
//! - [`export::svg`] provides the SVG surface and file exporter.
//!
//! [`FlowDiagramBuilder`] wires the stages together using an
//! [`AppConfig`](config::AppConfig).

pub mod config;
pub mod draw;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use wattflow_core::{color, geometry, graph};

pub use error::WattflowError;

use std::path::Path;

use log::{debug, info};

use config::AppConfig;
use export::{
    Exporter,
    svg::{SvgExporter, SvgSurface},
};
use geometry::Size;
use graph::FlowGraph;
use layout::Layout;
use render::RenderStyle;

/// Builder for laying out and rendering flow diagrams.
///
/// # Examples
///
/// ```
/// use wattflow::{FlowDiagramBuilder, geometry::Size, graph::FlowGraph};
///
/// let mut graph = FlowGraph::new();
/// let total = graph.add_node("Total");
/// let teaching = graph.add_node("Teaching");
/// let dorms = graph.add_node("Dorms");
/// graph.add_edge(total, teaching, 450.0);
/// graph.add_edge(total, dorms, 320.0);
///
/// let builder = FlowDiagramBuilder::default();
/// let svg = builder
///     .render_svg(&graph, Size::new(350.0, 380.0))
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct FlowDiagramBuilder {
    config: AppConfig,
}

impl FlowDiagramBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compute the layout of `graph` inside `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`WattflowError::Layout`] for invalid graphs, options or
    /// viewports.
    pub fn layout(&self, graph: &FlowGraph, viewport: Size) -> Result<Layout, WattflowError> {
        let layout = layout::compute_layout(graph, viewport, self.config.layout())?;
        debug!(
            columns = layout.column_count(),
            value_scale = layout.value_scale();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Lay out and render `graph` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `WattflowError` for configuration, layout or rendering errors.
    pub fn render_svg(&self, graph: &FlowGraph, viewport: Size) -> Result<String, WattflowError> {
        let (background, style) = self.resolve_style()?;
        let layout = self.layout(graph, viewport)?;

        let mut surface = SvgSurface::new().with_background(background);
        render::render(&layout, &style, &mut surface)?;

        info!("SVG rendered successfully");
        Ok(surface.to_svg_string())
    }

    /// Lay out and render `graph`, writing the SVG document to `path`.
    ///
    /// # Errors
    ///
    /// Returns `WattflowError` for configuration, layout, rendering or I/O
    /// errors.
    pub fn export_svg(
        &self,
        graph: &FlowGraph,
        viewport: Size,
        path: impl AsRef<Path>,
    ) -> Result<(), WattflowError> {
        let (background, style) = self.resolve_style()?;
        let layout = self.layout(graph, viewport)?;

        SvgExporter::new(background).export_layout(&layout, &style, path.as_ref())?;

        info!(path = path.as_ref().display().to_string(); "SVG exported");
        Ok(())
    }

    fn resolve_style(&self) -> Result<(Option<color::Color>, RenderStyle), WattflowError> {
        let style = self.config.style();
        let background = style.background_color().map_err(WattflowError::Config)?;
        let render_style = style.render_style().map_err(WattflowError::Config)?;
        Ok((background, render_style))
    }
}
