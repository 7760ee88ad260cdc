//! Flow diagram layout engine.
//!
//! [`compute_layout`] turns a [`FlowGraph`] and a viewport into a [`Layout`]:
//! node rectangles arranged in columns and link ribbons whose thickness is
//! proportional to the flow they carry. It runs four passes:
//!
//! 1. **Layering** ([`layering`]): every node gets a column so that each edge
//!    points strictly to the right.
//! 2. **Sizing and initial placement** ([`placement`]): a single value-to-pixel
//!    scale is chosen so the most demanding column fills the usable height;
//!    nodes are stacked and centred per column.
//! 3. **Relaxation** ([`placement`]): nodes are pulled towards the weighted
//!    centre of their neighbours for a fixed number of rounds, resolving
//!    overlaps after each pass.
//! 4. **Link resolution** ([`links`]): ribbons are stacked along node edges in
//!    neighbour order, giving each link its width and anchor points.
//!
//! The computation is pure: no I/O, no global state, and identical inputs
//! give identical geometry.

mod layering;
mod links;
mod placement;

pub use layering::NodeAlign;
pub use links::Ribbon;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use wattflow_core::{
    color::Color,
    geometry::{Bounds, Insets, Size},
    graph::{EdgeId, FlowGraph, GraphError, NodeId},
};

/// Errors raised by [`compute_layout`]. No partial layout is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(
        "viewport {width}x{height} leaves no drawable area (margin {margin}, node width {node_width})"
    )]
    DegenerateViewport {
        width: f32,
        height: f32,
        margin: f32,
        node_width: f32,
    },

    #[error("invalid layout options: {0}")]
    InvalidOptions(String),
}

/// Tunable parameters of the layout engine.
///
/// Deserializes from the `[layout]` table of the configuration file; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Horizontal thickness of every node rectangle.
    pub node_width: f32,

    /// Minimum vertical gap between nodes of the same column.
    pub node_padding: f32,

    /// Inset applied on all four sides of the viewport.
    pub margin: f32,

    /// Number of relaxation rounds.
    pub iterations: usize,

    /// Column assignment strategy.
    pub align: NodeAlign,

    /// Height reserved for nodes that carry no flow.
    pub min_node_height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 15.0,
            node_padding: 20.0,
            margin: 20.0,
            iterations: 6,
            align: NodeAlign::Left,
            min_node_height: 1.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_node_width(mut self, node_width: f32) -> Self {
        self.node_width = node_width;
        self
    }

    pub fn with_node_padding(mut self, node_padding: f32) -> Self {
        self.node_padding = node_padding;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_align(mut self, align: NodeAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_min_node_height(mut self, min_node_height: f32) -> Self {
        self.min_node_height = min_node_height;
        self
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if !(self.node_width.is_finite() && self.node_width > 0.0) {
            return Err(LayoutError::InvalidOptions(format!(
                "node_width must be positive, got {}",
                self.node_width
            )));
        }
        for (name, value) in [
            ("node_padding", self.node_padding),
            ("margin", self.margin),
            ("min_node_height", self.min_node_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidOptions(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// A node with its resolved column, color and rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    id: NodeId,
    label: String,
    color: Color,
    column: usize,
    value: f32,
    extent: Bounds,
}

impl LayoutNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Flow through the node: the larger of its incoming and outgoing sums.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn extent(&self) -> Bounds {
        self.extent
    }
}

/// A link with its resolved ribbon width and anchor points.
///
/// `y0` is the centre of the ribbon where it leaves the source's right edge,
/// `y1` the centre where it enters the target's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLink {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    value: f32,
    width: f32,
    y0: f32,
    y1: f32,
}

impl LayoutLink {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn y0(&self) -> f32 {
        self.y0
    }

    pub fn y1(&self) -> f32 {
        self.y1
    }
}

/// Complete geometry of a flow diagram for one viewport.
///
/// Nodes and links keep the order of the input graph, so `nodes()[i]` is the
/// node with id `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    nodes: Vec<LayoutNode>,
    links: Vec<LayoutLink>,
    viewport: Size,
    column_count: usize,
    value_scale: f32,
}

impl Layout {
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[LayoutLink] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.index()]
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Pixels per unit of flow.
    pub fn value_scale(&self) -> f32 {
        self.value_scale
    }

    /// Nodes of one column, top to bottom.
    pub fn column(&self, column: usize) -> Vec<&LayoutNode> {
        let mut nodes: Vec<_> = self.nodes.iter().filter(|n| n.column == column).collect();
        nodes.sort_by(|a, b| a.extent.y0().total_cmp(&b.extent.y0()));
        nodes
    }

    /// The ribbon curve of `link`, spanning from its source's right edge to
    /// its target's left edge.
    pub fn ribbon(&self, link: &LayoutLink) -> Ribbon {
        Ribbon::between(
            self.node(link.source).extent,
            self.node(link.target).extent,
            link,
        )
    }

    /// Bounding box of all node rectangles.
    pub fn content_bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .skip(1)
            .map(|node| node.extent)
            .fold(self.nodes[0].extent, |acc, extent| acc.merge(&extent))
    }
}

/// Computes the geometry of `graph` inside `viewport`.
///
/// # Errors
///
/// - [`LayoutError::Graph`] with [`GraphError::EmptyGraph`],
///   [`GraphError::DanglingReference`] (and the other validation errors) before
///   any layout work, or [`GraphError::CyclePresent`] from layering
/// - [`LayoutError::InvalidOptions`] for unusable options
/// - [`LayoutError::DegenerateViewport`] when nothing can be drawn, or when the
///   usable width cannot keep adjacent columns apart
///
/// # Examples
///
/// ```
/// use wattflow::layout::{LayoutOptions, compute_layout};
/// use wattflow_core::{geometry::Size, graph::FlowGraph};
///
/// let mut graph = FlowGraph::new();
/// let total = graph.add_node("Total");
/// let heating = graph.add_node("Heating");
/// let lighting = graph.add_node("Lighting");
/// graph.add_edge(total, heating, 70.0);
/// graph.add_edge(total, lighting, 30.0);
///
/// let layout = compute_layout(&graph, Size::new(350.0, 400.0), &LayoutOptions::default())
///     .unwrap();
/// assert_eq!(layout.column_count(), 2);
/// assert!(layout.links()[0].width() > layout.links()[1].width());
/// ```
pub fn compute_layout(
    graph: &FlowGraph,
    viewport: Size,
    options: &LayoutOptions,
) -> Result<Layout, LayoutError> {
    let resolved = graph.resolve()?;
    options.validate()?;

    let usable = viewport.inset(Insets::uniform(options.margin));
    let degenerate = || LayoutError::DegenerateViewport {
        width: viewport.width(),
        height: viewport.height(),
        margin: options.margin,
        node_width: options.node_width,
    };
    if !viewport.is_drawable() || usable.is_empty() || usable.width() < options.node_width {
        return Err(degenerate());
    }

    info!(
        nodes = resolved.node_count(),
        edges = resolved.edge_count();
        "Computing flow layout"
    );

    let layering = layering::assign_columns(&resolved, options.align)?;
    debug!(columns = layering.column_count(); "Columns assigned");

    // Adjacent columns must not touch or overlap.
    let columns = layering.column_count();
    if columns > 1
        && (usable.width() - options.node_width) / (columns - 1) as f32 <= options.node_width
    {
        return Err(degenerate());
    }

    let mut placement = placement::Placement::new(&resolved, &layering, usable, options);
    placement.relax(options.iterations);
    debug!(value_scale = placement.value_scale(); "Node positions relaxed");

    let anchors = links::resolve_anchors(&resolved, placement.extents(), placement.value_scale());

    let nodes = resolved
        .node_ids()
        .map(|id| LayoutNode {
            id,
            label: resolved.node(id).label.clone(),
            color: resolved.color(id),
            column: layering.column(id),
            value: placement.value(id),
            extent: placement.extent(id),
        })
        .collect();

    let links = anchors
        .into_iter()
        .enumerate()
        .map(|(index, anchor)| {
            let id = EdgeId::new(index);
            let edge = resolved.edge(id);
            LayoutLink {
                id,
                source: edge.source,
                target: edge.target,
                value: edge.value,
                width: anchor.width,
                y0: anchor.y0,
                y1: anchor.y1,
            }
        })
        .collect();

    Ok(Layout {
        nodes,
        links,
        viewport,
        column_count: layering.column_count(),
        value_scale: placement.value_scale(),
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn split_graph(values: &[f32]) -> FlowGraph {
        let mut graph = FlowGraph::new();
        let root = graph.add_node("root");
        for (i, &value) in values.iter().enumerate() {
            let child = graph.add_node(format!("child {i}"));
            graph.add_edge(root, child, value);
        }
        graph
    }

    fn default_layout(graph: &FlowGraph) -> Result<Layout, LayoutError> {
        compute_layout(graph, Size::new(350.0, 400.0), &LayoutOptions::default())
    }

    #[test]
    fn test_root_split_scenario() {
        let layout = default_layout(&split_graph(&[50.0, 30.0, 20.0])).unwrap();

        assert_eq!(layout.column_count(), 2);
        assert_eq!(layout.nodes()[0].column(), 0);
        assert!(layout.nodes()[1..].iter().all(|n| n.column() == 1));

        let widths: Vec<f32> = layout.links().iter().map(LayoutLink::width).collect();
        assert_approx_eq!(f32, widths[0] / widths[2], 2.5, epsilon = 1e-4);
        assert_approx_eq!(f32, widths[1] / widths[2], 1.5, epsilon = 1e-4);

        let root_height = layout.nodes()[0].extent().height();
        let children: Vec<_> = layout.column(1);
        let children_heights: f32 = children.iter().map(|n| n.extent().height()).sum();
        assert_approx_eq!(f32, root_height, children_heights, epsilon = 1e-3);

        let span = children[2].extent().y1() - children[0].extent().y0();
        assert_approx_eq!(f32, span, root_height + 2.0 * 20.0, epsilon = 1e-3);
        // The children column is the binding one: it fills the usable height.
        assert_approx_eq!(f32, span, 360.0, epsilon = 1e-3);
        assert_approx_eq!(f32, layout.value_scale(), 3.2, epsilon = 1e-4);
    }

    #[test]
    fn test_columns_use_full_width() {
        let layout = default_layout(&split_graph(&[1.0])).unwrap();

        let root = layout.nodes()[0].extent();
        let child = layout.nodes()[1].extent();
        assert_approx_eq!(f32, root.x0(), 20.0);
        assert_approx_eq!(f32, root.width(), 15.0);
        assert_approx_eq!(f32, child.x1(), 330.0);
    }

    #[test]
    fn test_single_isolated_node() {
        let mut graph = FlowGraph::new();
        graph.add_node("alone");

        let layout = default_layout(&graph).unwrap();
        assert_eq!(layout.column_count(), 1);
        assert_eq!(layout.nodes().len(), 1);
        assert!(layout.links().is_empty());

        let extent = layout.nodes()[0].extent();
        assert_approx_eq!(f32, extent.height(), 1.0);
        assert!(extent.x1() > extent.x0());
        assert_approx_eq!(f32, extent.center_y(), 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_dangling_reference_scenario() {
        let mut graph = split_graph(&[1.0, 2.0]);
        graph.add_edge(NodeId::new(0), NodeId::new(5), 1.0);

        assert!(matches!(
            default_layout(&graph),
            Err(LayoutError::Graph(GraphError::DanglingReference { node: 5, .. }))
        ));
    }

    #[test]
    fn test_empty_graph_fails() {
        assert_eq!(
            default_layout(&FlowGraph::new()),
            Err(LayoutError::Graph(GraphError::EmptyGraph))
        );
    }

    #[test]
    fn test_cycle_fails() {
        let mut graph = split_graph(&[1.0]);
        graph.add_edge(NodeId::new(1), NodeId::new(0), 1.0);

        assert!(matches!(
            default_layout(&graph),
            Err(LayoutError::Graph(GraphError::CyclePresent { .. }))
        ));
    }

    #[test]
    fn test_degenerate_viewports() {
        let graph = split_graph(&[1.0]);
        let options = LayoutOptions::default();

        for viewport in [
            Size::new(0.0, 400.0),
            Size::new(350.0, -1.0),
            Size::new(40.0, 400.0),
            Size::new(350.0, 40.0),
            Size::new(50.0, 400.0),
        ] {
            assert!(
                matches!(
                    compute_layout(&graph, viewport, &options),
                    Err(LayoutError::DegenerateViewport { .. })
                ),
                "viewport {viewport:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_columns_too_narrow_for_nodes() {
        let mut graph = FlowGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_edge(a, b, 1.0);
        graph.add_edge(b, c, 1.0);
        let options = LayoutOptions::default();

        // 20 px of usable width cannot hold three 15 px columns apart.
        assert!(matches!(
            compute_layout(&graph, Size::new(60.0, 400.0), &options),
            Err(LayoutError::DegenerateViewport { .. })
        ));
        // Two columns fit exactly side by side but would touch.
        assert!(matches!(
            compute_layout(&split_graph(&[1.0]), Size::new(70.0, 400.0), &options),
            Err(LayoutError::DegenerateViewport { .. })
        ));

        let layout = compute_layout(&graph, Size::new(120.0, 400.0), &options).unwrap();
        for link in layout.links() {
            let source = layout.node(link.source()).extent();
            let target = layout.node(link.target()).extent();
            assert!(target.x0() > source.x1(), "ribbon {:?} runs backwards", link.id());
        }
    }

    #[test]
    fn test_cycle_reported_before_narrow_columns() {
        let mut graph = FlowGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b, 1.0);
        graph.add_edge(b, a, 1.0);

        assert!(matches!(
            compute_layout(&graph, Size::new(60.0, 400.0), &LayoutOptions::default()),
            Err(LayoutError::Graph(GraphError::CyclePresent { .. }))
        ));
    }

    #[test]
    fn test_invalid_options() {
        let graph = split_graph(&[1.0]);
        let viewport = Size::new(350.0, 400.0);

        for options in [
            LayoutOptions::default().with_node_width(0.0),
            LayoutOptions::default().with_node_padding(-1.0),
            LayoutOptions::default().with_margin(f32::NAN),
            LayoutOptions::default().with_min_node_height(-0.5),
        ] {
            assert!(matches!(
                compute_layout(&graph, viewport, &options),
                Err(LayoutError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn test_graph_errors_win_over_viewport_errors() {
        assert_eq!(
            compute_layout(&FlowGraph::new(), Size::new(0.0, 0.0), &LayoutOptions::default()),
            Err(LayoutError::Graph(GraphError::EmptyGraph))
        );
    }

    #[test]
    fn test_zero_value_edge_keeps_slot() {
        let layout = default_layout(&split_graph(&[10.0, 0.0, 5.0])).unwrap();

        let zero = &layout.links()[1];
        assert_eq!(zero.width(), 0.0);
        let root = layout.nodes()[0].extent();
        assert!(zero.y0() >= root.y0() && zero.y0() <= root.y1());

        let zero_child = layout.nodes()[2].extent();
        assert_approx_eq!(f32, zero_child.height(), 1.0);
    }

    #[test]
    fn test_all_zero_flow() {
        let layout = default_layout(&split_graph(&[0.0, 0.0])).unwrap();

        assert_eq!(layout.value_scale(), 0.0);
        for node in layout.nodes() {
            assert_approx_eq!(f32, node.extent().height(), 1.0);
        }
    }

    #[test]
    fn test_node_colors_resolved() {
        let mut graph = FlowGraph::new();
        let a = graph.add_colored_node("a", "#10b981");
        let b = graph.add_node("b");
        graph.add_edge(a, b, 1.0);

        let layout = default_layout(&graph).unwrap();
        assert_eq!(layout.node(a).color(), Color::new("#10b981").unwrap());
        assert_eq!(layout.node(b).color(), Color::palette(1));
        assert_eq!(layout.node(b).label(), "b");
    }

    #[test]
    fn test_content_bounds_inside_viewport() {
        let layout = default_layout(&split_graph(&[4.0, 3.0, 2.0, 1.0])).unwrap();

        let bounds = layout.content_bounds();
        assert!(bounds.x0() >= 20.0 - 1e-3);
        assert!(bounds.y0() >= 20.0 - 1e-3);
        assert!(bounds.x1() <= 330.0 + 1e-3);
        assert!(bounds.y1() <= 380.0 + 1e-3);
    }

    #[test]
    fn test_options_builder() {
        let options = LayoutOptions::default()
            .with_iterations(0)
            .with_align(NodeAlign::Justify);
        assert_eq!(options.iterations, 0);
        assert_eq!(options.align, NodeAlign::Justify);
        assert_eq!(options.node_width, 15.0);
    }
}
