//! Z-ordered collection of SVG nodes.
//!
//! Surfaces may receive primitives in any order; [`LayeredOutput`] files each
//! SVG node under a [`RenderLayer`] and emits one `<g data-layer="...">` group
//! per layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use wattflow::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Ribbon, Box::new(Path::new()));
//!
//! // Ribbons render before nodes regardless of insertion order.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill.
    Background,
    /// Link ribbons, drawn beneath nodes so node edges stay crisp.
    Ribbon,
    /// Node rectangles.
    Node,
    /// Node labels.
    Label,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Ribbon => "ribbon",
            Self::Node => "node",
            Self::Label => "label",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` to `layer`. Nodes keep their insertion order within a
    /// layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of nodes filed under `layer`.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the output and returns one group per non-empty layer, in
    /// rendering order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable: insertion order survives within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
