//! Link anchoring and ribbon geometry.

use wattflow_core::{
    geometry::{Bounds, Point},
    graph::{EdgeId, NodeId, ResolvedGraph},
};

use super::LayoutLink;

/// Resolved width and anchor centres of one link.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Anchor {
    pub(super) width: f32,
    pub(super) y0: f32,
    pub(super) y1: f32,
}

/// Stacks links along their nodes' edges.
///
/// Outgoing links of a node are ordered by the vertical position of their
/// targets and stacked downward from the node's top edge; incoming links are
/// ordered by their sources. Ties fall back to edge order so the result is
/// deterministic. The returned anchors are indexed by edge id.
pub(super) fn resolve_anchors(
    graph: &ResolvedGraph<'_>,
    extents: &[Bounds],
    value_scale: f32,
) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = (0..graph.edge_count())
        .map(|index| Anchor {
            width: graph.edge(EdgeId::new(index)).value * value_scale,
            ..Anchor::default()
        })
        .collect();

    for id in graph.node_ids() {
        let top = extents[id.index()].y0();

        let outgoing = sorted_by_position(graph.outgoing(id), extents, |e| graph.edge(e).target);
        let mut y = top;
        for edge in outgoing {
            let anchor = &mut anchors[edge.index()];
            anchor.y0 = y + anchor.width / 2.0;
            y += anchor.width;
        }

        let incoming = sorted_by_position(graph.incoming(id), extents, |e| graph.edge(e).source);
        let mut y = top;
        for edge in incoming {
            let anchor = &mut anchors[edge.index()];
            anchor.y1 = y + anchor.width / 2.0;
            y += anchor.width;
        }
    }

    anchors
}

fn sorted_by_position(
    edges: &[EdgeId],
    extents: &[Bounds],
    other_end: impl Fn(EdgeId) -> NodeId,
) -> Vec<EdgeId> {
    let mut edges = edges.to_vec();
    edges.sort_by(|&a, &b| {
        extents[other_end(a).index()]
            .y0()
            .total_cmp(&extents[other_end(b).index()].y0())
            .then(a.cmp(&b))
    });
    edges
}

/// Centre line of a link ribbon: a horizontal cubic Bézier from the source's
/// right edge to the target's left edge, drawn with the link's width.
///
/// Both control points sit at the horizontal midpoint, one level with each
/// end, which makes the curve leave and enter its nodes horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    start: Point,
    end: Point,
    width: f32,
}

impl Ribbon {
    pub(super) fn between(source: Bounds, target: Bounds, link: &LayoutLink) -> Self {
        Self {
            start: Point::new(source.x1(), link.y0),
            end: Point::new(target.x0(), link.y1),
            width: link.width,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Thickness of the ribbon; zero for links that carry no flow.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The two Bézier control points, in drawing order.
    pub fn control_points(&self) -> (Point, Point) {
        let mid = self.start.midpoint(self.end).x();
        (self.start.with_x(mid), self.end.with_x(mid))
    }
}
