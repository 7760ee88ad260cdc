//! Column assignment.
//!
//! Depth (longest path from a node without incoming edges) and height
//! (longest path to a node without outgoing edges) are computed by relaxing
//! edges over a topological order. The [`NodeAlign`] strategy then maps them to
//! columns; every strategy keeps `column(target) > column(source)`.

use serde::Deserialize;

use wattflow_core::graph::{GraphError, NodeId, ResolvedGraph};

/// How nodes are assigned to columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAlign {
    /// Column is the node's depth.
    #[default]
    Left,
    /// Nodes are pushed right: sinks share the last column.
    Right,
    /// Like [`NodeAlign::Left`], but sinks are moved to the last column.
    Justify,
    /// Like [`NodeAlign::Left`], but sources sit just before their nearest target.
    Center,
}

#[derive(Debug)]
pub(super) struct Layering {
    columns: Vec<usize>,
    column_count: usize,
}

impl Layering {
    pub(super) fn column(&self, id: NodeId) -> usize {
        self.columns[id.index()]
    }

    pub(super) fn column_count(&self) -> usize {
        self.column_count
    }

    /// Node ids grouped per column, each group in input order.
    pub(super) fn groups(&self) -> Vec<Vec<NodeId>> {
        let mut groups = vec![Vec::new(); self.column_count];
        for (index, &column) in self.columns.iter().enumerate() {
            groups[column].push(NodeId::new(index));
        }
        groups
    }
}

pub(super) fn assign_columns(
    graph: &ResolvedGraph<'_>,
    align: NodeAlign,
) -> Result<Layering, GraphError> {
    let order = graph.topological_order()?;

    let mut depth = vec![0usize; graph.node_count()];
    for &node in &order {
        for &edge in graph.outgoing(node) {
            let target = graph.edge(edge).target.index();
            depth[target] = depth[target].max(depth[node.index()] + 1);
        }
    }

    let mut height = vec![0usize; graph.node_count()];
    for &node in order.iter().rev() {
        for &edge in graph.incoming(node) {
            let source = graph.edge(edge).source.index();
            height[source] = height[source].max(height[node.index()] + 1);
        }
    }

    let last = depth.iter().copied().max().unwrap_or(0);

    let columns: Vec<usize> = graph
        .node_ids()
        .map(|id| {
            let i = id.index();
            match align {
                NodeAlign::Left => depth[i],
                NodeAlign::Right => last - height[i],
                NodeAlign::Justify if graph.outgoing(id).is_empty() => last,
                NodeAlign::Justify => depth[i],
                NodeAlign::Center if !graph.incoming(id).is_empty() => depth[i],
                NodeAlign::Center => graph
                    .outgoing(id)
                    .iter()
                    .map(|&e| depth[graph.edge(e).target.index()])
                    .min()
                    .map_or(0, |nearest| nearest - 1),
            }
        })
        .collect();

    let column_count = columns.iter().copied().max().unwrap_or(0) + 1;

    Ok(Layering {
        columns,
        column_count,
    })
}
