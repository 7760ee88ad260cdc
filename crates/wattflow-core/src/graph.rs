//! Flow graph input model.
//!
//! A [`FlowGraph`] is the caller-supplied description of a flow diagram: an
//! ordered list of nodes (whose position in the list is their identity) and
//! an ordered list of weighted edges between them. It is plain data and can be
//! deserialized with serde, which is how the CLI reads it from TOML.
//!
//! Before layout, a graph is checked with [`FlowGraph::resolve`], producing a
//! [`ResolvedGraph`]: an arena view with per-node incoming/outgoing edge lists
//! and resolved colors. Cycle detection happens later, when the layout engine
//! asks for a [`ResolvedGraph::topological_order`].
//!
//! # Example
//!
//! ```
//! # use wattflow_core::graph::FlowGraph;
//! let mut graph = FlowGraph::new();
//! let total = graph.add_node("Total");
//! let teaching = graph.add_node("Teaching");
//! graph.add_edge(total, teaching, 450.0);
//!
//! let resolved = graph.resolve().unwrap();
//! assert_eq!(resolved.outgoing(total).len(), 1);
//! ```

use std::{collections::VecDeque, fmt};

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Identity of a node: its index in [`FlowGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of an edge: its index in [`FlowGraph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Display string.
    #[serde(alias = "name")]
    pub label: String,

    /// Optional CSS color; the palette is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A weighted edge as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f32,
}

/// Errors detected while validating a flow graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("flow graph has no nodes")]
    EmptyGraph,

    #[error("edge {edge} references node {node}, but the graph only has {node_count} nodes")]
    DanglingReference {
        edge: usize,
        node: usize,
        node_count: usize,
    },

    #[error("edge {edge} connects node {node} to itself")]
    SelfLoop { edge: usize, node: NodeId },

    #[error("edge {edge} has invalid value {value}; values must be finite and non-negative")]
    InvalidValue { edge: usize, value: f32 },

    #[error("node {node} has an invalid color: {message}")]
    InvalidColor { node: NodeId, message: String },

    #[error("flow graph contains a cycle through node {node}")]
    CyclePresent { node: NodeId },
}

/// A weighted directed flow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    nodes: Vec<NodeSpec>,

    #[serde(default, alias = "links")]
    edges: Vec<EdgeSpec>,
}

impl FlowGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node that will take its color from the palette.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        self.push_node(label.into(), None)
    }

    /// Appends a node with an explicit CSS color.
    pub fn add_colored_node(&mut self, label: impl Into<String>, color: impl Into<String>) -> NodeId {
        self.push_node(label.into(), Some(color.into()))
    }

    fn push_node(&mut self, label: String, color: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSpec { label, color });
        id
    }

    /// Appends an edge. References are not checked until [`FlowGraph::resolve`].
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, value: f32) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeSpec {
            source,
            target,
            value,
        });
        id
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    /// Returns a copy of this graph with every edge value multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let edges = self
            .edges
            .iter()
            .map(|edge| EdgeSpec {
                value: edge.value * factor,
                ..*edge
            })
            .collect();
        Self {
            nodes: self.nodes.clone(),
            edges,
        }
    }

    /// Validates the graph and builds its adjacency arena.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyGraph`] when there are no nodes
    /// - [`GraphError::DanglingReference`] when an edge endpoint is out of range
    /// - [`GraphError::SelfLoop`] when an edge starts and ends at the same node
    /// - [`GraphError::InvalidValue`] for negative or non-finite values
    /// - [`GraphError::InvalidColor`] for unparsable node colors
    pub fn resolve(&self) -> Result<ResolvedGraph<'_>, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let node_count = self.nodes.len();
        let mut incoming = vec![Vec::new(); node_count];
        let mut outgoing = vec![Vec::new(); node_count];

        for (index, edge) in self.edges.iter().enumerate() {
            for endpoint in [edge.source, edge.target] {
                if endpoint.index() >= node_count {
                    return Err(GraphError::DanglingReference {
                        edge: index,
                        node: endpoint.index(),
                        node_count,
                    });
                }
            }
            if edge.source == edge.target {
                return Err(GraphError::SelfLoop {
                    edge: index,
                    node: edge.source,
                });
            }
            if !edge.value.is_finite() || edge.value < 0.0 {
                return Err(GraphError::InvalidValue {
                    edge: index,
                    value: edge.value,
                });
            }

            outgoing[edge.source.index()].push(EdgeId(index));
            incoming[edge.target.index()].push(EdgeId(index));
        }

        let colors = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| match &node.color {
                Some(color) => Color::new(color).map_err(|message| GraphError::InvalidColor {
                    node: NodeId(index),
                    message,
                }),
                None => Ok(Color::palette(index)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(nodes = node_count, edges = self.edges.len(); "Flow graph resolved");

        Ok(ResolvedGraph {
            graph: self,
            colors,
            incoming,
            outgoing,
        })
    }
}

/// A validated view over a [`FlowGraph`] with adjacency lists.
///
/// Edge lists preserve input order.
#[derive(Debug)]
pub struct ResolvedGraph<'a> {
    graph: &'a FlowGraph,
    colors: Vec<Color>,
    incoming: Vec<Vec<EdgeId>>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl<'a> ResolvedGraph<'a> {
    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edges.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.node_count()).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> &'a NodeSpec {
        &self.graph.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &'a EdgeSpec {
        &self.graph.edges[id.index()]
    }

    /// Resolved color of a node (explicit or palette).
    pub fn color(&self, id: NodeId) -> Color {
        self.colors[id.index()]
    }

    /// Edges ending at `id`, in input order.
    pub fn incoming(&self, id: NodeId) -> &[EdgeId] {
        &self.incoming[id.index()]
    }

    /// Edges starting at `id`, in input order.
    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        &self.outgoing[id.index()]
    }

    /// Sum of the values of edges ending at `id`.
    pub fn incoming_value(&self, id: NodeId) -> f32 {
        self.incoming(id).iter().map(|&e| self.edge(e).value).sum()
    }

    /// Sum of the values of edges starting at `id`.
    pub fn outgoing_value(&self, id: NodeId) -> f32 {
        self.outgoing(id).iter().map(|&e| self.edge(e).value).sum()
    }

    /// Returns a topological order of the nodes (Kahn's algorithm, ties
    /// broken by input order).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclePresent`] naming a node that lies on a cycle.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, GraphError> {
        let mut in_degree: Vec<usize> = self.incoming.iter().map(Vec::len).collect();
        let mut ready: VecDeque<NodeId> = self
            .node_ids()
            .filter(|id| in_degree[id.index()] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(node) = ready.pop_front() {
            order.push(node);
            for &edge in self.outgoing(node) {
                let target = self.edge(edge).target;
                in_degree[target.index()] -= 1;
                if in_degree[target.index()] == 0 {
                    ready.push_back(target);
                }
            }
        }

        if order.len() == self.node_count() {
            return Ok(order);
        }

        let node = self.find_cycle_member(&in_degree);
        Err(GraphError::CyclePresent { node })
    }

    /// Walks backwards from a node left unordered by Kahn's algorithm.
    ///
    /// Every such node has an unordered predecessor, so the walk must revisit
    /// a node, and that node lies on a cycle.
    fn find_cycle_member(&self, in_degree: &[usize]) -> NodeId {
        let start = self
            .node_ids()
            .find(|id| in_degree[id.index()] > 0)
            .expect("an incomplete topological order leaves a node with positive in-degree");

        let mut visited = vec![false; self.node_count()];
        let mut current = start;
        while !visited[current.index()] {
            visited[current.index()] = true;
            current = self
                .incoming(current)
                .iter()
                .map(|&e| self.edge(e).source)
                .find(|source| in_degree[source.index()] > 0)
                .expect("an unordered node always has an unordered predecessor");
        }
        current
    }
}
