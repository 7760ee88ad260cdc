//! Node sizing, initial stacking and relaxation.

use log::{trace, warn};

use wattflow_core::{
    geometry::Bounds,
    graph::{NodeId, ResolvedGraph},
};

use super::{LayoutOptions, layering::Layering};

/// Working state of the vertical placement passes.
///
/// Extents are indexed by node id; `columns` holds node ids per column and
/// is re-sorted top to bottom whenever a column is resolved.
pub(super) struct Placement<'g, 'a> {
    graph: &'g ResolvedGraph<'a>,
    columns: Vec<Vec<NodeId>>,
    values: Vec<f32>,
    extents: Vec<Bounds>,
    usable: Bounds,
    padding: f32,
    value_scale: f32,
}

impl<'g, 'a> Placement<'g, 'a> {
    /// Sizes every node and stacks each column, centred in `usable`.
    pub(super) fn new(
        graph: &'g ResolvedGraph<'a>,
        layering: &Layering,
        usable: Bounds,
        options: &LayoutOptions,
    ) -> Self {
        let columns = layering.groups();
        let values: Vec<f32> = graph
            .node_ids()
            .map(|id| graph.incoming_value(id).max(graph.outgoing_value(id)))
            .collect();

        let padding = column_padding(
            &columns,
            usable.height(),
            options.node_padding,
            options.min_node_height,
        );
        let value_scale = value_scale(
            &columns,
            &values,
            usable.height(),
            padding,
            options.min_node_height,
        );
        trace!(padding, value_scale; "Column sizing resolved");

        let column_step = if columns.len() > 1 {
            (usable.width() - options.node_width) / (columns.len() - 1) as f32
        } else {
            0.0
        };

        let mut extents = vec![Bounds::default(); values.len()];
        for (column, ids) in columns.iter().enumerate() {
            let x0 = usable.x0() + column as f32 * column_step;
            let mut y = usable.y0();
            for &id in ids {
                let height = (values[id.index()] * value_scale).max(options.min_node_height);
                extents[id.index()] = Bounds::new(x0, y, x0 + options.node_width, y + height);
                y += height + padding;
            }
        }

        let mut placement = Self {
            graph,
            columns,
            values,
            extents,
            usable,
            padding,
            value_scale,
        };
        for column in 0..placement.columns.len() {
            placement.center_column(column);
        }
        placement
    }

    pub(super) fn value_scale(&self) -> f32 {
        self.value_scale
    }

    pub(super) fn value(&self, id: NodeId) -> f32 {
        self.values[id.index()]
    }

    pub(super) fn extent(&self, id: NodeId) -> Bounds {
        self.extents[id.index()]
    }

    pub(super) fn extents(&self) -> &[Bounds] {
        &self.extents
    }

    /// Runs `iterations` rounds of backward then forward relaxation.
    ///
    /// The step size decays with each round so early rounds make large moves
    /// and later rounds only refine.
    pub(super) fn relax(&mut self, iterations: usize) {
        for iteration in 0..iterations {
            let alpha = 0.99f32.powi(iteration as i32);
            self.relax_right_to_left(alpha);
            self.relax_left_to_right(alpha);
        }
    }

    /// Moves each node towards the weighted centre of its targets.
    fn relax_right_to_left(&mut self, alpha: f32) {
        for column in (0..self.columns.len().saturating_sub(1)).rev() {
            for i in 0..self.columns[column].len() {
                let id = self.columns[column][i];
                let neighbours = self
                    .graph
                    .outgoing(id)
                    .iter()
                    .map(|&e| self.graph.edge(e))
                    .map(|edge| (edge.target, edge.value));
                if let Some(center) = self.weighted_center(neighbours) {
                    self.move_towards(id, center, alpha);
                }
            }
            self.resolve_collisions(column);
        }
    }

    /// Moves each node towards the weighted centre of its sources.
    fn relax_left_to_right(&mut self, alpha: f32) {
        for column in 1..self.columns.len() {
            for i in 0..self.columns[column].len() {
                let id = self.columns[column][i];
                let neighbours = self
                    .graph
                    .incoming(id)
                    .iter()
                    .map(|&e| self.graph.edge(e))
                    .map(|edge| (edge.source, edge.value));
                if let Some(center) = self.weighted_center(neighbours) {
                    self.move_towards(id, center, alpha);
                }
            }
            self.resolve_collisions(column);
        }
    }

    /// Value-weighted average of neighbour centres, `None` when the total
    /// weight is zero.
    fn weighted_center(&self, neighbours: impl Iterator<Item = (NodeId, f32)>) -> Option<f32> {
        let (sum, weight) = neighbours.fold((0.0f32, 0.0f32), |(sum, weight), (id, value)| {
            (sum + self.extents[id.index()].center_y() * value, weight + value)
        });
        (weight > 0.0).then(|| sum / weight)
    }

    fn move_towards(&mut self, id: NodeId, center: f32, alpha: f32) {
        let extent = &mut self.extents[id.index()];
        let dy = (center - extent.center_y()) * alpha;
        *extent = extent.translate_y(dy);
    }

    /// Restores the non-overlap invariant of one column.
    ///
    /// Nodes are ordered by position (ties by input order), pushed down below
    /// their upper neighbour, then pushed back up from the bottom edge. A
    /// column taller than the usable area is centred instead.
    fn resolve_collisions(&mut self, column: usize) {
        let extents = &self.extents;
        self.columns[column].sort_by(|a, b| {
            extents[a.index()]
                .y0()
                .total_cmp(&extents[b.index()].y0())
                .then(a.cmp(b))
        });

        let mut y = self.usable.y0();
        for &id in &self.columns[column] {
            let extent = &mut self.extents[id.index()];
            if extent.y0() < y {
                *extent = extent.with_top(y);
            }
            y = extent.y1() + self.padding;
        }

        let mut y = self.usable.y1();
        for &id in self.columns[column].iter().rev() {
            let extent = &mut self.extents[id.index()];
            if extent.y1() > y {
                *extent = extent.translate_y(y - extent.y1());
            }
            y = extent.y0() - self.padding;
        }

        let top = self.extents[self.columns[column][0].index()].y0();
        if top < self.usable.y0() {
            self.center_column(column);
        }
    }

    /// Centres a tightly packed column when it does not fill the usable
    /// height, or spreads its overflow evenly above and below when it does.
    fn center_column(&mut self, column: usize) {
        let ids = &self.columns[column];
        let mut y = self.usable.y0();
        for &id in ids {
            let extent = &mut self.extents[id.index()];
            *extent = extent.with_top(y);
            y = extent.y1() + self.padding;
        }
        let occupied = y - self.padding - self.usable.y0();
        let shift = (self.usable.height() - occupied) / 2.0;
        for &id in ids {
            let extent = &mut self.extents[id.index()];
            *extent = extent.translate_y(shift);
        }
    }
}

/// The gap between nodes, clamped so the tallest column's gaps and the
/// minimum height of its nodes never exceed the usable height.
fn column_padding(
    columns: &[Vec<NodeId>],
    usable_height: f32,
    node_padding: f32,
    min_node_height: f32,
) -> f32 {
    let max_nodes = columns.iter().map(Vec::len).max().unwrap_or(0);
    if max_nodes <= 1 {
        return node_padding;
    }
    let limit = ((usable_height - max_nodes as f32 * min_node_height) / (max_nodes - 1) as f32)
        .max(0.0);
    if node_padding > limit {
        warn!(
            node_padding,
            clamped = limit,
            column_size = max_nodes;
            "Node padding does not fit the tallest column, clamping"
        );
        limit
    } else {
        node_padding
    }
}

/// Pixels per unit of flow: the largest scale at which every column still
/// fits the usable height once its gaps are reserved.
///
/// Columns without flow do not constrain the scale; if no column carries
/// flow the scale is zero.
fn value_scale(
    columns: &[Vec<NodeId>],
    values: &[f32],
    usable_height: f32,
    padding: f32,
    min_node_height: f32,
) -> f32 {
    columns
        .iter()
        .filter_map(|ids| column_scale(ids, values, usable_height, padding, min_node_height))
        .reduce(f32::min)
        .unwrap_or(0.0)
}

/// Scale at which one column exactly fills `usable_height`.
///
/// A node whose scaled value falls below `min_node_height` is drawn at that
/// height instead, so its space is reserved up front and the scale solved
/// over the remaining nodes. Each reservation lowers the scale, which can
/// push further nodes under the minimum; the loop stops once the reserved
/// set no longer grows.
fn column_scale(
    ids: &[NodeId],
    values: &[f32],
    usable_height: f32,
    padding: f32,
    min_node_height: f32,
) -> Option<f32> {
    let gaps = ids.len().saturating_sub(1) as f32 * padding;
    let mut reserved = vec![false; ids.len()];

    loop {
        let (count, total) = ids
            .iter()
            .zip(&reserved)
            .filter(|&(_, &is_reserved)| !is_reserved)
            .fold((0usize, 0.0f32), |(count, total), (id, _)| {
                (count + 1, total + values[id.index()])
            });
        if total <= 0.0 {
            return None;
        }

        let fixed = (ids.len() - count) as f32 * min_node_height;
        let scale = (usable_height - gaps - fixed).max(0.0) / total;

        let mut grown = false;
        for (id, is_reserved) in ids.iter().zip(reserved.iter_mut()) {
            if !*is_reserved && values[id.index()] * scale < min_node_height {
                *is_reserved = true;
                grown = true;
            }
        }
        if !grown {
            return Some(scale);
        }
    }
}
