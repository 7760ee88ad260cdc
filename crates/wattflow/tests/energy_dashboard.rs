//! The campus energy breakdown shown on the operations dashboard: total
//! consumption split across seven building categories.

use float_cmp::assert_approx_eq;

use wattflow::{
    FlowDiagramBuilder,
    geometry::Size,
    graph::FlowGraph,
    layout::{LayoutOptions, compute_layout},
};

const CATEGORIES: [(&str, f32); 7] = [
    ("教学", 450.0),
    ("住宿", 320.0),
    ("餐饮", 200.0),
    ("行政", 150.0),
    ("公区", 100.0),
    ("地下室", 40.0),
    ("体育场", 15.0),
];

fn dashboard_graph() -> FlowGraph {
    let mut graph = FlowGraph::new();
    let total = graph.add_node("总用电量");
    for (label, value) in CATEGORIES {
        let category = graph.add_node(label);
        graph.add_edge(total, category, value);
    }
    graph
}

#[test]
fn dashboard_layout() {
    let layout = compute_layout(
        &dashboard_graph(),
        Size::new(350.0, 380.0),
        &LayoutOptions::default(),
    )
    .unwrap();

    assert_eq!(layout.column_count(), 2);
    assert_eq!(layout.links().len(), 7);

    // Ribbon thickness follows the consumption figures.
    let widths: Vec<f32> = layout.links().iter().map(|l| l.width()).collect();
    for (i, (_, value)) in CATEGORIES.iter().enumerate() {
        assert_approx_eq!(f32, widths[i] / widths[0], value / 450.0, epsilon = 1e-4);
    }

    // Seven categories, six gaps: the category column is the binding one.
    let total: f32 = CATEGORIES.iter().map(|(_, v)| v).sum();
    assert_approx_eq!(
        f32,
        layout.value_scale(),
        (340.0 - 6.0 * 20.0) / total,
        epsilon = 1e-4
    );

    let root = layout.nodes()[0].extent();
    assert_approx_eq!(f32, root.height(), total * layout.value_scale(), epsilon = 1e-3);
    for category in layout.column(1) {
        assert!(category.extent().y0() >= 20.0 - 1e-3);
        assert!(category.extent().y1() <= 360.0 + 1e-3);
    }
}

#[test]
fn dashboard_svg() {
    let svg = FlowDiagramBuilder::default()
        .render_svg(&dashboard_graph(), Size::new(350.0, 380.0))
        .unwrap();

    assert!(svg.contains("总用电量"));
    assert!(svg.contains("体育场"));
    assert_eq!(svg.matches("<path").count(), 7);
    assert_eq!(svg.matches("<rect").count(), 8);
    // The root label sits right of its node, category labels left of theirs.
    assert_eq!(svg.matches(r#"text-anchor="start""#).count(), 1);
    assert_eq!(svg.matches(r#"text-anchor="end""#).count(), 7);
}
