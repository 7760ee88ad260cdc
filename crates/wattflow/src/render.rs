//! Draws a [`Layout`] onto a [`Surface`].
//!
//! Rendering is a stateless pass over the layout: the surface is cleared,
//! then every ribbon, node and label is emitted in input order. Nothing is
//! validated here; the layout engine already rejected anything malformed.

use log::{debug, trace};

use wattflow_core::{color::Color, geometry::Point};

use crate::{
    draw::{CubicPath, FillStyle, StrokeStyle, Surface, TextAnchor, TextRun},
    layout::Layout,
};

/// Thinnest stroke a ribbon is drawn with, so zero-flow links stay visible.
const MIN_RIBBON_STROKE: f32 = 1.0;

/// Resolved visual parameters of a render.
///
/// Built from [`StyleConfig`](crate::config::StyleConfig) by
/// [`StyleConfig::render_style`](crate::config::StyleConfig::render_style), or
/// directly with the `with_*` builders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    link_opacity: f32,
    link_color: Option<Color>,
    font_size: f32,
    label_offset: f32,
    label_color: Option<Color>,
    node_corner_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            link_opacity: 0.4,
            link_color: None,
            font_size: 12.0,
            label_offset: 6.0,
            label_color: None,
            node_corner_radius: 2.0,
        }
    }
}

impl RenderStyle {
    pub fn with_link_opacity(mut self, link_opacity: f32) -> Self {
        self.link_opacity = link_opacity;
        self
    }

    /// Draws every ribbon in `link_color` instead of its target's color.
    pub fn with_link_color(mut self, link_color: Option<Color>) -> Self {
        self.link_color = link_color;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_label_offset(mut self, label_offset: f32) -> Self {
        self.label_offset = label_offset;
        self
    }

    /// Text color of labels; `None` inherits the host's text color.
    pub fn with_label_color(mut self, label_color: Option<Color>) -> Self {
        self.label_color = label_color;
        self
    }

    pub fn with_node_corner_radius(mut self, node_corner_radius: f32) -> Self {
        self.node_corner_radius = node_corner_radius;
        self
    }

    pub fn link_opacity(&self) -> f32 {
        self.link_opacity
    }

    pub fn link_color(&self) -> Option<Color> {
        self.link_color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn label_color(&self) -> Option<Color> {
        self.label_color
    }

    pub fn node_corner_radius(&self) -> f32 {
        self.node_corner_radius
    }
}

/// Draws `layout` onto `surface`.
///
/// Labels of nodes left of the viewport's centre line are placed to the
/// right of the node, the others to the left, so labels point inwards.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn render<S: Surface>(
    layout: &Layout,
    style: &RenderStyle,
    surface: &mut S,
) -> Result<(), S::Error> {
    let viewport = layout.viewport();
    debug!(
        width = viewport.width(),
        height = viewport.height(),
        nodes = layout.nodes().len(),
        links = layout.links().len();
        "Rendering layout"
    );

    surface.clear(viewport)?;

    for link in layout.links() {
        let ribbon = layout.ribbon(link);
        let color = style
            .link_color
            .unwrap_or_else(|| layout.node(link.target()).color())
            .with_alpha(style.link_opacity);
        let stroke = StrokeStyle::new(color, ribbon.width().max(MIN_RIBBON_STROKE));
        trace!(link = link.id().index(), width = ribbon.width(); "Drawing ribbon");
        surface.stroke_path(&CubicPath::from(&ribbon), &stroke)?;
    }

    for node in layout.nodes() {
        let fill = FillStyle::new(node.color()).with_corner_radius(style.node_corner_radius);
        surface.fill_rect(node.extent(), &fill)?;
    }

    let center_x = viewport.width() / 2.0;
    for node in layout.nodes() {
        let extent = node.extent();
        let (x, anchor) = if extent.x0() < center_x {
            (extent.x1() + style.label_offset, TextAnchor::Start)
        } else {
            (extent.x0() - style.label_offset, TextAnchor::End)
        };
        let text = TextRun::new(
            Point::new(x, extent.center_y()),
            node.label(),
            anchor,
            style.font_size,
        )
        .with_color(style.label_color);
        surface.draw_text(&text)?;
    }

    Ok(())
}
