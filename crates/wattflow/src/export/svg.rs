//! SVG backend: a [`Surface`] that builds an `svg::Document`.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use wattflow_core::{
    color::Color,
    geometry::{Bounds, Size},
};

use crate::{
    draw::{CubicPath, FillStyle, LayeredOutput, RenderLayer, StrokeStyle, Surface, TextRun},
    export::{self, Exporter},
    layout::Layout,
    render::{self, RenderStyle},
};

/// In-memory SVG drawing surface.
///
/// Primitives are filed into [`RenderLayer`]s as they arrive, so the final
/// document always stacks ribbons beneath nodes beneath labels.
///
/// # Examples
///
/// ```
/// use wattflow::{
///     draw::{FillStyle, Surface},
///     export::svg::SvgSurface,
/// };
/// use wattflow_core::{color::Color, geometry::{Bounds, Size}};
///
/// let mut surface = SvgSurface::new();
/// surface.clear(Size::new(100.0, 50.0)).unwrap();
/// surface
///     .fill_rect(Bounds::new(10.0, 10.0, 25.0, 40.0), &FillStyle::new(Color::palette(0)))
///     .unwrap();
///
/// let svg = surface.to_svg_string();
/// assert!(svg.contains("<rect"));
/// ```
#[derive(Debug, Default)]
pub struct SvgSurface {
    viewport: Size,
    background: Option<Color>,
    output: LayeredOutput,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the whole canvas with `background` on every [`Surface::clear`].
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Consumes the surface and assembles the document.
    pub fn into_document(self) -> Document {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        for group in self.output.render() {
            doc = doc.add(group);
        }
        doc
    }

    pub fn to_svg_string(self) -> String {
        self.into_document().to_string()
    }
}

impl Surface for SvgSurface {
    type Error = export::Error;

    fn clear(&mut self, viewport: Size) -> Result<(), export::Error> {
        if !viewport.is_drawable() {
            return Err(export::Error::Render(format!(
                "cannot draw on a {}x{} canvas",
                viewport.width(),
                viewport.height()
            )));
        }

        self.output.clear();
        self.viewport = viewport;

        if let Some(color) = &self.background {
            let background = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", viewport.width())
                .set("height", viewport.height())
                .set("fill", color);
            self.output
                .add_to_layer(RenderLayer::Background, Box::new(background));
        }
        Ok(())
    }

    fn fill_rect(&mut self, bounds: Bounds, fill: &FillStyle) -> Result<(), export::Error> {
        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.x0())
            .set("y", bounds.y0())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", fill.color().with_alpha(1.0).to_string());
        if fill.color().alpha() < 1.0 {
            rect = rect.set("fill-opacity", fill.color().alpha());
        }
        if fill.corner_radius() > 0.0 {
            rect = rect.set("rx", fill.corner_radius());
        }
        self.output.add_to_layer(RenderLayer::Node, Box::new(rect));
        Ok(())
    }

    fn stroke_path(&mut self, path: &CubicPath, stroke: &StrokeStyle) -> Result<(), export::Error> {
        let (start, c1, c2, end) = (path.start(), path.control1(), path.control2(), path.end());
        let data = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            start.x(),
            start.y(),
            c1.x(),
            c1.y(),
            c2.x(),
            c2.y(),
            end.x(),
            end.y()
        );

        let element = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", stroke.color().with_alpha(1.0).to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());
        self.output
            .add_to_layer(RenderLayer::Ribbon, Box::new(element));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextRun) -> Result<(), export::Error> {
        let fill = text
            .color()
            .map_or_else(|| "currentColor".to_string(), |color| color.to_string());

        let element = svg_element::Text::new(text.content())
            .set("x", text.position().x())
            .set("y", text.position().y())
            .set("dy", "0.35em")
            .set("text-anchor", text.anchor().to_svg_value())
            .set("font-size", text.font_size())
            .set("fill", fill);
        self.output
            .add_to_layer(RenderLayer::Label, Box::new(element));
        Ok(())
    }
}

/// Writes rendered layouts to SVG files.
#[derive(Debug, Default)]
pub struct SvgExporter {
    background: Option<Color>,
}

impl SvgExporter {
    pub fn new(background: Option<Color>) -> Self {
        Self { background }
    }

    /// Renders `layout` into a fresh document.
    pub fn render_document(
        &self,
        layout: &Layout,
        style: &RenderStyle,
    ) -> Result<Document, export::Error> {
        let mut surface = SvgSurface::new().with_background(self.background);
        render::render(layout, style, &mut surface)?;
        debug!("SVG document rendered");
        Ok(surface.into_document())
    }

    fn write_document(&self, doc: &Document, path: &Path) -> Result<(), export::Error> {
        let file_name = path.display().to_string();
        info!(file_name; "Creating SVG file");

        let mut file = File::create(path).map_err(|err| {
            error!(file_name, err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name, err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })
    }
}

impl Exporter for SvgExporter {
    fn export_layout(
        &mut self,
        layout: &Layout,
        style: &RenderStyle,
        path: &Path,
    ) -> Result<(), export::Error> {
        let doc = self.render_document(layout, style)?;
        self.write_document(&doc, path)
    }
}
