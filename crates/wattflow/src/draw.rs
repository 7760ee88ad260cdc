//! Drawing primitives and the [`Surface`] abstraction.
//!
//! The renderer never talks to an output format directly. It describes what
//! to draw in terms of four operations ([`Surface::clear`],
//! [`Surface::fill_rect`], [`Surface::stroke_path`] and
//! [`Surface::draw_text`]) and leaves the encoding to the surface.
//!
//! # Overview
//!
//! - [`Surface`] - The drawing target trait
//! - [`FillStyle`] - Fill color and corner rounding of a rectangle
//! - [`StrokeStyle`] - Color and width of a stroked path
//! - [`CubicPath`] - A single cubic Bézier segment
//! - [`TextRun`] - A positioned, anchored line of text
//! - [`RenderLayer`] / [`LayeredOutput`] - z-ordered SVG node collection used
//!   by the SVG surface

mod layer;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};

use wattflow_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use crate::layout::Ribbon;

/// A drawing target.
///
/// Implementations decide how primitives are encoded and may fail with their
/// own error type; the renderer propagates those failures unchanged.
pub trait Surface {
    type Error;

    /// Discards everything drawn so far and prepares a canvas of `viewport`
    /// size. Drawing the same layout after `clear` yields the same output.
    fn clear(&mut self, viewport: Size) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, bounds: Bounds, fill: &FillStyle) -> Result<(), Self::Error>;

    fn stroke_path(&mut self, path: &CubicPath, stroke: &StrokeStyle) -> Result<(), Self::Error>;

    fn draw_text(&mut self, text: &TextRun) -> Result<(), Self::Error>;
}

/// How a rectangle is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    color: Color,
    corner_radius: f32,
}

impl FillStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            corner_radius: 0.0,
        }
    }

    pub fn with_corner_radius(mut self, corner_radius: f32) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

/// How a path is stroked.
///
/// Opacity travels in the color's alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    color: Color,
    width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// A cubic Bézier segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPath {
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
}

impl CubicPath {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn control1(&self) -> Point {
        self.control1
    }

    pub fn control2(&self) -> Point {
        self.control2
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

impl From<&Ribbon> for CubicPath {
    fn from(ribbon: &Ribbon) -> Self {
        let (control1, control2) = ribbon.control_points();
        Self::new(ribbon.start(), control1, control2, ribbon.end())
    }
}

/// Which end of a [`TextRun`] sits at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    /// Value of the SVG `text-anchor` attribute.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// A single line of text, vertically centred on `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    position: Point,
    content: String,
    anchor: TextAnchor,
    font_size: f32,
    color: Option<Color>,
}

impl TextRun {
    /// Creates a run drawn in the surrounding text color.
    pub fn new(position: Point, content: impl Into<String>, anchor: TextAnchor, font_size: f32) -> Self {
        Self {
            position,
            content: content.into(),
            anchor,
            font_size,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Explicit text color; `None` means the host's current text color.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}
