//! Geometric primitives for flow diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions (used for viewports)
//! - [`Bounds`] - An axis-aligned rectangle described by its `x0/y0/x1/y1` edges
//! - [`Insets`] - Margin values for four sides
//!
//! # Coordinate System
//!
//! Wattflow uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Flow runs left to right along X; nodes of the same column stack along Y.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use wattflow_core::geometry::Point;
/// let source = Point::new(35.0, 100.0);
/// let target = Point::new(315.0, 60.0);
///
/// let mid = source.midpoint(target);
/// assert_eq!(mid.x(), 175.0);
/// assert_eq!(mid.y(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }


    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Width and height of a drawing area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns `true` when both dimensions are finite and strictly positive.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns the rectangle left after removing `insets` from a `Size`
    /// anchored at the origin.
    ///
    /// The result may be inverted (`x1 < x0`) when the insets exceed the size;
    /// callers check [`Bounds::is_empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use wattflow_core::geometry::{Insets, Size};
    /// let usable = Size::new(350.0, 400.0).inset(Insets::uniform(20.0));
    /// assert_eq!(usable.x0(), 20.0);
    /// assert_eq!(usable.x1(), 330.0);
    /// assert_eq!(usable.height(), 360.0);
    /// ```
    pub fn inset(self, insets: Insets) -> Bounds {
        Bounds::new(
            insets.left,
            insets.top,
            self.width - insets.right,
            self.height - insets.bottom,
        )
    }
}

/// An axis-aligned rectangle given by its left (`x0`), top (`y0`), right
/// (`x1`) and bottom (`y1`) edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Bounds {
    /// Creates bounds from its four edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            x0: top_left.x,
            y0: top_left.y,
            x1: top_left.x + size.width,
            y1: top_left.y + size.height,
        }
    }

    pub fn x0(self) -> f32 {
        self.x0
    }

    pub fn y0(self) -> f32 {
        self.y0
    }

    pub fn x1(self) -> f32 {
        self.x1
    }

    pub fn y1(self) -> f32 {
        self.y1
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// Returns the vertical centre line of the bounds
    pub fn center_y(self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }



    /// Returns `true` if the area is zero or the rectangle is inverted.
    pub fn is_empty(self) -> bool {
        !(self.x1 > self.x0 && self.y1 > self.y0)
    }

    /// Moves the bounds vertically so its top edge sits at `y0`, keeping its height.
    pub fn with_top(self, y0: f32) -> Self {
        let height = self.height();
        Self {
            y0,
            y1: y0 + height,
            ..self
        }
    }

    /// Moves the bounds vertically by `dy`.
    pub fn translate_y(self, dy: f32) -> Self {
        Self {
            y0: self.y0 + dy,
            y1: self.y1 + dy,
            ..self
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wattflow_core::geometry::Bounds;
    /// let root = Bounds::new(20.0, 20.0, 35.0, 340.0);
    /// let leaf = Bounds::new(315.0, 20.0, 330.0, 180.0);
    ///
    /// let all = root.merge(&leaf);
    /// assert_eq!(all.x0(), 20.0);
    /// assert_eq!(all.x1(), 330.0);
    /// assert_eq!(all.y1(), 340.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Gap between the bottom of `self` and the top of `below`.
    ///
    /// Negative when the two vertical ranges overlap.
    pub fn vertical_gap_to(self, below: Bounds) -> f32 {
        below.y0 - self.y1
    }
}

/// Spacing around a drawing area with potentially different values per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}
