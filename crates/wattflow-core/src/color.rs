//! Color handling for Wattflow diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, plus the default palette used for nodes that do not
//! carry an explicit color.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Palette cycled through (by node index) for nodes without an explicit color.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#3b82f6", "#f59e0b", "#a855f7", "#ec4899", "#10b981", "#06b6d4", "#f97316",
];

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use wattflow_core::color::Color;
    ///
    /// let blue = Color::new("#3b82f6").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the palette color for the node at `index`, wrapping around
    /// when there are more nodes than palette entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use wattflow_core::color::{Color, DEFAULT_PALETTE};
    ///
    /// assert_eq!(Color::palette(0), Color::palette(DEFAULT_PALETTE.len()));
    /// assert_ne!(Color::palette(0), Color::palette(1));
    /// ```
    pub fn palette(index: usize) -> Self {
        let entry = DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        Self::new(entry).expect("palette entries are valid CSS colors")
    }


    /// Creates a new color with the specified alpha (transparency) value,
    /// between 0.0 (fully transparent) and 1.0 (fully opaque).
    ///
    /// # Examples
    ///
    /// ```
    /// use wattflow_core::color::Color;
    ///
    /// let faded = Color::new("red").unwrap().with_alpha(0.4);
    /// assert!((faded.alpha() - 0.4).abs() < 1e-6);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::palette(0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#10b981").is_ok());
        assert!(Color::new("teal").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_palette_wraps() {
        for i in 0..DEFAULT_PALETTE.len() {
            assert_eq!(Color::palette(i), Color::palette(i + DEFAULT_PALETTE.len()));
        }
    }

    #[test]
    fn test_palette_entries_distinct() {
        use std::collections::HashSet;

        let colors: HashSet<Color> = (0..DEFAULT_PALETTE.len()).map(Color::palette).collect();
        assert_eq!(colors.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_default_is_first_palette_entry() {
        assert_eq!(Color::default(), Color::palette(0));
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("#94a3b8").unwrap();
        assert!((color.alpha() - 1.0).abs() < 0.001);

        let transparent = color.with_alpha(0.4);
        assert!((transparent.alpha() - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_color_display() {
        let color = Color::new("blue").unwrap();
        assert!(!color.to_string().is_empty());
    }
}
