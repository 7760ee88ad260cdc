//! Configuration types for flow diagram layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutOptions`] - Layout engine parameters (the `[layout]` table).
//! - [`StyleConfig`] - Visual styling options (the `[style]` table).
//!
//! # Example
//!
//! ```
//! # use wattflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width, 15.0);
//! assert!(config.style().render_style().is_ok());
//! ```

use serde::Deserialize;

use wattflow_core::color::Color;

pub use crate::layout::LayoutOptions;
use crate::render::RenderStyle;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutOptions, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings until they are used, so an invalid color is
/// reported when rendering starts rather than while the file is parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas fill; transparent when unset.
    background_color: Option<String>,

    /// Opacity applied to every ribbon.
    link_opacity: f32,

    /// Color for every ribbon; each ribbon takes its target node's color when
    /// unset.
    link_color: Option<String>,

    font_size: f32,

    /// Horizontal distance between a node and its label.
    label_offset: f32,

    /// Label text color; `currentColor` inherits the host's text color.
    label_color: String,

    node_corner_radius: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            link_opacity: 0.4,
            link_color: None,
            font_size: 12.0,
            label_offset: 6.0,
            label_color: "currentColor".to_string(),
            node_corner_radius: 2.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.background_color.as_deref(), "background color")
    }

    /// Returns the parsed ribbon color override, if any.
    pub fn link_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.link_color.as_deref(), "link color")
    }

    /// Returns the parsed label color, `None` for `currentColor`.
    pub fn label_color(&self) -> Result<Option<Color>, String> {
        if self.label_color.eq_ignore_ascii_case("currentColor") {
            return Ok(None);
        }
        parse_optional(Some(self.label_color.as_str()), "label color")
    }

    /// Resolves every style option into a [`RenderStyle`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid option.
    pub fn render_style(&self) -> Result<RenderStyle, String> {
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(format!(
                "Invalid link opacity in config: {} is outside 0..=1",
                self.link_opacity
            ));
        }
        for (name, value) in [
            ("font size", self.font_size),
            ("label offset", self.label_offset),
            ("node corner radius", self.node_corner_radius),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("Invalid {name} in config: {value}"));
            }
        }

        Ok(RenderStyle::default()
            .with_link_opacity(self.link_opacity)
            .with_link_color(self.link_color()?)
            .with_font_size(self.font_size)
            .with_label_offset(self.label_offset)
            .with_label_color(self.label_color()?)
            .with_node_corner_radius(self.node_corner_radius))
    }
}

fn parse_optional(color: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_resolves() {
        let style = StyleConfig::default().render_style().unwrap();
        assert_eq!(style, RenderStyle::default());
    }

    #[test]
    fn test_colors_parsed() {
        let style = StyleConfig {
            background_color: Some("white".to_string()),
            link_color: Some("#94a3b8".to_string()),
            label_color: "#111827".to_string(),
            ..StyleConfig::default()
        };

        assert_eq!(style.background_color(), Ok(Some(Color::new("white").unwrap())));
        let render = style.render_style().unwrap();
        assert_eq!(render.link_color(), Some(Color::new("#94a3b8").unwrap()));
        assert_eq!(render.label_color(), Some(Color::new("#111827").unwrap()));
    }

    #[test]
    fn test_current_color_is_case_insensitive() {
        let style = StyleConfig {
            label_color: "currentcolor".to_string(),
            ..StyleConfig::default()
        };
        assert_eq!(style.label_color(), Ok(None));
    }

    #[test]
    fn test_invalid_color_reported() {
        let style = StyleConfig {
            link_color: Some("blurple".to_string()),
            ..StyleConfig::default()
        };

        let err = style.render_style().unwrap_err();
        assert!(err.contains("link color"), "{err}");
    }

    #[test]
    fn test_invalid_numbers_reported() {
        let opacity = StyleConfig {
            link_opacity: 1.5,
            ..StyleConfig::default()
        };
        assert!(opacity.render_style().is_err());

        let font = StyleConfig {
            font_size: f32::NAN,
            ..StyleConfig::default()
        };
        assert!(font.render_style().unwrap_err().contains("font size"));
    }
}
