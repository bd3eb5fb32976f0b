//! Configuration types for Sigma canvas rendering.
//!
//! This module provides configuration structures that control how scenes
//! are styled and exported. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining canvas and style settings.
//! - [`CanvasConfig`] - Controls the exported document dimensions.
//! - [`StyleConfig`] - Controls visual styling: fills, strokes, fonts.
//!
//! # Example
//!
//! ```
//! # use sigma::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().table_fill().is_ok());
//! ```

use serde::Deserialize;

use sigma_core::color::Color;

/// Top-level application configuration combining canvas and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified canvas and style configurations.
    pub fn new(canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self { canvas, style }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Dimensions of the exported canvas document.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    /// Document width in pixels.
    #[serde(default = "default_canvas_width")]
    width: f32,

    /// Document height in pixels.
    #[serde(default = "default_canvas_height")]
    height: f32,
}

fn default_canvas_width() -> f32 {
    800.0
}

fn default_canvas_height() -> f32 {
    600.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the document width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the document height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Visual styling configuration for rendered scenes.
///
/// Color fields are stored as strings and parsed lazily so malformed values
/// surface as configuration errors at render time, not at load time.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Fill color for table and column-group backgrounds, as a color string.
    #[serde(default)]
    table_fill: Option<String>,

    /// Stroke color for boxes and divider lines, as a color string.
    #[serde(default)]
    stroke_color: Option<String>,

    /// Optional document background color, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Font family used for all scene text.
    #[serde(default)]
    font_family: Option<String>,

    /// Font size for table titles.
    #[serde(default)]
    title_font_size: Option<u16>,

    /// Font size for column rows.
    #[serde(default)]
    column_font_size: Option<u16>,

    /// Font size for the empty-table note.
    #[serde(default)]
    note_font_size: Option<u16>,
}

impl StyleConfig {
    /// Sets the table fill color string (builder style).
    pub fn with_table_fill(mut self, color: &str) -> Self {
        self.table_fill = Some(color.to_string());
        self
    }

    /// Sets the stroke color string (builder style).
    pub fn with_stroke_color(mut self, color: &str) -> Self {
        self.stroke_color = Some(color.to_string());
        self
    }

    /// Sets the document background color string (builder style).
    pub fn with_background_color(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    /// Returns the parsed table fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn table_fill(&self) -> Result<Color, String> {
        parse_color(self.table_fill.as_deref().unwrap_or("yellow"))
    }

    /// Returns the parsed stroke [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color(self.stroke_color.as_deref().unwrap_or("black"))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(parse_color)
            .transpose()
    }

    /// Returns the font family for scene text.
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("Calibri")
    }

    /// Returns the font size for table titles.
    pub fn title_font_size(&self) -> u16 {
        self.title_font_size.unwrap_or(20)
    }

    /// Returns the font size for column rows.
    pub fn column_font_size(&self) -> u16 {
        self.column_font_size.unwrap_or(16)
    }

    /// Returns the font size for the empty-table note.
    pub fn note_font_size(&self) -> u16 {
        self.note_font_size.unwrap_or(12)
    }
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_parses() {
        let style = StyleConfig::default();
        assert!(style.table_fill().is_ok());
        assert!(style.stroke_color().is_ok());
        assert!(style.background_color().unwrap().is_none());
        assert_eq!(style.font_family(), "Calibri");
        assert_eq!(style.title_font_size(), 20);
        assert_eq!(style.column_font_size(), 16);
        assert_eq!(style.note_font_size(), 12);
    }

    #[test]
    fn test_default_canvas_dimensions() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.width(), 800.0);
        assert_eq!(canvas.height(), 600.0);
    }

    #[test]
    fn test_invalid_color_surfaces_as_error() {
        let style = StyleConfig {
            table_fill: Some("definitely-not-a-color".to_string()),
            ..StyleConfig::default()
        };
        assert!(style.table_fill().is_err());
    }
}
