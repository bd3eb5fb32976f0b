//! Text styles and intrinsic-size measurement.
//!
//! Static text children of a layout container report an intrinsic size; this
//! module computes it. Measurement goes through `cosmic-text` (real font
//! metrics and shaping) behind a reusable [`FontSystem`] instance, with a
//! character-estimate fallback for environments without usable fonts.
//!
//! # Quick Start
//!
//! ```
//! # use sigma_core::text::{TextStyle, measure};
//! let style = TextStyle::new().with_font_size(20);
//! let size = measure("Person", &style);
//! assert!(size.width() > 0.0);
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

/// Defines the visual style for text nodes in scenes.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Calibri"` |
/// | Font size | `16` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    font_family: String,
    font_size: u16,
}

impl TextStyle {
    /// Creates a new text style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points (builder style).
    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the font family (builder style).
    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self
    }

    /// Returns the font size in points
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family name
    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size: 16,
        }
    }
}

/// Calculate the size required to display the given text content.
///
/// This is the intrinsic size static text children report to the layout
/// engine. An empty string measures as zero.
pub fn measure(text: &str, style: &TextStyle) -> Size {
    TEXT_MANAGER
        .get_or_init(TextManager::new)
        .calculate_text_size(text, style)
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    /// Create a new TextManager with a default FontSystem
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the actual size of text in pixels using cosmic-text.
    ///
    /// This provides a measurement based on real font metrics and shaping,
    /// including ligatures and kerning. If no layout runs are produced (no
    /// usable fonts), falls back to a character-count estimate so layout
    /// stays well-defined everywhere.
    fn calculate_text_size(&self, text: &str, style: &TextStyle) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Lock the FontSystem for use
        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        // Convert font size from points to pixels (roughly 1.33x multiplier for standard DPI)
        let font_size_px = style.font_size() as f32 * 1.33;

        // Create metrics with font size and approximate line height
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        // Create a buffer with the metrics
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        // Set up text attributes
        let attrs = Attrs::new().family(Family::Name(style.font_family()));

        // Set the buffer's size to unlimited to allow text to flow naturally
        buffer.set_size(None, None);

        // Advanced shaping handles ligatures, kerning, etc.
        buffer.set_text(text, &attrs, Shaping::Advanced, None);

        // Shape the text to calculate layout
        buffer.shape_until_scroll(true);

        // Calculate bounds by examining layout runs to determine actual rendered size
        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                // Find rightmost glyph position
                if let Some(last) = last {
                    let run_width = last.x + last.w;
                    max_width = max_width.max(run_width);
                }
                // Add line height for this run
                total_height += metrics.line_height;
            }
        } else {
            // Default size if no runs available
            max_width = text.len() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

// Create a global instance for use throughout the application
static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
