//! Text content element types.

use super::{validate_opacity, Color};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// A run of text drawn at a fixed position with one font.
#[derive(Debug, Clone)]
pub struct TextContent {
    /// The text string
    pub text: String,
    /// Bounding box; the baseline starts at its lower-left corner
    pub bbox: Rect,
    /// Font specification
    pub font: FontSpec,
    /// Text styling (bold, italic, color)
    pub style: TextStyle,
    /// Constant fill opacity, 0.0..=1.0
    pub opacity: Option<f32>,
}

impl TextContent {
    /// Create a new text content element.
    pub fn new(text: impl Into<String>, bbox: Rect, font: FontSpec, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            bbox,
            font,
            style,
            opacity: None,
        }
    }

    /// Helvetica text at `(x, y)`; the box is estimated from the font size.
    pub fn simple(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * size * 0.5;
        Self::new(
            text,
            Rect::new(x, y, width, size),
            FontSpec::new("Helvetica", size),
            TextStyle::default(),
        )
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Use the bold face of the font family.
    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    /// Use the italic face of the font family.
    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }

    /// Set a constant opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Standard 14 font this text is set in.
    pub fn base_font(&self) -> &'static str {
        self.font.base_font(self.style.bold, self.style.italic)
    }

    /// Check font size, box, color and opacity.
    pub fn validate(&self) -> Result<()> {
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(Error::invalid_document(format!(
                "text font size {} must be positive",
                self.font.size
            )));
        }
        if !self.bbox.is_valid() {
            return Err(Error::invalid_document("text bounding box is not finite"));
        }
        if !self.style.color.is_valid() {
            return Err(Error::invalid_document("text color outside 0..=1"));
        }
        validate_opacity(self.opacity, "text")
    }
}

/// Font family name and size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Family name, e.g. "Helvetica", "Times", "Courier"
    pub name: String,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Create a font specification.
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Map the family plus style to a standard 14 base font name.
    ///
    /// Unknown families fall back to Helvetica.
    pub fn base_font(&self, bold: bool, italic: bool) -> &'static str {
        let family = self.name.to_lowercase();
        match family.as_str() {
            "times" | "times-roman" | "times new roman" | "serif" => match (bold, italic) {
                (false, false) => "Times-Roman",
                (true, false) => "Times-Bold",
                (false, true) => "Times-Italic",
                (true, true) => "Times-BoldItalic",
            },
            "courier" | "courier new" | "monospace" => match (bold, italic) {
                (false, false) => "Courier",
                (true, false) => "Courier-Bold",
                (false, true) => "Courier-Oblique",
                (true, true) => "Courier-BoldOblique",
            },
            "symbol" => "Symbol",
            "zapfdingbats" => "ZapfDingbats",
            _ => match (bold, italic) {
                (false, false) => "Helvetica",
                (true, false) => "Helvetica-Bold",
                (false, true) => "Helvetica-Oblique",
                (true, true) => "Helvetica-BoldOblique",
            },
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Helvetica", 12.0)
    }
}

/// Text styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    /// Bold face
    pub bold: bool,
    /// Italic/oblique face
    pub italic: bool,
    /// Fill color
    pub color: Color,
}
