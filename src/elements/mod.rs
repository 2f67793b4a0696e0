//! Page content elements.
//!
//! The `ContentElement` enum is the closed set of things a page can draw.
//! Every variant exposes the same capabilities:
//! - `bbox()`: the area it covers
//! - `validate()`: structural checks run before a document is written
//! - rendering to content-stream operators, done by
//!   [`ContentStreamBuilder`](crate::writer::ContentStreamBuilder)
//!
//! ## Example
//!
//! ```
//! use pdf_forge::elements::{ContentElement, TextContent};
//!
//! let element = ContentElement::Text(TextContent::simple("Hello, World!", 72.0, 720.0, 12.0));
//! assert!(element.validate().is_ok());
//! ```

mod image;
mod path;
mod table;
mod text;

pub use image::{ColorSpace, ImageContent, ImageFormat};
pub use path::{LineCap, LineJoin, PathContent, PathOperation};
pub use table::{TableCellAlign, TableCellContent, TableContent, TableContentStyle, TableRowContent};
pub use text::{FontSpec, TextContent, TextStyle};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// An RGB color, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// True when every channel is black.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Channels as an array.
    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Every channel finite and within 0.0..=1.0.
    pub fn is_valid(&self) -> bool {
        self.components()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Check an optional opacity lies within 0.0..=1.0.
pub(crate) fn validate_opacity(opacity: Option<f32>, what: &str) -> Result<()> {
    match opacity {
        Some(o) if !(o.is_finite() && (0.0..=1.0).contains(&o)) => Err(Error::invalid_document(
            format!("{} opacity {} outside 0..=1", what, o),
        )),
        _ => Ok(()),
    }
}

/// A content element drawn on a page.
#[derive(Debug, Clone)]
pub enum ContentElement {
    /// Text content with positioning and styling
    Text(TextContent),
    /// Image content with position and sample data
    Image(ImageContent),
    /// Vector path/graphics content
    Path(PathContent),
    /// Table content with rows and cells
    Table(TableContent),
}

impl ContentElement {
    /// Get the bounding box of this element.
    pub fn bbox(&self) -> Rect {
        match self {
            ContentElement::Text(t) => t.bbox,
            ContentElement::Image(i) => i.bbox,
            ContentElement::Path(p) => p.bbox(),
            ContentElement::Table(t) => t.bbox,
        }
    }

    /// Constant opacity requested by this element, if any.
    pub fn opacity(&self) -> Option<f32> {
        match self {
            ContentElement::Text(t) => t.opacity,
            ContentElement::Image(i) => i.opacity,
            ContentElement::Path(p) => p.opacity,
            ContentElement::Table(_) => None,
        }
    }

    /// Structural validation.
    pub fn validate(&self) -> Result<()> {
        match self {
            ContentElement::Text(t) => t.validate(),
            ContentElement::Image(i) => i.validate(),
            ContentElement::Path(p) => p.validate(),
            ContentElement::Table(t) => t.validate(),
        }
    }

    /// Check if this is a text element.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentElement::Text(_))
    }

    /// Check if this is an image element.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentElement::Image(_))
    }

    /// Get as image content if this is an image element.
    pub fn as_image(&self) -> Option<&ImageContent> {
        match self {
            ContentElement::Image(i) => Some(i),
            _ => None,
        }
    }
}

impl From<TextContent> for ContentElement {
    fn from(t: TextContent) -> Self {
        ContentElement::Text(t)
    }
}

impl From<ImageContent> for ContentElement {
    fn from(i: ImageContent) -> Self {
        ContentElement::Image(i)
    }
}

impl From<PathContent> for ContentElement {
    fn from(p: PathContent) -> Self {
        ContentElement::Path(p)
    }
}

impl From<TableContent> for ContentElement {
    fn from(t: TableContent) -> Self {
        ContentElement::Table(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_validity() {
        assert!(Color::black().is_valid());
        assert!(Color::new(0.2, 0.4, 1.0).is_valid());
        assert!(!Color::new(1.5, 0.0, 0.0).is_valid());
        assert!(!Color::new(f32::NAN, 0.0, 0.0).is_valid());
        assert!(Color::default().is_black());
    }

    #[test]
    fn test_element_dispatch() {
        let text: ContentElement = TextContent::simple("hi", 10.0, 20.0, 12.0).into();
        assert!(text.is_text());
        assert!(!text.is_image());
        assert_eq!(text.bbox().x, 10.0);
        assert_eq!(text.opacity(), None);

        let path: ContentElement = PathContent::new()
            .move_to(0.0, 0.0)
            .line_to(50.0, 80.0)
            .with_opacity(0.5)
            .into();
        assert_eq!(path.bbox(), Rect::new(0.0, 0.0, 50.0, 80.0));
        assert_eq!(path.opacity(), Some(0.5));
        assert!(path.as_image().is_none());
    }

    #[test]
    fn test_opacity_validation() {
        assert!(validate_opacity(None, "text").is_ok());
        assert!(validate_opacity(Some(0.0), "text").is_ok());
        assert!(validate_opacity(Some(1.0), "text").is_ok());
        assert!(validate_opacity(Some(1.01), "text").is_err());
        assert!(validate_opacity(Some(-0.1), "text").is_err());
    }
}
