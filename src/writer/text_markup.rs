//! Text markup annotations for PDF generation.
//!
//! Text markup annotations per PDF spec Section 12.5.6.10:
//! - Highlight (yellow marker effect)
//! - Underline (line under text)
//! - StrikeOut (line through text)
//! - Squiggly (wavy underline)
//!
//! # Example
//!
//! ```
//! use pdf_forge::writer::TextMarkupAnnotation;
//! use pdf_forge::geometry::Rect;
//!
//! let highlight = TextMarkupAnnotation::highlight(
//!     Rect::new(72.0, 720.0, 100.0, 12.0),
//!     vec![[72.0, 720.0, 172.0, 720.0, 172.0, 732.0, 72.0, 732.0]],
//! )
//! .with_opacity(0.5);
//! assert!(highlight.validate().is_ok());
//! ```

use super::annotation_builder::{
    annotation_dict, insert_color, insert_flags, insert_text, validate_common,
};
use crate::annotation_types::{
    quad_points, quads_bounds, AnnotationColor, AnnotationFlags, QuadPoint, TextMarkupType,
};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// A text markup annotation (Highlight, Underline, StrikeOut, Squiggly).
///
/// QuadPoints are required and define the quadrilateral(s) encompassing the text.
/// Each quad is 8 numbers: x1,y1, x2,y2, x3,y3, x4,y4 (counter-clockwise from bottom-left).
#[derive(Debug, Clone)]
pub struct TextMarkupAnnotation {
    /// Bounding rectangle
    pub rect: Rect,
    /// Type of text markup
    pub markup_type: TextMarkupType,
    /// QuadPoints defining the text area (required)
    pub quad_points: Vec<QuadPoint>,
    /// Annotation color (affects the markup appearance)
    pub color: Option<AnnotationColor>,
    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub opacity: Option<f32>,
    /// Text contents (description or alt text)
    pub contents: Option<String>,
    /// Author of the annotation
    pub author: Option<String>,
    /// Subject of the annotation
    pub subject: Option<String>,
    /// Annotation flags
    pub flags: AnnotationFlags,
}

impl TextMarkupAnnotation {
    /// Create a markup annotation in the type's default color.
    pub fn new(markup_type: TextMarkupType, rect: Rect, quad_points: Vec<QuadPoint>) -> Self {
        Self {
            rect,
            markup_type,
            quad_points,
            color: Some(markup_type.default_color()),
            opacity: None,
            contents: None,
            author: None,
            subject: None,
            flags: AnnotationFlags::default(),
        }
    }

    /// Create a highlight annotation (yellow marker effect).
    pub fn highlight(rect: Rect, quad_points: Vec<QuadPoint>) -> Self {
        Self::new(TextMarkupType::Highlight, rect, quad_points)
    }

    /// Create an underline annotation.
    pub fn underline(rect: Rect, quad_points: Vec<QuadPoint>) -> Self {
        Self::new(TextMarkupType::Underline, rect, quad_points)
    }

    /// Create a strikeout annotation.
    pub fn strikeout(rect: Rect, quad_points: Vec<QuadPoint>) -> Self {
        Self::new(TextMarkupType::StrikeOut, rect, quad_points)
    }

    /// Create a squiggly underline annotation.
    pub fn squiggly(rect: Rect, quad_points: Vec<QuadPoint>) -> Self {
        Self::new(TextMarkupType::Squiggly, rect, quad_points)
    }

    /// Create from a single rectangle; the quad covers the whole rectangle.
    pub fn from_rect(markup_type: TextMarkupType, rect: Rect) -> Self {
        Self::new(markup_type, rect, vec![quad_points::from_rect(&rect)])
    }

    /// Create from quads alone; the rectangle is their bounding box.
    pub fn from_quads(markup_type: TextMarkupType, quads: Vec<QuadPoint>) -> Self {
        let rect = quads_bounds(&quads).unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0));
        Self::new(markup_type, rect, quads)
    }

    /// Set the color.
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Some(AnnotationColor::Rgb(r, g, b));
        self
    }

    /// Set the color from an AnnotationColor.
    pub fn with_annotation_color(mut self, color: AnnotationColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the contents (description text).
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the annotation flags.
    pub fn with_flags(mut self, flags: AnnotationFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Require at least one finite quad, then check rectangle, color and opacity.
    pub fn validate(&self) -> Result<()> {
        if self.quad_points.is_empty() {
            return Err(Error::invalid_document(format!(
                "{} annotation has no quad points",
                self.markup_type.pdf_name()
            )));
        }
        if !self.quad_points.iter().flatten().all(|v| v.is_finite()) {
            return Err(Error::invalid_document("markup quad points are not finite"));
        }
        validate_common("markup", &self.rect, self.color.as_ref(), self.opacity)
    }

    /// Build the annotation dictionary.
    pub fn build(&self, page: ObjectRef) -> Dict {
        let mut dict = annotation_dict(self.markup_type.pdf_name(), &self.rect, page);

        let quads = quad_points::flatten(&self.quad_points)
            .into_iter()
            .map(Object::Real)
            .collect();
        dict.insert("QuadPoints".to_string(), Object::Array(quads));

        insert_flags(&mut dict, self.flags);
        insert_color(&mut dict, "C", self.color.as_ref());
        if let Some(opacity) = self.opacity {
            dict.insert("CA".to_string(), Object::Real(opacity as f64));
        }
        insert_text(&mut dict, "Contents", self.contents.as_deref());
        insert_text(&mut dict, "T", self.author.as_deref());
        insert_text(&mut dict, "Subj", self.subject.as_deref());
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> QuadPoint {
        [72.0, 720.0, 172.0, 720.0, 172.0, 732.0, 72.0, 732.0]
    }

    #[test]
    fn test_constructors_use_default_colors() {
        let rect = Rect::new(72.0, 720.0, 100.0, 12.0);

        let highlight = TextMarkupAnnotation::highlight(rect, vec![quad()]);
        assert!(matches!(highlight.color, Some(AnnotationColor::Rgb(1.0, 1.0, 0.0))));

        let strikeout = TextMarkupAnnotation::strikeout(rect, vec![quad()]);
        assert!(matches!(strikeout.markup_type, TextMarkupType::StrikeOut));
        assert_eq!(strikeout.color, Some(AnnotationColor::red()));

        let squiggly = TextMarkupAnnotation::squiggly(rect, vec![quad()]);
        assert!(matches!(squiggly.markup_type, TextMarkupType::Squiggly));
    }

    #[test]
    fn test_from_rect_and_quads() {
        let rect = Rect::new(100.0, 200.0, 50.0, 20.0);
        let highlight = TextMarkupAnnotation::from_rect(TextMarkupType::Highlight, rect);
        assert_eq!(highlight.quad_points.len(), 1);
        assert_eq!(highlight.quad_points[0][2], 150.0);

        let underline = TextMarkupAnnotation::from_quads(TextMarkupType::Underline, vec![quad()]);
        assert_eq!(underline.rect, Rect::new(72.0, 720.0, 100.0, 12.0));
    }

    #[test]
    fn test_build_highlight() {
        let rect = Rect::new(72.0, 720.0, 100.0, 12.0);
        let highlight = TextMarkupAnnotation::highlight(rect, vec![quad(), quad()])
            .with_opacity(0.5)
            .with_contents("Important text")
            .with_author("Test User");

        let dict = highlight.build(ObjectRef::new(5, 0));

        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Highlight".to_string())));
        assert_eq!(dict.get("CA"), Some(&Object::Real(0.5)));
        assert_eq!(dict.get("QuadPoints").and_then(Object::as_array).map(Vec::len), Some(16));
        assert!(dict.contains_key("C"));
        assert!(dict.contains_key("Contents"));
        assert!(dict.contains_key("T"));
        assert!(!dict.contains_key("Subj"));
    }

    #[test]
    fn test_validation() {
        let rect = Rect::new(72.0, 720.0, 100.0, 12.0);
        assert!(TextMarkupAnnotation::underline(rect, vec![quad()]).validate().is_ok());

        let err = TextMarkupAnnotation::underline(rect, vec![]).validate().unwrap_err();
        assert!(err.to_string().contains("Underline annotation has no quad points"));

        let mut nan = quad();
        nan[3] = f64::NAN;
        assert!(TextMarkupAnnotation::underline(rect, vec![nan]).validate().is_err());
        assert!(TextMarkupAnnotation::underline(rect, vec![quad()])
            .with_opacity(-0.5)
            .validate()
            .is_err());
    }
}
