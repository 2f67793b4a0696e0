//! Sticky notes: `/Subtype /Text` annotations (Section 12.5.6.4).
//!
//! The note is drawn as a small icon; viewers show `/Contents` in a pop-up.
//!
//! # Example
//!
//! ```
//! use pdf_forge::annotation_types::TextAnnotationIcon;
//! use pdf_forge::writer::TextAnnotation;
//! use pdf_forge::geometry::Rect;
//!
//! let note = TextAnnotation::new(Rect::new(72.0, 720.0, 24.0, 24.0), "This is a comment")
//!     .with_icon(TextAnnotationIcon::Comment)
//!     .with_color(1.0, 1.0, 0.0);
//! assert!(note.validate().is_ok());
//! ```

use super::annotation_builder::{
    annotation_dict, insert_color, insert_flags, insert_text, validate_common,
};
use super::object_serializer::ObjectSerializer;
use crate::annotation_types::{AnnotationColor, AnnotationFlags, TextAnnotationIcon};
use crate::error::Result;
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// A text annotation (sticky note).
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    /// Icon area
    pub rect: Rect,
    /// Pop-up text
    pub contents: String,
    /// Closed-state icon
    pub icon: TextAnnotationIcon,
    /// Pop-up initially open
    pub open: bool,
    /// Icon color
    pub color: Option<AnnotationColor>,
    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub opacity: Option<f32>,
    /// Author of the annotation
    pub author: Option<String>,
    /// Subject of the annotation
    pub subject: Option<String>,
    /// Annotation flags
    pub flags: AnnotationFlags,
}

impl TextAnnotation {
    /// Closed yellow note with the default icon. `rect` is the icon area.
    pub fn new(rect: Rect, contents: impl Into<String>) -> Self {
        Self {
            rect,
            contents: contents.into(),
            icon: TextAnnotationIcon::Note,
            open: false,
            color: Some(AnnotationColor::yellow()),
            opacity: None,
            author: None,
            subject: None,
            flags: AnnotationFlags::default(),
        }
    }

    /// Note shown with the speech-bubble icon.
    pub fn comment(rect: Rect, contents: impl Into<String>) -> Self {
        Self::new(rect, contents).with_icon(TextAnnotationIcon::Comment)
    }

    /// Note shown with the question-mark icon.
    pub fn help(rect: Rect, contents: impl Into<String>) -> Self {
        Self::new(rect, contents).with_icon(TextAnnotationIcon::Help)
    }

    /// Replace the icon.
    pub fn with_icon(mut self, icon: TextAnnotationIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Open the pop-up when the page is displayed.
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// RGB icon color.
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Some(AnnotationColor::Rgb(r, g, b));
        self
    }

    /// Any color space, or [`AnnotationColor::None`] to omit `/C`.
    pub fn with_annotation_color(mut self, color: AnnotationColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Constant opacity (`/CA`).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
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

    /// Check rectangle, color and opacity.
    pub fn validate(&self) -> Result<()> {
        validate_common("text", &self.rect, self.color.as_ref(), self.opacity)
    }

    /// Annotation dictionary for the page object `page`.
    pub fn build(&self, page: ObjectRef) -> Dict {
        let mut dict = annotation_dict("Text", &self.rect, page);
        dict.insert("Contents".to_string(), ObjectSerializer::string(&self.contents));
        dict.insert("Name".to_string(), Object::Name(self.icon.pdf_name().to_string()));
        dict.insert("Open".to_string(), Object::Boolean(self.open));
        insert_flags(&mut dict, self.flags);
        insert_color(&mut dict, "C", self.color.as_ref());
        if let Some(opacity) = self.opacity {
            dict.insert("CA".to_string(), Object::Real(opacity as f64));
        }
        insert_text(&mut dict, "T", self.author.as_deref());
        insert_text(&mut dict, "Subj", self.subject.as_deref());
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_annotation_new() {
        let rect = Rect::new(72.0, 720.0, 24.0, 24.0);
        let note = TextAnnotation::new(rect, "Test note");

        assert_eq!(note.contents, "Test note");
        assert!(matches!(note.icon, TextAnnotationIcon::Note));
        assert!(!note.open);
        assert!(note.color.is_some());
        assert!(matches!(TextAnnotation::help(rect, "").icon, TextAnnotationIcon::Help));
    }

    #[test]
    fn test_text_annotation_build() {
        let rect = Rect::new(72.0, 720.0, 24.0, 24.0);
        let note = TextAnnotation::comment(rect, "Important note")
            .with_open(true)
            .with_color(1.0, 0.8, 0.0)
            .with_author("Reviewer")
            .with_subject("Review");

        let dict = note.build(ObjectRef::new(4, 0));

        assert_eq!(dict.get("Type"), Some(&Object::Name("Annot".to_string())));
        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Text".to_string())));
        assert_eq!(dict.get("Name"), Some(&Object::Name("Comment".to_string())));
        assert_eq!(dict.get("Open"), Some(&Object::Boolean(true)));
        assert_eq!(dict.get("F"), Some(&Object::Integer(4)));
        assert_eq!(dict.get("T"), Some(&Object::String(b"Reviewer".to_vec())));
        assert!(dict.contains_key("C"));
        assert!(dict.contains_key("Subj"));
        assert!(!dict.contains_key("CA"));
    }

    #[test]
    fn test_text_annotation_validation() {
        let rect = Rect::new(72.0, 720.0, 24.0, 24.0);
        assert!(TextAnnotation::new(rect, "x").validate().is_ok());
        assert!(TextAnnotation::new(rect, "x").with_opacity(1.5).validate().is_err());
        assert!(TextAnnotation::new(rect, "x")
            .with_color(0.0, -0.1, 0.0)
            .validate()
            .is_err());
    }
}
