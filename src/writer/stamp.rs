//! Stamp annotations for PDF generation.
//!
//! Stamp annotations per PDF spec Section 12.5.6.12 display text or graphics
//! intended to look like rubber stamps. The standard names (Approved, Draft,
//! Confidential, ...) are listed on [`StampType`]; any other name is written
//! as a custom stamp.

use super::annotation_builder::{annotation_dict, insert_flags, insert_text, validate_common};
use crate::annotation_types::{AnnotationFlags, StampType};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// A Stamp annotation.
#[derive(Debug, Clone)]
pub struct StampAnnotation {
    /// Bounding rectangle for the stamp
    pub rect: Rect,
    /// Type of stamp
    pub stamp_type: StampType,
    /// Contents/comment
    pub contents: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// Annotation flags
    pub flags: AnnotationFlags,
    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub opacity: Option<f32>,
}

impl StampAnnotation {
    /// Create a new stamp annotation with the given rect and stamp type.
    pub fn new(rect: Rect, stamp_type: StampType) -> Self {
        Self {
            rect,
            stamp_type,
            contents: None,
            author: None,
            subject: None,
            flags: AnnotationFlags::default(),
            opacity: None,
        }
    }

    /// Create an "Approved" stamp.
    pub fn approved(rect: Rect) -> Self {
        Self::new(rect, StampType::Approved)
    }

    /// Create a "Draft" stamp.
    pub fn draft(rect: Rect) -> Self {
        Self::new(rect, StampType::Draft)
    }

    /// Create a "Confidential" stamp.
    pub fn confidential(rect: Rect) -> Self {
        Self::new(rect, StampType::Confidential)
    }

    /// Create a custom stamp with a user-defined name.
    pub fn custom(rect: Rect, name: impl Into<String>) -> Self {
        Self::new(rect, StampType::Custom(name.into()))
    }

    /// Set contents/comment for the stamp.
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

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Reject empty custom names, then check rectangle and opacity.
    pub fn validate(&self) -> Result<()> {
        if self.stamp_type.pdf_name().is_empty() {
            return Err(Error::invalid_document("custom stamp name is empty"));
        }
        validate_common("stamp", &self.rect, None, self.opacity)
    }

    /// Build the annotation dictionary.
    pub fn build(&self, page: ObjectRef) -> Dict {
        let mut dict = annotation_dict("Stamp", &self.rect, page);
        dict.insert("Name".to_string(), Object::Name(self.stamp_type.pdf_name().to_string()));
        insert_text(&mut dict, "Contents", self.contents.as_deref());
        insert_flags(&mut dict, self.flags);
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
    fn test_stamp_constructors() {
        let rect = Rect::new(100.0, 700.0, 150.0, 50.0);
        assert_eq!(StampAnnotation::approved(rect).stamp_type, StampType::Approved);
        assert_eq!(StampAnnotation::draft(rect).stamp_type, StampType::Draft);
        assert_eq!(StampAnnotation::confidential(rect).stamp_type, StampType::Confidential);
        assert_eq!(
            StampAnnotation::custom(rect, "ReviewPending").stamp_type,
            StampType::Custom("ReviewPending".to_string())
        );
    }

    #[test]
    fn test_stamp_build() {
        let stamp = StampAnnotation::approved(Rect::new(100.0, 700.0, 150.0, 50.0))
            .with_contents("Approved by QA")
            .with_author("QA Team")
            .with_opacity(0.75);

        let dict = stamp.build(ObjectRef::new(7, 0));

        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Stamp".to_string())));
        assert_eq!(dict.get("Name"), Some(&Object::Name("Approved".to_string())));
        assert_eq!(dict.get("P"), Some(&Object::Reference(ObjectRef::new(7, 0))));
        assert_eq!(dict.get("CA"), Some(&Object::Real(0.75)));
        assert!(dict.contains_key("Contents"));
        assert!(dict.contains_key("T"));
    }

    #[test]
    fn test_stamp_validation() {
        let rect = Rect::new(100.0, 700.0, 150.0, 50.0);
        assert!(StampAnnotation::draft(rect).validate().is_ok());
        assert!(StampAnnotation::custom(rect, "").validate().is_err());
        assert!(StampAnnotation::draft(rect).with_opacity(2.0).validate().is_err());
    }
}
