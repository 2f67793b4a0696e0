//! Annotation builder for PDF generation.
//!
//! This module provides support for creating PDF annotations per PDF spec Section 12.5.
//!
//! # Supported Annotation Types
//!
//! - **Link**: Hyperlinks (URI) and internal page jumps
//! - **Text**: Sticky notes
//! - **Markup**: Highlight, Underline, Squiggly, StrikeOut
//! - **Stamp**: Rubber stamps
//! - **Field**: Form field widgets (see [`super::form_fields`])
//!
//! Every builder produces an insertion-ordered [`Dict`]; the assembler wraps it
//! in an indirect object and adds it to the owning page's `/Annots` array.
//!
//! # Example
//!
//! ```
//! use pdf_forge::writer::{Annotation, LinkAnnotation};
//! use pdf_forge::geometry::Rect;
//! use pdf_forge::object::ObjectRef;
//!
//! let link = LinkAnnotation::goto_page(Rect::new(72.0, 720.0, 100.0, 12.0), 1);
//! let pages = [ObjectRef::new(3, 0), ObjectRef::new(4, 0)];
//! let dict = Annotation::from(link).build(pages[0], &pages);
//! assert!(dict.contains_key("Dest"));
//! ```

use super::form_fields::FormField;
use super::object_serializer::ObjectSerializer;
use super::stamp::StampAnnotation;
use super::text_annotations::TextAnnotation;
use super::text_markup::TextMarkupAnnotation;
use crate::annotation_types::{AnnotationColor, AnnotationFlags, HighlightMode};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// Start an annotation dictionary: `/Type /Annot /Subtype /Rect /P`.
pub(crate) fn annotation_dict(subtype: &str, rect: &Rect, page: ObjectRef) -> Dict {
    let mut dict = Dict::new();
    dict.insert("Type".to_string(), Object::Name("Annot".to_string()));
    dict.insert("Subtype".to_string(), Object::Name(subtype.to_string()));
    dict.insert("Rect".to_string(), rect_object(rect));
    dict.insert("P".to_string(), Object::Reference(page));
    dict
}

/// `[llx lly urx ury]` array for a rectangle.
pub(crate) fn rect_object(rect: &Rect) -> Object {
    ObjectSerializer::rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64)
}

/// Insert `/F` when any flag is set.
pub(crate) fn insert_flags(dict: &mut Dict, flags: AnnotationFlags) {
    if flags.bits() != 0 {
        dict.insert("F".to_string(), Object::Integer(flags.bits() as i64));
    }
}

/// Insert `key` as a color array unless the color is transparent.
pub(crate) fn insert_color(dict: &mut Dict, key: &str, color: Option<&AnnotationColor>) {
    if let Some(components) = color.and_then(AnnotationColor::to_array) {
        dict.insert(key.to_string(), ObjectSerializer::color(&components));
    }
}

/// Insert a text string entry when present.
pub(crate) fn insert_text(dict: &mut Dict, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        dict.insert(key.to_string(), ObjectSerializer::string(value));
    }
}

/// Shared rectangle/color/opacity checks.
pub(crate) fn validate_common(
    kind: &str,
    rect: &Rect,
    color: Option<&AnnotationColor>,
    opacity: Option<f32>,
) -> Result<()> {
    if !rect.is_valid() {
        return Err(Error::invalid_document(format!("{} annotation rectangle is invalid", kind)));
    }
    if !color.map_or(true, AnnotationColor::is_valid) {
        return Err(Error::invalid_document(format!("{} annotation color outside 0..=1", kind)));
    }
    crate::elements::validate_opacity(opacity, kind)
}

/// Border style for annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    /// Horizontal corner radius
    pub horizontal_radius: f32,
    /// Vertical corner radius
    pub vertical_radius: f32,
    /// Border width
    pub width: f32,
    /// Dash pattern (if dashed)
    pub dash: Option<(f32, f32)>,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            horizontal_radius: 0.0,
            vertical_radius: 0.0,
            width: 0.0,
            dash: None,
        }
    }
}

impl BorderStyle {
    /// Create a border style with no visible border.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a solid border with specified width.
    pub fn solid(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Create a dashed border.
    pub fn dashed(width: f32, dash_length: f32, gap_length: f32) -> Self {
        Self {
            width,
            dash: Some((dash_length, gap_length)),
            ..Default::default()
        }
    }

    /// Set corner radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.horizontal_radius = radius;
        self.vertical_radius = radius;
        self
    }

    /// Convert to PDF Border array.
    pub fn to_border_array(&self) -> Object {
        let mut arr = vec![
            Object::Real(self.horizontal_radius as f64),
            Object::Real(self.vertical_radius as f64),
            Object::Real(self.width as f64),
        ];

        if let Some((dash, gap)) = self.dash {
            arr.push(Object::Array(vec![Object::Real(dash as f64), Object::Real(gap as f64)]));
        }

        Object::Array(arr)
    }
}

/// How the target page is fitted in the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FitMode {
    /// Fit the whole page (`/Fit`)
    #[default]
    Fit,
    /// Position and zoom (`/XYZ left top zoom`); `None` keeps the current value
    XYZ {
        /// Left coordinate
        left: Option<f32>,
        /// Top coordinate
        top: Option<f32>,
        /// Zoom factor
        zoom: Option<f32>,
    },
}

/// Action for link annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Open a URI (external link)
    Uri(String),
    /// Go to a page in this document
    GoTo {
        /// Page index (0-indexed)
        page: usize,
        /// Fit mode of the destination
        fit: FitMode,
    },
}

/// A link annotation for hyperlinks.
#[derive(Debug, Clone)]
pub struct LinkAnnotation {
    /// Bounding rectangle (in page coordinates)
    pub rect: Rect,
    /// The action to perform when clicked
    pub action: LinkAction,
    /// Border style
    pub border: BorderStyle,
    /// Highlight mode
    pub highlight: HighlightMode,
    /// Optional color for the border/highlight
    pub color: Option<AnnotationColor>,
}

impl LinkAnnotation {
    fn with_action(rect: Rect, action: LinkAction) -> Self {
        Self {
            rect,
            action,
            border: BorderStyle::none(),
            highlight: HighlightMode::default(),
            color: None,
        }
    }

    /// Create a new link annotation with a URI action.
    pub fn uri(rect: Rect, uri: impl Into<String>) -> Self {
        Self::with_action(rect, LinkAction::Uri(uri.into()))
    }

    /// Create a new link annotation that goes to a page (0-indexed).
    pub fn goto_page(rect: Rect, page: usize) -> Self {
        Self::with_action(
            rect,
            LinkAction::GoTo {
                page,
                fit: FitMode::Fit,
            },
        )
    }

    /// Set the fit mode of a page destination. No effect on URI links.
    pub fn with_fit(mut self, mode: FitMode) -> Self {
        if let LinkAction::GoTo { fit, .. } = &mut self.action {
            *fit = mode;
        }
        self
    }

    /// Set the border style.
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set the highlight mode.
    pub fn with_highlight(mut self, highlight: HighlightMode) -> Self {
        self.highlight = highlight;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Some(AnnotationColor::Rgb(r, g, b));
        self
    }

    /// Check the rectangle, color, and that a page target exists.
    pub fn validate(&self, page_count: usize) -> Result<()> {
        validate_common("link", &self.rect, self.color.as_ref(), None)?;
        match &self.action {
            LinkAction::Uri(uri) if uri.is_empty() => {
                Err(Error::invalid_document("link URI is empty"))
            },
            LinkAction::GoTo { page, .. } if *page >= page_count => {
                Err(Error::invalid_document(format!(
                    "link targets page {} but the document has {} pages",
                    page, page_count
                )))
            },
            _ => Ok(()),
        }
    }

    /// Build the annotation dictionary.
    ///
    /// Page destinations are looked up in `page_refs`, the assembled page
    /// objects in document order. An index with no page is left without
    /// `/Dest`; validation rejects such links before assembly.
    pub fn build(&self, page: ObjectRef, page_refs: &[ObjectRef]) -> Dict {
        let mut dict = annotation_dict("Link", &self.rect, page);
        dict.insert("Border".to_string(), self.border.to_border_array());
        dict.insert("H".to_string(), Object::Name(self.highlight.pdf_name().to_string()));
        insert_color(&mut dict, "C", self.color.as_ref());

        match &self.action {
            LinkAction::Uri(uri) => {
                let mut action = Dict::new();
                action.insert("S".to_string(), Object::Name("URI".to_string()));
                action.insert("URI".to_string(), Object::String(uri.as_bytes().to_vec()));
                dict.insert("A".to_string(), Object::Dictionary(action));
            },
            LinkAction::GoTo { page, fit } => {
                if let Some(target) = page_refs.get(*page) {
                    dict.insert("Dest".to_string(), build_destination(*target, fit));
                }
            },
        }

        dict
    }
}

/// Build a destination array.
fn build_destination(page_ref: ObjectRef, fit: &FitMode) -> Object {
    let optional = |v: Option<f32>| v.map(|v| Object::Real(v as f64)).unwrap_or(Object::Null);

    let mut arr = vec![Object::Reference(page_ref)];
    match *fit {
        FitMode::Fit => arr.push(Object::Name("Fit".to_string())),
        FitMode::XYZ { left, top, zoom } => {
            arr.push(Object::Name("XYZ".to_string()));
            arr.push(optional(left));
            arr.push(optional(top));
            arr.push(optional(zoom));
        },
    }
    Object::Array(arr)
}

/// Any annotation that can be placed on a page.
#[derive(Debug, Clone)]
pub enum Annotation {
    /// Link annotation (hyperlinks, page navigation)
    Link(LinkAnnotation),
    /// Text annotation (sticky notes)
    Text(TextAnnotation),
    /// Text markup annotation (Highlight, Underline, StrikeOut, Squiggly)
    Markup(TextMarkupAnnotation),
    /// Stamp annotation (approval stamps, etc.)
    Stamp(StampAnnotation),
    /// Form field with its merged widget
    Field(FormField),
}

impl Annotation {
    /// Build the annotation dictionary for `page`.
    pub fn build(&self, page: ObjectRef, page_refs: &[ObjectRef]) -> Dict {
        match self {
            Annotation::Link(link) => link.build(page, page_refs),
            Annotation::Text(text) => text.build(page),
            Annotation::Markup(markup) => markup.build(page),
            Annotation::Stamp(stamp) => stamp.build(page),
            Annotation::Field(field) => field.build(page),
        }
    }

    /// Check the annotation against a document of `page_count` pages.
    pub fn validate(&self, page_count: usize) -> Result<()> {
        match self {
            Annotation::Link(link) => link.validate(page_count),
            Annotation::Text(text) => text.validate(),
            Annotation::Markup(markup) => markup.validate(),
            Annotation::Stamp(stamp) => stamp.validate(),
            Annotation::Field(field) => field.validate(),
        }
    }

    /// Get the bounding rectangle of this annotation.
    pub fn rect(&self) -> Rect {
        match self {
            Annotation::Link(link) => link.rect,
            Annotation::Text(text) => text.rect,
            Annotation::Markup(markup) => markup.rect,
            Annotation::Stamp(stamp) => stamp.rect,
            Annotation::Field(field) => field.rect(),
        }
    }

    /// The form field, when this is a field widget.
    pub fn as_field(&self) -> Option<&FormField> {
        match self {
            Annotation::Field(field) => Some(field),
            _ => None,
        }
    }
}

impl From<LinkAnnotation> for Annotation {
    fn from(link: LinkAnnotation) -> Self {
        Annotation::Link(link)
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(text: TextAnnotation) -> Self {
        Annotation::Text(text)
    }
}

impl From<TextMarkupAnnotation> for Annotation {
    fn from(markup: TextMarkupAnnotation) -> Self {
        Annotation::Markup(markup)
    }
}

impl From<StampAnnotation> for Annotation {
    fn from(stamp: StampAnnotation) -> Self {
        Annotation::Stamp(stamp)
    }
}

impl From<FormField> for Annotation {
    fn from(field: FormField) -> Self {
        Annotation::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ObjectSerializer;

    fn pages() -> Vec<ObjectRef> {
        vec![ObjectRef::new(3, 0), ObjectRef::new(9, 0), ObjectRef::new(12, 0)]
    }

    #[test]
    fn test_border_style() {
        let none = BorderStyle::none();
        assert_eq!(none.width, 0.0);

        let solid = BorderStyle::solid(2.0).with_radius(1.0);
        assert_eq!(solid.horizontal_radius, 1.0);

        let dashed = BorderStyle::dashed(1.0, 3.0, 2.0);
        let arr = dashed.to_border_array();
        assert_eq!(arr.as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_uri_link() {
        let link = LinkAnnotation::uri(Rect::new(72.0, 720.0, 100.0, 12.0), "https://example.com")
            .with_color(0.0, 0.0, 1.0);
        let dict = link.build(ObjectRef::new(3, 0), &pages());

        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Link".to_string())));
        assert_eq!(dict.get("P"), Some(&Object::Reference(ObjectRef::new(3, 0))));
        let action = dict.get("A").and_then(Object::as_dict).unwrap();
        assert_eq!(action.get("S"), Some(&Object::Name("URI".to_string())));
        assert!(dict.contains_key("C"));
        assert!(!dict.contains_key("Dest"));
    }

    #[test]
    fn test_goto_resolves_from_page_map() {
        // Page 2 is object 12, not a number derivable from page 0's
        let link = LinkAnnotation::goto_page(Rect::new(0.0, 0.0, 10.0, 10.0), 2);
        let dict = link.build(ObjectRef::new(3, 0), &pages());
        let dest = ObjectSerializer::compact().serialize_to_string(dict.get("Dest").unwrap());
        assert_eq!(dest, "[12 0 R /Fit]");
    }

    #[test]
    fn test_goto_xyz() {
        let link = LinkAnnotation::goto_page(Rect::new(0.0, 0.0, 10.0, 10.0), 1).with_fit(
            FitMode::XYZ {
                left: Some(0.0),
                top: Some(792.0),
                zoom: None,
            },
        );
        let dict = link.build(ObjectRef::new(3, 0), &pages());
        let dest = ObjectSerializer::compact().serialize_to_string(dict.get("Dest").unwrap());
        assert_eq!(dest, "[9 0 R /XYZ 0 792 null]");
    }

    #[test]
    fn test_link_validation() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(LinkAnnotation::goto_page(rect, 2).validate(3).is_ok());
        assert!(LinkAnnotation::goto_page(rect, 3).validate(3).is_err());
        assert!(LinkAnnotation::uri(rect, "").validate(3).is_err());
        assert!(LinkAnnotation::uri(Rect::new(0.0, 0.0, -1.0, 5.0), "x")
            .validate(3)
            .is_err());
    }

    #[test]
    fn test_annotation_dispatch() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let annot: Annotation = LinkAnnotation::uri(rect, "https://example.com").into();
        assert_eq!(annot.rect(), rect);
        assert!(annot.as_field().is_none());

        let dict = annot.build(ObjectRef::new(3, 0), &pages());
        let rect_str = ObjectSerializer::compact().serialize_to_string(dict.get("Rect").unwrap());
        assert_eq!(rect_str, "[10 20 40 60]");
    }
}
