//! PDF document model.
//!
//! A [`Document`] is an ordered list of [`Page`]s plus optional
//! [`DocumentInfo`]. Nothing here knows about object numbers; the writer
//! validates the model and the assembler turns it into an object graph.
//!
//! # Example
//!
//! ```
//! use pdf_forge::document::{Document, DocumentInfo, Page};
//! use pdf_forge::elements::TextContent;
//!
//! let mut page = Page::letter();
//! page.add_element(TextContent::simple("Hello, World!", 72.0, 720.0, 12.0));
//!
//! let mut doc = Document::new().with_info(DocumentInfo::new().title("Greeting"));
//! doc.add_page(page);
//! assert_eq!(doc.page_count(), 1);
//! assert!(doc.validate().is_ok());
//! ```

use crate::elements::ContentElement;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::writer::form_fields::FormField;
use crate::writer::Annotation;
use std::collections::HashSet;

/// Document information dictionary entries supplied by the caller.
///
/// `Creator`, `Producer` and the dates come from the writer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Keywords
    pub keywords: Option<String>,
}

impl DocumentInfo {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set keywords.
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// True when no entry is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }
}

/// One page: boxes, rotation, content and annotations.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page boundaries (`/MediaBox`)
    pub media_box: Rect,
    /// Visible region (`/CropBox`), defaults to the media box
    pub crop_box: Option<Rect>,
    /// Clockwise rotation in degrees, a multiple of 90
    pub rotation: i32,
    /// Content drawn in order
    pub elements: Vec<ContentElement>,
    /// Annotations and field widgets, in `/Annots` order
    pub annotations: Vec<Annotation>,
}

impl Page {
    /// Create an empty page with the given media box.
    pub fn new(media_box: Rect) -> Self {
        Self {
            media_box,
            crop_box: None,
            rotation: 0,
            elements: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// US Letter page (612 x 792 points).
    pub fn letter() -> Self {
        Self::new(Rect::letter())
    }

    /// ISO A4 page (595 x 842 points).
    pub fn a4() -> Self {
        Self::new(Rect::a4())
    }

    /// Set the crop box.
    pub fn with_crop_box(mut self, crop_box: Rect) -> Self {
        self.crop_box = Some(crop_box);
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Append a content element.
    pub fn add_element(&mut self, element: impl Into<ContentElement>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    /// Append an annotation.
    pub fn add_annotation(&mut self, annotation: impl Into<Annotation>) -> &mut Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Append a form field; its widget goes into `/Annots` like any annotation.
    pub fn add_field(&mut self, field: impl Into<FormField>) -> &mut Self {
        self.annotations.push(Annotation::Field(field.into()));
        self
    }

    /// Form fields on this page, in annotation order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.annotations.iter().filter_map(Annotation::as_field)
    }

    fn validate(&self, index: usize, page_count: usize) -> Result<()> {
        if !self.media_box.has_area() {
            return Err(Error::invalid_document(format!(
                "page {} media box must be finite with positive size",
                index
            )));
        }
        if let Some(crop) = self.crop_box {
            if !crop.has_area() {
                return Err(Error::invalid_document(format!("page {} crop box is invalid", index)));
            }
        }
        if self.rotation % 90 != 0 {
            return Err(Error::invalid_document(format!(
                "page {} rotation {} is not a multiple of 90",
                index, self.rotation
            )));
        }
        for element in &self.elements {
            element.validate().map_err(|e| in_page(index, e))?;
        }
        for annotation in &self.annotations {
            annotation.validate(page_count).map_err(|e| in_page(index, e))?;
        }
        Ok(())
    }
}

/// Prefix a validation message with the page it came from.
fn in_page(index: usize, err: Error) -> Error {
    match err {
        Error::InvalidDocument(msg) => Error::InvalidDocument(format!("page {}: {}", index, msg)),
        other => other,
    }
}

/// A document to be written.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
    info: Option<DocumentInfo>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach document information.
    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to a page.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Document information, if set.
    pub fn info(&self) -> Option<&DocumentInfo> {
        self.info.as_ref()
    }

    /// Check the whole document before it is written.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] for an empty document, an invalid page box or
    /// rotation, an invalid element or annotation (including link targets past
    /// the last page), and empty or duplicate form field names.
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(Error::invalid_document("document has no pages"));
        }

        let page_count = self.pages.len();
        for (index, page) in self.pages.iter().enumerate() {
            page.validate(index, page_count)?;
        }

        let mut names = HashSet::new();
        for field in self.pages.iter().flat_map(Page::fields) {
            if !names.insert(field.name()) {
                return Err(Error::invalid_document(format!(
                    "duplicate form field name '{}'",
                    field.name()
                )));
            }
        }
        Ok(())
    }
}
