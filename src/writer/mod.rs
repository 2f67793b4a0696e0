//! PDF writing module for generating PDF files.
//!
//! This module turns a [`Document`](crate::document::Document) into PDF bytes.
//!
//! ## Architecture
//!
//! ```text
//! Document (pages, elements, annotations, fields)
//!     ↓
//! [ObjectGraphAssembler] (numbers, page tree, resources, AcroForm, info)
//!     ↓  ContentStreamBuilder: elements → operators
//!     ↓  ObjectSerializer: Object → PDF syntax
//!     ↓
//! [IndirectObject] ("N 0 obj … endobj")
//!     ↓
//! [PdfWriter] (header, offsets, xref, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use pdf_forge::document::{Document, Page};
//! use pdf_forge::elements::TextContent;
//! use pdf_forge::geometry::Rect;
//! use pdf_forge::writer::{LinkAnnotation, PdfWriter};
//!
//! let mut first = Page::letter();
//! first.add_element(TextContent::simple("Next page", 72.0, 720.0, 12.0));
//! first.add_annotation(LinkAnnotation::goto_page(Rect::new(72.0, 720.0, 60.0, 12.0), 1));
//!
//! let mut doc = Document::new();
//! doc.add_page(first);
//! doc.add_page(Page::letter());
//!
//! let mut writer = PdfWriter::new(Vec::new());
//! writer.write(&doc)?;
//! writer.close()?;
//! # Ok::<(), pdf_forge::error::Error>(())
//! ```

mod acroform;
mod allocator;
mod annotation_builder;
mod assembler;
mod content_stream;
pub mod form_fields;
mod indirect;
mod object_serializer;
mod pdf_writer;
mod resources;
mod stamp;
mod text_annotations;
mod text_markup;

pub use acroform::AcroFormBuilder;
pub use allocator::ObjectAllocator;
pub use annotation_builder::{Annotation, BorderStyle, FitMode, LinkAction, LinkAnnotation};
pub use assembler::{format_pdf_date, AssembledDocument, ObjectGraphAssembler};
pub use content_stream::{encode_win_ansi, ContentStreamBuilder, ContentStreamOp, ResourceResolver};
pub use form_fields::FormField;
pub use indirect::IndirectObject;
pub use object_serializer::{escape_literal, ObjectSerializer};
pub use pdf_writer::{PdfWriter, PdfWriterConfig, WriteSummary};
pub use resources::{ResourceCategory, ResourceEntry, ResourceRegistry};
pub use stamp::StampAnnotation;
pub use text_annotations::TextAnnotation;
pub use text_markup::TextMarkupAnnotation;
