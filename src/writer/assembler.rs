//! Object-graph assembly.
//!
//! Turns a [`Document`] into the complete, numbered set of indirect objects
//! for one output file. Numbers are handed out in two phases: the page-tree
//! root and every page are allocated before any page body is built, so link
//! destinations and `/Parent` entries always name real objects.
//!
//! Allocation order for a document with `n` pages:
//!
//! ```text
//! 1            page-tree root (body built last)
//! 2 ..= n+1    pages
//! per page     content stream, then fonts / images / graphics states on
//!              first use, then one object per annotation or field widget
//! then         catalog, AcroForm (if any field), info (if any metadata)
//! ```

use super::acroform::AcroFormBuilder;
use super::allocator::ObjectAllocator;
use super::annotation_builder::rect_object;
use super::content_stream::{ContentStreamBuilder, ResourceResolver};
use super::indirect::IndirectObject;
use super::object_serializer::ObjectSerializer;
use super::pdf_writer::PdfWriterConfig;
use super::resources::{ResourceCategory, ResourceRegistry};
use crate::codec::{compress, should_compress};
use crate::document::{Document, DocumentInfo, Page};
use crate::elements::{ImageContent, ImageFormat};
use crate::error::Result;
use crate::object::{Dict, Object, ObjectRef};
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, HashMap};

/// The numbered object set for one file, ready for the file writer.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    objects: Vec<IndirectObject>,
    catalog: u32,
    info: Option<u32>,
    size: u32,
    pages: Vec<ObjectRef>,
}

impl AssembledDocument {
    /// Objects in ascending number order.
    pub fn objects(&self) -> &[IndirectObject] {
        &self.objects
    }

    /// Catalog object number (`/Root`).
    pub fn catalog(&self) -> u32 {
        self.catalog
    }

    /// Info dictionary number, when metadata was written.
    pub fn info(&self) -> Option<u32> {
        self.info
    }

    /// Trailer `/Size`: highest object number plus one.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Page objects in document order.
    pub fn page_refs(&self) -> &[ObjectRef] {
        &self.pages
    }
}

/// Builds the object graph for one document.
///
/// An assembler is single-use: it owns the allocator for the pass.
pub struct ObjectGraphAssembler<'a> {
    config: &'a PdfWriterConfig,
    allocator: ObjectAllocator,
    bodies: BTreeMap<u32, Object>,
    /// Base font name → font object, shared by all pages
    fonts: HashMap<String, u32>,
    /// Opacity bits → ExtGState object, shared by all pages
    ext_gstates: HashMap<u32, u32>,
}

impl<'a> ObjectGraphAssembler<'a> {
    /// Create an assembler using the writer configuration.
    pub fn new(config: &'a PdfWriterConfig) -> Self {
        Self {
            config,
            allocator: ObjectAllocator::new(),
            bodies: BTreeMap::new(),
            fonts: HashMap::new(),
            ext_gstates: HashMap::new(),
        }
    }

    /// Assemble `document`. The document is not re-validated here.
    pub fn assemble(mut self, document: &Document) -> Result<AssembledDocument> {
        let root = self.allocator.allocate_ref();
        let page_refs: Vec<ObjectRef> = document
            .pages()
            .iter()
            .map(|_| self.allocator.allocate_ref())
            .collect();

        let mut fields = Vec::new();
        for (page, page_ref) in document.pages().iter().zip(&page_refs) {
            self.assemble_page(page, *page_ref, root, &page_refs, &mut fields)?;
        }

        let kids = page_refs.iter().map(|r| Object::Reference(*r)).collect();
        self.bodies.insert(
            root.id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", ObjectSerializer::integer(page_refs.len() as i64)),
            ]),
        );

        let catalog = self.allocator.allocate();
        let mut catalog_dict = Dict::new();
        catalog_dict.insert("Type".to_string(), ObjectSerializer::name("Catalog"));
        catalog_dict.insert("Pages".to_string(), Object::Reference(root));
        if !fields.is_empty() {
            let acroform = self.allocator.allocate();
            let mut builder = AcroFormBuilder::new();
            builder.add_fields(fields);
            self.bodies.insert(acroform, Object::Dictionary(builder.build()));
            catalog_dict.insert("AcroForm".to_string(), ObjectSerializer::reference(acroform, 0));
        }
        self.bodies.insert(catalog, Object::Dictionary(catalog_dict));

        let info_dict = info_dictionary(document.info(), self.config);
        let info = if info_dict.is_empty() {
            None
        } else {
            let number = self.allocator.allocate();
            self.bodies.insert(number, Object::Dictionary(info_dict));
            Some(number)
        };

        let size = self.allocator.next_number();
        let serializer = ObjectSerializer::compact();
        let objects = self
            .bodies
            .iter()
            .map(|(number, body)| IndirectObject::new(*number, 0, serializer.serialize(body)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Assembled {} pages into {} objects (catalog {})",
            page_refs.len(),
            objects.len(),
            catalog
        );

        Ok(AssembledDocument {
            objects,
            catalog,
            info,
            size,
            pages: page_refs,
        })
    }

    fn assemble_page(
        &mut self,
        page: &Page,
        page_ref: ObjectRef,
        root: ObjectRef,
        page_refs: &[ObjectRef],
        fields: &mut Vec<ObjectRef>,
    ) -> Result<()> {
        let content = self.allocator.allocate();
        let mut resolver = PageResolver {
            graph: self,
            registry: ResourceRegistry::new(),
        };
        let raw = ContentStreamBuilder::new()
            .add_elements(&page.elements, &mut resolver)?
            .build();
        let registry = resolver.registry;

        let content_stream = self.stream(Dict::new(), raw, self.config.compress)?;
        self.bodies.insert(content, content_stream);

        let mut annots = Vec::with_capacity(page.annotations.len());
        for annotation in &page.annotations {
            let number = self.allocator.allocate_ref();
            self.bodies
                .insert(number.id, Object::Dictionary(annotation.build(page_ref, page_refs)));
            if annotation.as_field().is_some() {
                fields.push(number);
            }
            annots.push(Object::Reference(number));
        }

        let mut dict = Dict::new();
        dict.insert("Type".to_string(), ObjectSerializer::name("Page"));
        dict.insert("Parent".to_string(), Object::Reference(root));
        dict.insert("MediaBox".to_string(), rect_object(&page.media_box));
        if let Some(ref crop) = page.crop_box {
            dict.insert("CropBox".to_string(), rect_object(crop));
        }
        let rotation = page.rotation.rem_euclid(360);
        if rotation != 0 {
            dict.insert("Rotate".to_string(), ObjectSerializer::integer(rotation as i64));
        }
        dict.insert("Resources".to_string(), registry.to_object());
        dict.insert("Contents".to_string(), ObjectSerializer::reference(content, 0));
        if !annots.is_empty() {
            dict.insert("Annots".to_string(), Object::Array(annots));
        }
        self.bodies.insert(page_ref.id, Object::Dictionary(dict));

        log::debug!(
            "Assembled page object {} ({} elements, {} annotations)",
            page_ref.id,
            page.elements.len(),
            page.annotations.len()
        );
        Ok(())
    }

    /// Wrap `data` in a stream, flate-compressing it when enabled and worthwhile.
    fn stream(&self, mut dict: Dict, data: Vec<u8>, allow_compression: bool) -> Result<Object> {
        let data = if allow_compression && should_compress(&data) {
            dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
            compress(&data, self.config.compression_level)?
        } else {
            data
        };
        Ok(Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        })
    }

    fn font(&mut self, base_font: &str) -> u32 {
        if let Some(&number) = self.fonts.get(base_font) {
            return number;
        }
        let number = self.allocator.allocate();
        self.bodies.insert(
            number,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(base_font)),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]),
        );
        self.fonts.insert(base_font.to_string(), number);
        number
    }

    fn image(&mut self, image: &ImageContent) -> Result<u32> {
        let number = self.allocator.allocate();

        let mut dict = Dict::new();
        dict.insert("Type".to_string(), ObjectSerializer::name("XObject"));
        dict.insert("Subtype".to_string(), ObjectSerializer::name("Image"));
        dict.insert("Width".to_string(), ObjectSerializer::integer(image.width as i64));
        dict.insert("Height".to_string(), ObjectSerializer::integer(image.height as i64));
        dict.insert("ColorSpace".to_string(), ObjectSerializer::name(image.color_space.pdf_name()));
        dict.insert(
            "BitsPerComponent".to_string(),
            ObjectSerializer::integer(image.bits_per_component as i64),
        );

        let stream = match image.format {
            ImageFormat::Jpeg => {
                dict.insert("Filter".to_string(), ObjectSerializer::name("DCTDecode"));
                self.stream(dict, image.data.clone(), false)?
            },
            ImageFormat::Raw => self.stream(dict, image.data.clone(), self.config.compress)?,
        };
        self.bodies.insert(number, stream);
        Ok(number)
    }

    fn ext_gstate(&mut self, opacity: f32) -> u32 {
        let key = opacity.to_bits();
        if let Some(&number) = self.ext_gstates.get(&key) {
            return number;
        }
        let number = self.allocator.allocate();
        self.bodies.insert(
            number,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("ExtGState")),
                ("CA", ObjectSerializer::real(opacity as f64)),
                ("ca", ObjectSerializer::real(opacity as f64)),
            ]),
        );
        self.ext_gstates.insert(key, number);
        number
    }
}

/// Resource names for one page, backed by the document-wide objects.
struct PageResolver<'g, 'a> {
    graph: &'g mut ObjectGraphAssembler<'a>,
    registry: ResourceRegistry,
}

impl ResourceResolver for PageResolver<'_, '_> {
    fn font(&mut self, base_font: &str) -> Result<String> {
        let number = self.graph.font(base_font);
        self.registry.get_or_add(ResourceCategory::Font, number)
    }

    fn image(&mut self, image: &ImageContent) -> Result<String> {
        let number = self.graph.image(image)?;
        self.registry.add_image(number)
    }

    fn ext_gstate(&mut self, opacity: f32) -> Result<String> {
        let number = self.graph.ext_gstate(opacity);
        self.registry.get_or_add(ResourceCategory::ExtGState, number)
    }
}

/// Build the info dictionary; empty when there is nothing to record.
fn info_dictionary(info: Option<&DocumentInfo>, config: &PdfWriterConfig) -> Dict {
    let mut dict = Dict::new();
    let mut text = |key: &str, value: Option<&str>| {
        if let Some(value) = value {
            dict.insert(key.to_string(), ObjectSerializer::string(value));
        }
    };

    if let Some(info) = info {
        text("Title", info.title.as_deref());
        text("Author", info.author.as_deref());
        text("Subject", info.subject.as_deref());
        text("Keywords", info.keywords.as_deref());
    }
    text("Creator", config.creator.as_deref());
    text("Producer", config.producer.as_deref());

    if let Some(date) = config.creation_date {
        let date = ObjectSerializer::string(&format_pdf_date(&date));
        dict.insert("CreationDate".to_string(), date.clone());
        dict.insert("ModDate".to_string(), date);
    }
    dict
}

/// Format a timestamp as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
pub fn format_pdf_date(date: &DateTime<FixedOffset>) -> String {
    let offset = date.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.abs() / 60;
    format!(
        "D:{}{}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        sign,
        minutes / 60,
        minutes % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ColorSpace, PathContent, TextContent};
    use crate::geometry::Rect;
    use crate::writer::form_fields::{CheckboxWidget, TextFieldWidget};
    use crate::writer::{LinkAnnotation, StampAnnotation};
    use chrono::TimeZone;

    fn body(assembled: &AssembledDocument, number: u32) -> String {
        let obj = assembled
            .objects()
            .iter()
            .find(|o| o.number() == number)
            .unwrap();
        String::from_utf8_lossy(obj.data()).to_string()
    }

    fn uncompressed() -> PdfWriterConfig {
        PdfWriterConfig::default().with_compress(false)
    }

    #[test]
    fn test_zero_pages() {
        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&Document::new()).unwrap();

        assert_eq!(body(&assembled, 1), "<< /Type /Pages /Kids [] /Count 0 >>");
        assert_eq!(assembled.catalog(), 2);
        assert!(assembled.page_refs().is_empty());
        assert_eq!(assembled.size() as usize, assembled.objects().len() + 1);
    }

    #[test]
    fn test_pages_allocated_before_bodies() {
        let mut doc = Document::new();
        for _ in 0..3 {
            let mut page = Page::letter();
            page.add_element(TextContent::simple("Hello", 72.0, 720.0, 12.0));
            doc.add_page(page);
        }

        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();

        let ids: Vec<u32> = assembled.page_refs().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(body(&assembled, 1), "<< /Type /Pages /Kids [2 0 R 3 0 R 4 0 R] /Count 3 >>");
        assert!(body(&assembled, 2).starts_with("<< /Type /Page /Parent 1 0 R /MediaBox [0 0 612 792]"));
    }

    #[test]
    fn test_numbers_are_dense() {
        let mut page = Page::letter();
        page.add_element(TextContent::simple("a", 72.0, 720.0, 12.0));
        page.add_element(TextContent::simple("b", 72.0, 700.0, 12.0).bold());
        page.add_annotation(StampAnnotation::draft(Rect::new(300.0, 700.0, 100.0, 40.0)));
        let mut doc = Document::new().with_info(crate::document::DocumentInfo::new().title("T"));
        doc.add_page(page);

        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let numbers: Vec<u32> = assembled.objects().iter().map(IndirectObject::number).collect();
        let expected: Vec<u32> = (1..assembled.size()).collect();
        assert_eq!(numbers, expected);
        assert!(assembled.info().is_some());
    }

    #[test]
    fn test_fonts_shared_across_pages() {
        let mut doc = Document::new();
        for _ in 0..2 {
            let mut page = Page::letter();
            page.add_element(TextContent::simple("x", 72.0, 720.0, 12.0));
            doc.add_page(page);
        }
        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();

        let fonts = assembled
            .objects()
            .iter()
            .filter(|o| o.data().starts_with(b"<< /Type /Font"))
            .count();
        assert_eq!(fonts, 1);
        for page in assembled.page_refs() {
            assert!(body(&assembled, page.id).contains("/Font << /F1 "));
        }
    }

    #[test]
    fn test_content_stream_compression() {
        let mut page = Page::letter();
        for i in 0..20 {
            page.add_element(TextContent::simple("Repeated line", 72.0, 700.0 - i as f32 * 14.0, 12.0));
        }
        let mut doc = Document::new();
        doc.add_page(page);

        let config = PdfWriterConfig::default();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        assert!(body(&assembled, 3).contains("/Filter /FlateDecode"));

        let plain = uncompressed();
        let assembled = ObjectGraphAssembler::new(&plain).assemble(&doc).unwrap();
        assert!(!body(&assembled, 3).contains("/Filter"));
    }

    #[test]
    fn test_short_stream_stays_uncompressed() {
        let mut page = Page::letter();
        page.add_element(PathContent::line(0.0, 0.0, 1.0, 1.0));
        let mut doc = Document::new();
        doc.add_page(page);

        let config = PdfWriterConfig::default();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        assert!(!body(&assembled, 3).contains("/Filter"));
    }

    #[test]
    fn test_images_and_opacity() {
        let image = ImageContent::raw(
            Rect::new(72.0, 500.0, 100.0, 100.0),
            ColorSpace::Gray,
            vec![0x80; 4],
            2,
            2,
        )
        .with_opacity(0.5);
        let mut page = Page::letter();
        page.add_element(image);
        page.add_element(TextContent::simple("faded", 72.0, 400.0, 12.0).with_opacity(0.5));
        let mut doc = Document::new();
        doc.add_page(page);

        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let page_body = body(&assembled, 2);
        assert!(page_body.contains("/XObject << /Im1 "), "{}", page_body);
        assert!(page_body.contains("/ExtGState << /GS1 "), "{}", page_body);
        assert!(!page_body.contains("/GS2"));

        let gstates = assembled
            .objects()
            .iter()
            .filter(|o| o.data().starts_with(b"<< /Type /ExtGState /CA 0.5 /ca 0.5"))
            .count();
        assert_eq!(gstates, 1);
    }

    #[test]
    fn test_link_destination_uses_page_map() {
        let mut first = Page::letter();
        first.add_annotation(StampAnnotation::draft(Rect::new(10.0, 10.0, 50.0, 20.0)));
        first.add_field(TextFieldWidget::new("name", Rect::new(72.0, 600.0, 100.0, 20.0)));
        first.add_annotation(LinkAnnotation::goto_page(Rect::new(72.0, 72.0, 50.0, 12.0), 2));
        let mut doc = Document::new();
        doc.add_page(first);
        doc.add_page(Page::letter());
        doc.add_page(Page::letter());

        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let target = assembled.page_refs()[2];
        let link = assembled
            .objects()
            .iter()
            .find(|o| o.data().starts_with(b"<< /Type /Annot /Subtype /Link"))
            .unwrap();
        let link = String::from_utf8_lossy(link.data()).to_string();
        assert!(link.contains(&format!("/Dest [{} 0 R /Fit]", target.id)), "{}", link);
    }

    #[test]
    fn test_acroform_collects_fields() {
        let mut first = Page::letter();
        first.add_field(TextFieldWidget::new("name", Rect::new(72.0, 700.0, 200.0, 20.0)));
        let mut second = Page::letter();
        second.add_field(CheckboxWidget::new("agree", Rect::new(72.0, 650.0, 12.0, 12.0)));
        let mut doc = Document::new();
        doc.add_page(first);
        doc.add_page(second);

        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let catalog = body(&assembled, assembled.catalog());
        assert!(catalog.contains("/AcroForm "), "{}", catalog);

        let acroform = assembled
            .objects()
            .iter()
            .find(|o| o.data().starts_with(b"<< /Fields"))
            .unwrap();
        let acroform = String::from_utf8_lossy(acroform.data()).to_string();
        for page in assembled.page_refs() {
            let page_body = body(&assembled, page.id);
            let annots = page_body.split("/Annots [").nth(1).unwrap();
            let widget = annots.split(']').next().unwrap();
            assert!(acroform.contains(widget), "{} missing {}", acroform, widget);
        }
    }

    #[test]
    fn test_no_acroform_without_fields() {
        let mut doc = Document::new();
        doc.add_page(Page::letter());
        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        assert!(!body(&assembled, assembled.catalog()).contains("AcroForm"));
        assert!(!body(&assembled, 2).contains("/Annots"));
    }

    #[test]
    fn test_page_boxes_and_rotation() {
        let page = Page::letter()
            .with_crop_box(Rect::new(10.0, 10.0, 500.0, 700.0))
            .with_rotation(-90);
        let mut doc = Document::new();
        doc.add_page(page);
        let config = uncompressed();
        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let page_body = body(&assembled, 2);
        assert!(page_body.contains("/CropBox [10 10 510 710]"));
        assert!(page_body.contains("/Rotate 270"));
    }

    #[test]
    fn test_info_dictionary() {
        let date = FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 14, 30, 5)
            .unwrap();
        let config = uncompressed().with_producer("forge-test").with_creation_date(date);
        let doc = Document::new().with_info(DocumentInfo::new().title("Report").keywords("a, b"));

        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let info = body(&assembled, assembled.info().unwrap());
        assert_eq!(
            info,
            "<< /Title (Report) /Keywords (a, b) /Creator (pdf_forge) /Producer (forge-test) \
             /CreationDate (D:20240309143005-05'00') /ModDate (D:20240309143005-05'00') >>"
        );
    }

    #[test]
    fn test_info_non_ascii_title() {
        let config = uncompressed().with_creator(None);
        let doc = Document::new().with_info(DocumentInfo::new().title("Résumé"));

        let assembled = ObjectGraphAssembler::new(&config).assemble(&doc).unwrap();
        let info = body(&assembled, assembled.info().unwrap());
        assert!(info.starts_with("<< /Title <FEFF005200E900730075006D00E9>"), "{}", info);
    }

    #[test]
    fn test_no_info_without_metadata() {
        let config = uncompressed().with_creator(None);
        let assembled = ObjectGraphAssembler::new(&config).assemble(&Document::new()).unwrap();
        assert_eq!(assembled.info(), None);
    }

    #[test]
    fn test_format_pdf_date() {
        let date = FixedOffset::east_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 59)
            .unwrap();
        assert_eq!(format_pdf_date(&date), "D:20231231235959+05'30'");
    }
}
