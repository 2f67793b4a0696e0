//! PDF document writer.
//!
//! Writes complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! The writer owns its sink. Each object's byte offset is recorded just before
//! its header is written, and the cross-reference table is produced from
//! those recorded offsets, so every entry points at the first byte of
//! `N 0 obj`.
//!
//! # Example
//!
//! ```
//! use pdf_forge::document::{Document, Page};
//! use pdf_forge::elements::TextContent;
//! use pdf_forge::writer::PdfWriter;
//!
//! let mut page = Page::letter();
//! page.add_element(TextContent::simple("Hello, World!", 72.0, 720.0, 12.0));
//! let mut doc = Document::new();
//! doc.add_page(page);
//!
//! let mut writer = PdfWriter::new(Vec::new());
//! let summary = writer.write(&doc)?;
//! let bytes = writer.into_inner().unwrap_or_default();
//! assert!(bytes.starts_with(b"%PDF-1.7\n"));
//! assert_eq!(summary.bytes_written, bytes.len() as u64);
//! # Ok::<(), pdf_forge::error::Error>(())
//! ```

use super::assembler::{AssembledDocument, ObjectGraphAssembler};
use crate::codec::CompressionLevel;
use crate::document::Document;
use crate::error::{Error, Result, WritePhase};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary marker line: four bytes above 127 so transfer tools treat the file as binary.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Whether to compress streams
    pub compress: bool,
    /// Flate level used when compressing
    pub compression_level: CompressionLevel,
    /// Creator application (`/Creator`)
    pub creator: Option<String>,
    /// Producer (`/Producer`)
    pub producer: Option<String>,
    /// Written as both `/CreationDate` and `/ModDate`
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            compress: true,
            compression_level: CompressionLevel::DEFAULT,
            creator: Some("pdf_forge".to_string()),
            producer: None,
            creation_date: None,
        }
    }
}

impl PdfWriterConfig {
    /// Set the version written in the header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams and raw image samples are compressed
    /// using FlateDecode (zlib/deflate) once they pass the size threshold.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the flate compression level.
    pub fn with_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    /// Set or clear the creator application.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Set the producer.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Set the creation and modification date.
    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Stamp the output with the current local time.
    pub fn with_current_date(self) -> Self {
        self.with_creation_date(chrono::Local::now().fixed_offset())
    }
}

/// What a completed write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Object number → byte offset of its `N 0 obj` line
    pub offsets: BTreeMap<u32, u64>,
    /// Byte offset of the `xref` keyword
    pub xref_offset: u64,
    /// Trailer `/Size`
    pub size: u32,
    /// Catalog object number
    pub catalog: u32,
    /// Total bytes written
    pub bytes_written: u64,
}

/// Counts bytes passed through to the sink.
struct CountingWriter<'w, W: Write> {
    inner: &'w mut W,
    position: u64,
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// PDF document writer.
///
/// Each writer produces at most one file. Once a [`write`](Self::write) has
/// started emitting, later calls fail with [`Error::AlreadyWritten`]; after
/// [`close`](Self::close) they fail with [`Error::WriterClosed`]. Neither
/// touches the sink.
pub struct PdfWriter<W: Write> {
    sink: Option<W>,
    config: PdfWriterConfig,
    /// Set once emission begins, even if it then fails
    written: bool,
}

impl PdfWriter<BufWriter<File>> {
    /// Create (or truncate) a file and write to it through a buffer.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    /// Create a PDF writer with default config.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(sink: W, config: PdfWriterConfig) -> Self {
        Self {
            sink: Some(sink),
            config,
            written: false,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// True until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Validate, assemble and write `document` as one complete PDF file.
    ///
    /// # Errors
    ///
    /// Validation and assembly run before any byte reaches the sink, so the
    /// first three errors below leave it untouched and the writer reusable.
    ///
    /// - [`Error::WriterClosed`] after [`close`](Self::close)
    /// - [`Error::AlreadyWritten`] if an earlier call began writing
    /// - [`Error::InvalidDocument`] when validation fails
    /// - [`Error::Write`] for sink failures, tagged with the phase
    /// - [`Error::MissingObject`] if an allocated object was never emitted
    pub fn write(&mut self, document: &Document) -> Result<WriteSummary> {
        let sink = self.sink.as_mut().ok_or(Error::WriterClosed)?;
        if self.written {
            return Err(Error::AlreadyWritten);
        }

        document.validate()?;
        let assembled = ObjectGraphAssembler::new(&self.config).assemble(document)?;

        self.written = true;
        let summary = emit(sink, &self.config.version, &assembled)?;
        log::info!(
            "Wrote PDF: {} pages, {} objects, {} bytes",
            document.page_count(),
            summary.offsets.len(),
            summary.bytes_written
        );
        Ok(summary)
    }

    /// Flush and release the sink. Calling it again does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush().map_err(|e| Error::write(WritePhase::Flush, e))?;
        }
        Ok(())
    }

    /// Return the sink, or `None` once closed.
    pub fn into_inner(mut self) -> Option<W> {
        self.sink.take()
    }
}

/// Write header, body, xref and trailer for an assembled document.
fn emit<W: Write>(sink: &mut W, version: &str, doc: &AssembledDocument) -> Result<WriteSummary> {
    let mut out = CountingWriter {
        inner: sink,
        position: 0,
    };

    writeln!(out, "%PDF-{}", version)
        .and_then(|_| out.write_all(BINARY_MARKER))
        .map_err(|e| Error::write(WritePhase::Header, e))?;

    let mut offsets = BTreeMap::new();
    for object in doc.objects() {
        offsets.insert(object.number(), out.position);
        object
            .serialize(&mut out)
            .map_err(|e| Error::write(WritePhase::Object(object.number()), e))?;
    }

    if let Some(missing) = (1..doc.size()).find(|n| !offsets.contains_key(n)) {
        return Err(Error::MissingObject(missing));
    }

    let xref_offset = out.position;
    write_xref(&mut out, doc.size(), &offsets)
        .map_err(|e| Error::write(WritePhase::CrossReference, e))?;

    write_trailer(&mut out, doc, xref_offset).map_err(|e| Error::write(WritePhase::Trailer, e))?;
    out.flush().map_err(|e| Error::write(WritePhase::Flush, e))?;

    Ok(WriteSummary {
        offsets,
        xref_offset,
        size: doc.size(),
        catalog: doc.catalog(),
        bytes_written: out.position,
    })
}

/// Each entry is exactly 20 bytes: `nnnnnnnnnn ggggg n \n`.
fn write_xref<W: Write>(out: &mut W, size: u32, offsets: &BTreeMap<u32, u64>) -> std::io::Result<()> {
    write!(out, "xref\n0 {}\n", size)?;
    out.write_all(b"0000000000 65535 f \n")?;
    for offset in offsets.values() {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    Ok(())
}

fn write_trailer<W: Write>(out: &mut W, doc: &AssembledDocument, xref_offset: u64) -> std::io::Result<()> {
    write!(out, "trailer\n<< /Size {} /Root {} 0 R", doc.size(), doc.catalog())?;
    if let Some(info) = doc.info() {
        write!(out, " /Info {} 0 R", info)?;
    }
    write!(out, " >>\nstartxref\n{}\n%%EOF\n", xref_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentInfo, Page};
    use crate::elements::TextContent;

    fn hello() -> Document {
        let mut page = Page::letter();
        page.add_element(TextContent::simple("Hello, World!", 72.0, 720.0, 12.0));
        let mut doc = Document::new();
        doc.add_page(page);
        doc
    }

    fn write_to_vec(doc: &Document, config: PdfWriterConfig) -> (WriteSummary, Vec<u8>) {
        let mut writer = PdfWriter::with_config(Vec::new(), config);
        let summary = writer.write(doc).unwrap();
        (summary, writer.into_inner().unwrap())
    }

    #[test]
    fn test_create_pdf_structure() {
        let (summary, bytes) = write_to_vec(&hello(), PdfWriterConfig::default());
        let content = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page "));
        assert!(content.ends_with("%%EOF\n"));
        assert_eq!(summary.bytes_written, bytes.len() as u64);
    }

    #[test]
    fn test_offsets_point_at_headers() {
        let (summary, bytes) = write_to_vec(&hello(), PdfWriterConfig::default());
        for (number, offset) in &summary.offsets {
            let header = format!("{} 0 obj\n", number);
            assert!(bytes[*offset as usize..].starts_with(header.as_bytes()), "object {}", number);
        }
        assert!(bytes[summary.xref_offset as usize..].starts_with(b"xref\n"));
    }

    #[test]
    fn test_xref_and_trailer_text() {
        let config = PdfWriterConfig::default().with_compress(false).with_creator(None);
        let (summary, bytes) = write_to_vec(&hello(), config);
        let content = String::from_utf8_lossy(&bytes);

        let xref = &content[summary.xref_offset as usize..];
        assert!(xref.starts_with(&format!("xref\n0 {}\n0000000000 65535 f \n", summary.size)));
        assert!(content.contains(&format!(
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            summary.size, summary.catalog, summary.xref_offset
        )));
        assert!(!content.contains("/Info"));
    }

    #[test]
    fn test_info_in_trailer() {
        let doc = hello().with_info(DocumentInfo::new().title("Test Document").author("Test Author"));
        let (_, bytes) = write_to_vec(&doc, PdfWriterConfig::default());
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Title (Test Document)"));
        assert!(content.contains("/Author (Test Author)"));
        assert!(content.contains("/Info "));
    }

    #[test]
    fn test_version_override() {
        let (_, bytes) = write_to_vec(&hello(), PdfWriterConfig::default().with_version("1.4"));
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
    }

    #[test]
    fn test_invalid_document_writes_nothing() {
        let mut writer = PdfWriter::new(Vec::new());
        assert!(matches!(writer.write(&Document::new()), Err(Error::InvalidDocument(_))));
        assert!(writer.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_second_write_rejected() {
        let mut writer = PdfWriter::new(Vec::new());
        let summary = writer.write(&hello()).unwrap();
        assert!(matches!(writer.write(&hello()), Err(Error::AlreadyWritten)));
        assert!(writer.is_open());

        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes.len() as u64, summary.bytes_written);
        assert_eq!(bytes.windows(5).filter(|w| w == b"%PDF-").count(), 1);
    }

    #[test]
    fn test_write_after_rejected_document() {
        let mut writer = PdfWriter::new(Vec::new());
        assert!(writer.write(&Document::new()).is_err());
        let summary = writer.write(&hello()).unwrap();
        assert_eq!(writer.into_inner().unwrap().len() as u64, summary.bytes_written);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut writer = PdfWriter::new(Vec::new());
        writer.write(&hello()).unwrap();
        assert!(writer.close().is_ok());
        assert!(writer.close().is_ok());
        assert!(!writer.is_open());
        assert!(matches!(writer.write(&hello()), Err(Error::WriterClosed)));
        assert!(writer.into_inner().is_none());
    }

    #[test]
    fn test_multiple_pages() {
        let mut doc = hello();
        doc.add_page(Page::a4());
        let (_, bytes) = write_to_vec(&doc, PdfWriterConfig::default().with_compress(false));
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Count 2"));
        assert!(content.contains("[0 0 612 792]"));
        assert!(content.contains("[0 0 595 842]"));
        assert!(content.contains("(Hello, World!) Tj"));
    }
}
