//! Integration tests for the byte layout of written files.
//!
//! Parses the cross-reference table and trailer back out of the output with
//! regular expressions and checks them against the bytes actually written:
//! - every xref offset lands on its object's `N 0 obj` line
//! - entries are exactly 20 bytes and `/Size` counts the free entry
//! - `startxref` points at the `xref` keyword

use pdf_forge::document::{Document, DocumentInfo, Page};
use pdf_forge::elements::{Color, PathContent, TextContent};
use pdf_forge::error::{Error, WritePhase};
use pdf_forge::geometry::Rect;
use pdf_forge::writer::form_fields::{CheckboxWidget, TextFieldWidget};
use pdf_forge::writer::{LinkAnnotation, PdfWriter, PdfWriterConfig, StampAnnotation, TextAnnotation};
use regex::bytes::Regex;
use std::io::Write;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_document() -> Document {
    let mut first = Page::letter();
    first.add_element(TextContent::simple("Quarterly report", 72.0, 720.0, 18.0).bold());
    first.add_element(PathContent::rect(72.0, 700.0, 468.0, 1.0).with_fill(Color::black()));
    first.add_annotation(TextAnnotation::comment(Rect::new(500.0, 720.0, 20.0, 20.0), "Check totals"));
    first.add_field(TextFieldWidget::new("reviewer", Rect::new(72.0, 650.0, 200.0, 20.0)));
    first.add_annotation(LinkAnnotation::goto_page(Rect::new(72.0, 600.0, 80.0, 12.0), 1));

    let mut second = Page::a4();
    second.add_element(TextContent::simple("Appendix", 72.0, 770.0, 14.0));
    second.add_annotation(StampAnnotation::approved(Rect::new(400.0, 700.0, 120.0, 40.0)));
    second.add_field(CheckboxWidget::new("signed_off", Rect::new(72.0, 650.0, 12.0, 12.0)));

    let mut doc = Document::new().with_info(DocumentInfo::new().title("Report").author("Finance"));
    doc.add_page(first);
    doc.add_page(second);
    doc
}

fn write(doc: &Document, config: PdfWriterConfig) -> Vec<u8> {
    let mut writer = PdfWriter::with_config(Vec::new(), config);
    writer.write(doc).expect("write failed");
    writer.into_inner().expect("writer closed")
}

struct Xref {
    offset: usize,
    size: usize,
    entries: Vec<(u64, u32, u8)>,
}

fn parse_xref(bytes: &[u8]) -> Xref {
    let startxref = Regex::new(r"startxref\n(\d+)\n%%EOF\n$").unwrap();
    let offset: usize = std::str::from_utf8(&startxref.captures(bytes).unwrap()[1])
        .unwrap()
        .parse()
        .unwrap();

    let header = Regex::new(r"^xref\n0 (\d+)\n").unwrap();
    let caps = header.captures(&bytes[offset..]).expect("startxref must point at xref");
    let size: usize = std::str::from_utf8(&caps[1]).unwrap().parse().unwrap();

    let entry = Regex::new(r"^(\d{10}) (\d{5}) ([nf]) \n").unwrap();
    let mut pos = offset + caps[0].len();
    let mut entries = Vec::new();
    for _ in 0..size {
        let line = &bytes[pos..pos + 20];
        let caps = entry.captures(line).expect("20-byte xref entry");
        entries.push((
            std::str::from_utf8(&caps[1]).unwrap().parse().unwrap(),
            std::str::from_utf8(&caps[2]).unwrap().parse().unwrap(),
            caps[3][0],
        ));
        pos += 20;
    }
    assert!(bytes[pos..].starts_with(b"trailer\n"));

    Xref { offset, size, entries }
}

#[test]
fn test_xref_offsets_match_object_headers() {
    init_logging();
    let bytes = write(&sample_document(), PdfWriterConfig::default());
    let xref = parse_xref(&bytes);

    assert_eq!(xref.entries[0], (0, 65535, b'f'));
    for (number, (offset, generation, kind)) in xref.entries.iter().enumerate().skip(1) {
        assert_eq!(*kind, b'n');
        assert_eq!(*generation, 0);
        let header = format!("{} 0 obj\n", number);
        assert!(
            bytes[*offset as usize..].starts_with(header.as_bytes()),
            "entry {} points at the wrong bytes",
            number
        );
    }
}

#[test]
fn test_size_counts_every_object() {
    let bytes = write(&sample_document(), PdfWriterConfig::default().with_compress(false));
    let xref = parse_xref(&bytes);

    let objects = Regex::new(r"(?m)^(\d+) 0 obj\n").unwrap().find_iter(&bytes).count();
    assert_eq!(xref.size, objects + 1);

    let trailer = Regex::new(r"trailer\n<< /Size (\d+) /Root (\d+) 0 R /Info (\d+) 0 R >>\n").unwrap();
    let caps = trailer.captures(&bytes).expect("trailer");
    let size: usize = std::str::from_utf8(&caps[1]).unwrap().parse().unwrap();
    assert_eq!(size, xref.size);

    let root: usize = std::str::from_utf8(&caps[2]).unwrap().parse().unwrap();
    let root_offset = xref.entries[root].0 as usize;
    assert!(bytes[root_offset..].starts_with(format!("{} 0 obj\n<< /Type /Catalog", root).as_bytes()));
}

#[test]
fn test_summary_agrees_with_bytes() {
    let mut writer = PdfWriter::new(Vec::new());
    let summary = writer.write(&sample_document()).unwrap();
    let bytes = writer.into_inner().unwrap();
    let xref = parse_xref(&bytes);

    assert_eq!(summary.xref_offset as usize, xref.offset);
    assert_eq!(summary.size as usize, xref.size);
    assert_eq!(summary.bytes_written as usize, bytes.len());
    for (number, offset) in &summary.offsets {
        assert_eq!(xref.entries[*number as usize].0, *offset);
    }
}

#[test]
fn test_header_and_eof() {
    let bytes = write(&sample_document(), PdfWriterConfig::default());
    assert!(bytes.starts_with(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn test_identical_documents_identical_bytes() {
    let first = write(&sample_document(), PdfWriterConfig::default());
    let second = write(&sample_document(), PdfWriterConfig::default());
    assert_eq!(first, second);
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");

    let mut writer = PdfWriter::create(&path).unwrap();
    let summary = writer.write(&sample_document()).unwrap();
    writer.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, summary.bytes_written);
    assert_eq!(parse_xref(&bytes).size as u32, summary.size);
}

#[test]
fn test_close_twice_then_write() {
    let mut writer = PdfWriter::new(Vec::new());
    writer.close().unwrap();
    writer.close().unwrap();
    assert!(matches!(writer.write(&sample_document()), Err(Error::WriterClosed)));
}

/// Sink that accepts `budget` bytes and then fails.
struct FailAfter {
    written: Vec<u8>,
    budget: usize,
    fail_flush: bool,
}

impl FailAfter {
    fn new(budget: usize) -> Self {
        Self {
            written: Vec::new(),
            budget,
            fail_flush: false,
        }
    }
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.fail_flush {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "flush refused"))
        } else {
            Ok(())
        }
    }
}

fn failing_phase(sink: FailAfter) -> WritePhase {
    let mut writer = PdfWriter::new(sink);
    match writer.write(&sample_document()) {
        Err(Error::Write { phase, .. }) => phase,
        other => panic!("expected a write error, got {:?}", other),
    }
}

#[test]
fn test_failures_carry_phase() {
    let full = write(&sample_document(), PdfWriterConfig::default());
    let xref = parse_xref(&full);
    let trailer = full.windows(8).position(|w| w == b"trailer\n").unwrap();

    assert_eq!(failing_phase(FailAfter::new(4)), WritePhase::Header);
    assert_eq!(
        failing_phase(FailAfter::new(xref.entries[1].0 as usize + 3)),
        WritePhase::Object(1)
    );
    assert_eq!(failing_phase(FailAfter::new(xref.offset + 2)), WritePhase::CrossReference);
    assert_eq!(failing_phase(FailAfter::new(trailer + 2)), WritePhase::Trailer);

    let mut flush_fails = FailAfter::new(usize::MAX);
    flush_fails.fail_flush = true;
    assert_eq!(failing_phase(flush_fails), WritePhase::Flush);
}

#[test]
fn test_invalid_document_leaves_sink_untouched() {
    let mut bad = Page::letter();
    bad.add_annotation(LinkAnnotation::goto_page(Rect::new(0.0, 0.0, 10.0, 10.0), 5));
    let mut doc = Document::new();
    doc.add_page(bad);

    let mut writer = PdfWriter::new(Vec::new());
    assert!(matches!(writer.write(&doc), Err(Error::InvalidDocument(_))));
    assert!(writer.into_inner().unwrap().is_empty());
}

#[test]
fn test_one_file_per_writer() {
    let mut writer = PdfWriter::new(FailAfter::new(usize::MAX));
    let summary = writer.write(&sample_document()).unwrap();
    assert!(matches!(writer.write(&sample_document()), Err(Error::AlreadyWritten)));
    assert_eq!(writer.into_inner().unwrap().written.len() as u64, summary.bytes_written);

    // A pass that fails part-way still uses up the writer
    let mut writer = PdfWriter::new(FailAfter::new(64));
    assert!(matches!(writer.write(&sample_document()), Err(Error::Write { .. })));
    assert!(matches!(writer.write(&sample_document()), Err(Error::AlreadyWritten)));
    assert!(writer.into_inner().unwrap().written.len() <= 64);
}
