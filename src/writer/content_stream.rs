//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Sections 8-9.
//!
//! Resource names used by the operators (`/F1`, `/Im1`, `/GS1`) are obtained
//! from a [`ResourceResolver`] while elements are added, so the names that
//! appear in the stream are exactly the ones registered for the page.

use super::object_serializer::escape_literal;
use crate::elements::{
    Color, ContentElement, ImageContent, LineCap, LineJoin, PathContent, PathOperation,
    TableCellAlign, TableContent, TextContent,
};
use crate::error::Result;
use std::io::Write;

/// Supplies resource names to the builder, registering resources on first use.
pub trait ResourceResolver {
    /// Local name of a standard 14 font, e.g. `F1`.
    fn font(&mut self, base_font: &str) -> Result<String>;

    /// Local name of an image XObject holding `image`.
    fn image(&mut self, image: &ImageContent) -> Result<String>;

    /// Local name of an ExtGState setting constant stroke and fill opacity.
    fn ext_gstate(&mut self, opacity: f32) -> Result<String>;
}

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj); bytes are already in the font encoding
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Set line cap style (J)
    SetLineCap(LineCap),
    /// Set line join style (j)
    SetLineJoin(LineJoin),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Curve to (c)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Fill and stroke (B)
    FillStroke,
    /// End path without filling/stroking (n)
    EndPath,
    /// Paint XObject (Do)
    PaintXObject(String),
    /// Set graphics state from ExtGState dictionary (gs)
    SetExtGState(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End the current text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font by resource name and size.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFont(resource_name.to_string(), size))
    }

    /// Show text at a position; call inside a text object.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encode_win_ansi(text)))
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
    }

    /// Set stroke color.
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(color.r, color.g, color.b))
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Apply an ExtGState by resource name.
    pub fn set_ext_gstate(&mut self, gs_name: &str) -> &mut Self {
        self.op(ContentStreamOp::SetExtGState(gs_name.to_string()))
    }

    /// Paint an image XObject scaled into a box.
    pub fn draw_image(&mut self, resource_name: &str, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.save_state();
        self.op(ContentStreamOp::Transform(w, 0.0, 0.0, h, x, y));
        self.op(ContentStreamOp::PaintXObject(resource_name.to_string()));
        self.restore_state()
    }

    /// Add a content element, registering the resources it uses.
    pub fn add_element(
        &mut self,
        element: &ContentElement,
        resources: &mut dyn ResourceResolver,
    ) -> Result<&mut Self> {
        self.end_text();

        let gstate = match element.opacity() {
            Some(opacity) if opacity < 1.0 => Some(resources.ext_gstate(opacity)?),
            _ => None,
        };
        if let Some(ref name) = gstate {
            self.save_state();
            self.set_ext_gstate(name);
        }

        match element {
            ContentElement::Text(text) => self.add_text_content(text, resources)?,
            ContentElement::Image(image) => self.add_image_content(image, resources)?,
            ContentElement::Path(path) => self.add_path_content(path),
            ContentElement::Table(table) => self.add_table_content(table, resources)?,
        };

        if gstate.is_some() {
            self.restore_state();
        }
        Ok(self)
    }

    /// Add several elements in order.
    pub fn add_elements(
        &mut self,
        elements: &[ContentElement],
        resources: &mut dyn ResourceResolver,
    ) -> Result<&mut Self> {
        for element in elements {
            self.add_element(element, resources)?;
        }
        Ok(self)
    }

    fn add_text_content(
        &mut self,
        text: &TextContent,
        resources: &mut dyn ResourceResolver,
    ) -> Result<&mut Self> {
        let font = resources.font(text.base_font())?;

        self.begin_text();
        if !text.style.color.is_black() {
            self.fill_color(text.style.color);
        }
        self.set_font(&font, text.font.size);
        self.text(&text.text, text.bbox.x, text.bbox.y);
        self.end_text();
        Ok(self)
    }

    fn add_image_content(
        &mut self,
        image: &ImageContent,
        resources: &mut dyn ResourceResolver,
    ) -> Result<&mut Self> {
        let name = resources.image(image)?;
        Ok(self.draw_image(&name, image.bbox.x, image.bbox.y, image.bbox.width, image.bbox.height))
    }

    fn add_path_content(&mut self, path: &PathContent) -> &mut Self {
        self.save_state();
        if let Some(color) = path.stroke_color {
            self.stroke_color(color);
        }
        if let Some(color) = path.fill_color {
            self.fill_color(color);
        }
        self.op(ContentStreamOp::SetLineWidth(path.stroke_width));
        if path.line_cap != LineCap::default() {
            self.op(ContentStreamOp::SetLineCap(path.line_cap));
        }
        if path.line_join != LineJoin::default() {
            self.op(ContentStreamOp::SetLineJoin(path.line_join));
        }

        for op in &path.operations {
            let op = match *op {
                PathOperation::MoveTo(x, y) => ContentStreamOp::MoveTo(x, y),
                PathOperation::LineTo(x, y) => ContentStreamOp::LineTo(x, y),
                PathOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3)
                },
                PathOperation::Rectangle(x, y, w, h) => ContentStreamOp::Rectangle(x, y, w, h),
                PathOperation::ClosePath => ContentStreamOp::ClosePath,
            };
            self.op(op);
        }

        match (path.has_stroke(), path.has_fill()) {
            (true, true) => self.op(ContentStreamOp::FillStroke),
            (true, false) => self.op(ContentStreamOp::Stroke),
            (false, true) => self.op(ContentStreamOp::Fill),
            (false, false) => self.op(ContentStreamOp::EndPath),
        };
        self.restore_state()
    }

    /// Renders cell backgrounds, cell text and borders.
    fn add_table_content(
        &mut self,
        table: &TableContent,
        resources: &mut dyn ResourceResolver,
    ) -> Result<&mut Self> {
        let style = &table.style;
        let padding = style.cell_padding;
        let row_height = table.row_height();

        self.save_state();

        let mut current_y = table.bbox.top();
        for row in &table.rows {
            current_y -= row_height;

            if row.is_header {
                if let Some(bg) = style.header_background {
                    self.fill_color(bg);
                    self.op(ContentStreamOp::Rectangle(
                        table.bbox.x,
                        current_y,
                        table.bbox.width,
                        row_height,
                    ));
                    self.op(ContentStreamOp::Fill);
                }
            }

            let mut current_x = table.bbox.x;
            for (col, cell) in row.cells.iter().enumerate() {
                let cell_width = table.column_width(col);

                if !cell.text.is_empty() {
                    let bold = cell.bold || row.is_header;
                    let font = resources.font(if bold { "Helvetica-Bold" } else { "Helvetica" })?;
                    let text_width = approximate_text_width(&cell.text, style.font_size);

                    let text_x = match cell.align {
                        TableCellAlign::Left => current_x + padding,
                        TableCellAlign::Center => current_x + (cell_width - text_width) / 2.0,
                        TableCellAlign::Right => current_x + cell_width - padding - text_width,
                    };
                    let text_y = current_y + (row_height - style.font_size) / 2.0;

                    self.begin_text();
                    self.fill_color(Color::black());
                    self.set_font(&font, style.font_size);
                    self.text(&cell.text, text_x, text_y);
                    self.end_text();
                }

                current_x += cell_width;
            }
        }

        if style.border_width > 0.0 {
            self.stroke_color(style.border_color);
            self.op(ContentStreamOp::SetLineWidth(style.border_width));
            self.op(ContentStreamOp::Rectangle(
                table.bbox.x,
                table.bbox.y,
                table.bbox.width,
                table.bbox.height,
            ));

            for i in 1..table.rows.len() {
                let y = table.bbox.top() - row_height * i as f32;
                self.op(ContentStreamOp::MoveTo(table.bbox.x, y));
                self.op(ContentStreamOp::LineTo(table.bbox.right(), y));
            }

            let mut x = table.bbox.x;
            for col in 0..table.column_count().saturating_sub(1) {
                x += table.column_width(col);
                self.op(ContentStreamOp::MoveTo(x, table.bbox.y));
                self.op(ContentStreamOp::LineTo(x, table.bbox.top()));
            }
            self.op(ContentStreamOp::Stroke);
        }

        self.restore_state();
        Ok(self)
    }

    /// Build the content stream bytes, one operator per line.
    pub fn build(&mut self) -> Vec<u8> {
        self.end_text();

        let mut buf = Vec::new();
        for op in &self.operations {
            // Writes into a Vec cannot fail.
            let _ = write_op(&mut buf, op);
            buf.push(b'\n');
        }
        buf
    }
}

/// Rough Helvetica advance: half an em per character.
fn approximate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Encode text for a WinAnsiEncoding simple font.
///
/// Latin-1 characters map to themselves, the common typographic characters
/// WinAnsi places in 0x80..0x9F are mapped, anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\n' | '\r' | '\t' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} cm", a, b, c, d, e, f)
        },
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} Tm", a, b, c, d, e, f)
        },
        ContentStreamOp::ShowText(bytes) => {
            w.write_all(b"(")?;
            w.write_all(&escape_literal(bytes))?;
            w.write_all(b") Tj")
        },
        ContentStreamOp::SetFillColorRGB(r, g, b) => write!(w, "{} {} {} rg", r, g, b),
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => write!(w, "{} {} {} RG", r, g, b),
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", width),
        ContentStreamOp::SetLineCap(cap) => write!(w, "{} J", *cap as u8),
        ContentStreamOp::SetLineJoin(join) => write!(w, "{} j", *join as u8),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", x, y),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", x, y),
        ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3) => {
            write!(w, "{} {} {} {} {} {} c", x1, y1, x2, y2, x3, y3)
        },
        ContentStreamOp::Rectangle(x, y, w_val, h) => write!(w, "{} {} {} {} re", x, y, w_val, h),
        ContentStreamOp::ClosePath => write!(w, "h"),
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::FillStroke => write!(w, "B"),
        ContentStreamOp::EndPath => write!(w, "n"),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        ContentStreamOp::SetExtGState(name) => write!(w, "/{} gs", name),
    }
}
