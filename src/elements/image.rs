//! Image content element.
//!
//! Images are embedded as image XObjects. Raw samples are stored as given
//! (optionally flate-compressed by the writer); JPEG data is passed through
//! with the DCTDecode filter. No decoding or color conversion happens here.

use super::validate_opacity;
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// An image placed on a page.
#[derive(Debug, Clone)]
pub struct ImageContent {
    /// Where the image is painted (the unit square is scaled to this box)
    pub bbox: Rect,
    /// Encoding of `data`
    pub format: ImageFormat,
    /// Sample data or JPEG bytes
    pub data: Vec<u8>,
    /// Width in samples
    pub width: u32,
    /// Height in samples
    pub height: u32,
    /// Bits per color component
    pub bits_per_component: u8,
    /// Color space of the samples
    pub color_space: ColorSpace,
    /// Constant opacity, 0.0..=1.0
    pub opacity: Option<f32>,
}

impl ImageContent {
    /// Create an image element.
    pub fn new(bbox: Rect, format: ImageFormat, data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bbox,
            format,
            data,
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::RGB,
            opacity: None,
        }
    }

    /// Raw 8-bit samples in the given color space.
    pub fn raw(bbox: Rect, color_space: ColorSpace, data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            color_space,
            ..Self::new(bbox, ImageFormat::Raw, data, width, height)
        }
    }

    /// Set bits per component.
    pub fn with_bits_per_component(mut self, bpc: u8) -> Self {
        self.bits_per_component = bpc;
        self
    }

    /// Set a constant opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Byte length raw samples must have: rows are padded to whole bytes.
    pub fn expected_raw_len(&self) -> usize {
        let bits_per_row = self.width as usize
            * self.color_space.components() as usize
            * self.bits_per_component as usize;
        bits_per_row.div_ceil(8) * self.height as usize
    }

    /// Check dimensions, sample layout and opacity.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_document(format!(
                "image dimensions {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if !matches!(self.bits_per_component, 1 | 2 | 4 | 8 | 16) {
            return Err(Error::invalid_document(format!(
                "unsupported bits per component: {}",
                self.bits_per_component
            )));
        }
        if !self.bbox.is_valid() {
            return Err(Error::invalid_document("image bounding box is invalid"));
        }
        match self.format {
            ImageFormat::Raw if self.data.len() != self.expected_raw_len() => {
                Err(Error::invalid_document(format!(
                    "image has {} bytes of samples, expected {}",
                    self.data.len(),
                    self.expected_raw_len()
                )))
            },
            ImageFormat::Jpeg if !self.data.starts_with(&[0xFF, 0xD8]) => {
                Err(Error::invalid_document("JPEG data lacks SOI marker"))
            },
            _ => validate_opacity(self.opacity, "image"),
        }
    }
}

/// Encoding of the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Uncompressed samples
    Raw,
    /// Baseline JPEG, embedded with /DCTDecode
    Jpeg,
}

/// Device color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum ColorSpace {
    /// DeviceGray
    Gray,
    /// DeviceRGB
    #[default]
    RGB,
    /// DeviceCMYK
    CMYK,
}

impl ColorSpace {
    /// Components per sample.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::RGB => 3,
            ColorSpace::CMYK => 4,
        }
    }

    /// PDF color space name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::Gray => "DeviceGray",
            ColorSpace::RGB => "DeviceRGB",
            ColorSpace::CMYK => "DeviceCMYK",
        }
    }
}
