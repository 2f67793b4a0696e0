//! Value types shared by the annotation builders (ISO 32000-1:2008, 12.5).
//!
//! Nothing here knows about object numbers; the builders in
//! [`crate::writer`] turn these into dictionary entries.

use crate::geometry::Rect;
use bitflags::bitflags;

bitflags! {
    /// Annotation flags (`/F`), Table 165.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnnotationFlags: u32 {
        /// Bit 1: hide when no handler is available
        const INVISIBLE = 1 << 0;
        /// Bit 2: neither display nor print
        const HIDDEN = 1 << 1;
        /// Bit 3: print with the page
        const PRINT = 1 << 2;
        /// Bit 4: ignore page magnification
        const NO_ZOOM = 1 << 3;
        /// Bit 5: ignore page rotation
        const NO_ROTATE = 1 << 4;
        /// Bit 6: print only
        const NO_VIEW = 1 << 5;
        /// Bit 7: no interaction
        const READ_ONLY = 1 << 6;
        /// Bit 8: no deletion or property changes
        const LOCKED = 1 << 7;
    }
}

impl Default for AnnotationFlags {
    fn default() -> Self {
        Self::PRINT
    }
}

/// Annotation color (`/C`, `/IC`); components lie in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnnotationColor {
    /// Transparent; the entry is omitted
    #[default]
    None,
    /// DeviceGray
    Gray(f32),
    /// DeviceRGB
    Rgb(f32, f32, f32),
    /// DeviceCMYK
    Cmyk(f32, f32, f32, f32),
}

impl AnnotationColor {
    /// Highlighter yellow.
    pub fn yellow() -> Self {
        Self::Rgb(1.0, 1.0, 0.0)
    }

    /// Pure red.
    pub fn red() -> Self {
        Self::Rgb(1.0, 0.0, 0.0)
    }

    /// Pure green.
    pub fn green() -> Self {
        Self::Rgb(0.0, 1.0, 0.0)
    }

    /// Components for the color array, `None` when transparent.
    pub fn to_array(&self) -> Option<Vec<f32>> {
        match *self {
            Self::None => None,
            Self::Gray(g) => Some(vec![g]),
            Self::Rgb(r, g, b) => Some(vec![r, g, b]),
            Self::Cmyk(c, m, y, k) => Some(vec![c, m, y, k]),
        }
    }

    /// True when every component is within `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        self.to_array()
            .map_or(true, |c| c.iter().all(|v| (0.0..=1.0).contains(v)))
    }
}

/// Sticky-note icon (`/Name` of a Text annotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnnotationIcon {
    /// Speech bubble
    Comment,
    /// Key
    Key,
    /// Note
    #[default]
    Note,
    /// Question mark
    Help,
    /// New paragraph mark
    NewParagraph,
    /// Paragraph mark
    Paragraph,
    /// Caret
    Insert,
}

impl TextAnnotationIcon {
    /// Name written to `/Name`.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Comment => "Comment",
            Self::Key => "Key",
            Self::Note => "Note",
            Self::Help => "Help",
            Self::NewParagraph => "NewParagraph",
            Self::Paragraph => "Paragraph",
            Self::Insert => "Insert",
        }
    }
}

/// The four text markup subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMarkupType {
    /// `/Highlight`
    Highlight,
    /// `/Underline`
    Underline,
    /// `/Squiggly`
    Squiggly,
    /// `/StrikeOut`
    StrikeOut,
}

impl TextMarkupType {
    /// Annotation `/Subtype` name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Highlight => "Highlight",
            Self::Underline => "Underline",
            Self::Squiggly => "Squiggly",
            Self::StrikeOut => "StrikeOut",
        }
    }

    /// Color used when the caller sets none.
    pub fn default_color(&self) -> AnnotationColor {
        match self {
            Self::Highlight => AnnotationColor::yellow(),
            Self::Underline => AnnotationColor::green(),
            Self::Squiggly => AnnotationColor::Rgb(1.0, 0.5, 0.0),
            Self::StrikeOut => AnnotationColor::red(),
        }
    }
}

/// Rubber stamp names (Section 12.5.6.12), plus custom names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StampType {
    /// Approved
    Approved,
    /// Experimental
    Experimental,
    /// NotApproved
    NotApproved,
    /// AsIs
    AsIs,
    /// Expired
    Expired,
    /// NotForPublicRelease
    NotForPublicRelease,
    /// Confidential
    Confidential,
    /// Final
    Final,
    /// Sold
    Sold,
    /// Departmental
    Departmental,
    /// ForComment
    ForComment,
    /// TopSecret
    TopSecret,
    /// Draft
    #[default]
    Draft,
    /// ForPublicRelease
    ForPublicRelease,
    /// Any other name
    Custom(String),
}

impl StampType {
    /// Name written to `/Name`.
    pub fn pdf_name(&self) -> &str {
        match self {
            Self::Approved => "Approved",
            Self::Experimental => "Experimental",
            Self::NotApproved => "NotApproved",
            Self::AsIs => "AsIs",
            Self::Expired => "Expired",
            Self::NotForPublicRelease => "NotForPublicRelease",
            Self::Confidential => "Confidential",
            Self::Final => "Final",
            Self::Sold => "Sold",
            Self::Departmental => "Departmental",
            Self::ForComment => "ForComment",
            Self::TopSecret => "TopSecret",
            Self::Draft => "Draft",
            Self::ForPublicRelease => "ForPublicRelease",
            Self::Custom(name) => name,
        }
    }
}

/// Link highlighting (`/H`), Table 173.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    /// `N`
    None,
    /// `I`
    #[default]
    Invert,
    /// `O`
    Outline,
    /// `P`
    Push,
}

impl HighlightMode {
    /// Single-letter name for `/H`.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::None => "N",
            Self::Invert => "I",
            Self::Outline => "O",
            Self::Push => "P",
        }
    }
}

/// One quadrilateral: `x1 y1 x2 y2 x3 y3 x4 y4`, bottom edge first.
pub type QuadPoint = [f64; 8];

/// Quad point helpers.
pub mod quad_points {
    use super::QuadPoint;
    use crate::geometry::Rect;

    /// Quad covering `rect`.
    pub fn from_rect(rect: &Rect) -> QuadPoint {
        let (left, bottom) = (rect.x as f64, rect.y as f64);
        let (right, top) = (rect.right() as f64, rect.top() as f64);
        [left, bottom, right, bottom, right, top, left, top]
    }

    /// Axis-aligned bounds of one quad.
    pub fn bounding_rect(quad: &QuadPoint) -> Rect {
        let xs = [quad[0], quad[2], quad[4], quad[6]];
        let ys = [quad[1], quad[3], quad[5], quad[7]];
        let min = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min) as f32;
        let max = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max) as f32;

        Rect::new(min(&xs), min(&ys), max(&xs) - min(&xs), max(&ys) - min(&ys))
    }

    /// All coordinates of `quads` in order.
    pub fn flatten(quads: &[QuadPoint]) -> Vec<f64> {
        quads.iter().flatten().copied().collect()
    }
}

/// Union of the bounding rectangles of `quads`, or `None` when empty.
pub fn quads_bounds(quads: &[QuadPoint]) -> Option<Rect> {
    quads
        .iter()
        .map(quad_points::bounding_rect)
        .reduce(|acc, r| acc.union(&r))
}
