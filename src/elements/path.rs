//! Path/vector graphics content element types.

use super::{validate_opacity, Color};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Vector path: lines, curves and rectangles painted with one stroke/fill.
#[derive(Debug, Clone)]
pub struct PathContent {
    /// Path operations
    pub operations: Vec<PathOperation>,
    /// Stroke color (None for no stroke)
    pub stroke_color: Option<Color>,
    /// Fill color (None for no fill)
    pub fill_color: Option<Color>,
    /// Stroke width in points
    pub stroke_width: f32,
    /// Line cap style
    pub line_cap: LineCap,
    /// Line join style
    pub line_join: LineJoin,
    /// Constant opacity for both stroke and fill
    pub opacity: Option<f32>,
}

impl PathContent {
    /// Create an empty path stroked in black at 1pt.
    pub fn new() -> Self {
        Self::from_operations(Vec::new())
    }

    /// Create a path from operations.
    pub fn from_operations(operations: Vec<PathOperation>) -> Self {
        Self {
            operations,
            stroke_color: Some(Color::black()),
            fill_color: None,
            stroke_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            opacity: None,
        }
    }

    /// Create a line path from (x1, y1) to (x2, y2).
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new().move_to(x1, y1).line_to(x2, y2)
    }

    /// Create a rectangle path.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_operations(vec![PathOperation::Rectangle(x, y, width, height)])
    }

    /// Begin a new subpath.
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.operations.push(PathOperation::MoveTo(x, y));
        self
    }

    /// Straight segment to a point.
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.operations.push(PathOperation::LineTo(x, y));
        self
    }

    /// Cubic Bezier segment.
    pub fn curve_to(mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> Self {
        self.operations
            .push(PathOperation::CurveTo(x1, y1, x2, y2, x3, y3));
        self
    }

    /// Close the current subpath.
    pub fn close(mut self) -> Self {
        self.operations.push(PathOperation::ClosePath);
        self
    }

    /// Set stroke color.
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    /// Disable stroking.
    pub fn no_stroke(mut self) -> Self {
        self.stroke_color = None;
        self
    }

    /// Set fill color.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Set stroke width.
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set line cap and join.
    pub fn with_line_style(mut self, cap: LineCap, join: LineJoin) -> Self {
        self.line_cap = cap;
        self.line_join = join;
        self
    }

    /// Set a constant opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Check if this path has a stroke.
    pub fn has_stroke(&self) -> bool {
        self.stroke_color.is_some() && self.stroke_width > 0.0
    }

    /// Check if this path has a fill.
    pub fn has_fill(&self) -> bool {
        self.fill_color.is_some()
    }

    /// Bounding box of every point and control point.
    pub fn bbox(&self) -> Rect {
        let mut points = Vec::new();
        for op in &self.operations {
            match *op {
                PathOperation::MoveTo(x, y) | PathOperation::LineTo(x, y) => points.push((x, y)),
                PathOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    points.extend([(x1, y1), (x2, y2), (x3, y3)])
                },
                PathOperation::Rectangle(x, y, w, h) => points.extend([(x, y), (x + w, y + h)]),
                PathOperation::ClosePath => {},
            }
        }

        let Some(&(x0, y0)) = points.first() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for &(x, y) in &points[1..] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Rect::from_points(min_x, min_y, max_x, max_y)
    }

    /// Check coordinates, subpath structure, colors and opacity.
    pub fn validate(&self) -> Result<()> {
        match self.operations.first() {
            None => return Err(Error::invalid_document("path has no operations")),
            Some(PathOperation::MoveTo(..)) | Some(PathOperation::Rectangle(..)) => {},
            Some(_) => {
                return Err(Error::invalid_document(
                    "path must start with a move-to or rectangle",
                ))
            },
        }
        if !self.operations.iter().all(PathOperation::is_finite) {
            return Err(Error::invalid_document("path coordinates are not finite"));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(Error::invalid_document(format!(
                "stroke width {} must be non-negative",
                self.stroke_width
            )));
        }
        let colors_ok = [self.stroke_color, self.fill_color]
            .iter()
            .flatten()
            .all(Color::is_valid);
        if !colors_ok {
            return Err(Error::invalid_document("path color outside 0..=1"));
        }
        validate_opacity(self.opacity, "path")
    }
}

impl Default for PathContent {
    fn default() -> Self {
        Self::new()
    }
}

/// A path construction operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOperation {
    /// Move to a point (m operator)
    MoveTo(f32, f32),
    /// Line to a point (l operator)
    LineTo(f32, f32),
    /// Bezier curve to a point (c operator)
    /// (control1_x, control1_y, control2_x, control2_y, end_x, end_y)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Rectangle (re operator)
    /// (x, y, width, height)
    Rectangle(f32, f32, f32, f32),
    /// Close the current path (h operator)
    ClosePath,
}

impl PathOperation {
    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            PathOperation::MoveTo(x, y) | PathOperation::LineTo(x, y) => {
                x.is_finite() && y.is_finite()
            },
            PathOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                [x1, y1, x2, y2, x3, y3].iter().all(|v| v.is_finite())
            },
            PathOperation::Rectangle(x, y, w, h) => [x, y, w, h].iter().all(|v| v.is_finite()),
            PathOperation::ClosePath => true,
        }
    }
}

/// Line cap style for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Butt cap - line ends exactly at endpoint
    #[default]
    Butt = 0,
    /// Round cap - semicircle at endpoint
    Round = 1,
    /// Square cap - half square at endpoint
    Square = 2,
}

/// Line join style for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Miter join - sharp corner
    #[default]
    Miter = 0,
    /// Round join - circular arc
    Round = 1,
    /// Bevel join - diagonal corner
    Bevel = 2,
}
