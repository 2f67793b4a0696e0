//! Text field widget for PDF forms.
//!
//! Implements text input fields per ISO 32000-1:2008 Section 12.7.4.3.
//!
//! # Example
//!
//! ```
//! use pdf_forge::writer::form_fields::TextFieldWidget;
//! use pdf_forge::geometry::Rect;
//!
//! let field = TextFieldWidget::new("username", Rect::new(72.0, 700.0, 200.0, 20.0))
//!     .with_value("john_doe")
//!     .with_max_length(50)
//!     .required();
//! assert!(field.is_required());
//! ```

use super::{
    default_appearance, field_dict, validate_style, FormFieldWidget, TextAlignment,
    TextFieldFlags, WidgetStyle,
};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};
use crate::writer::object_serializer::ObjectSerializer;

/// A text input field widget.
///
/// Text fields can be single-line or multiline, and support password
/// masking, a maximum length and comb formatting.
#[derive(Debug, Clone)]
pub struct TextFieldWidget {
    name: String,
    rect: Rect,
    value: Option<String>,
    default_value: Option<String>,
    max_length: Option<u32>,
    flags: TextFieldFlags,
    alignment: TextAlignment,
    /// Font resource name in the AcroForm `/DR`
    font_name: String,
    font_size: f32,
    text_color: (f32, f32, f32),
    style: WidgetStyle,
}

impl TextFieldWidget {
    /// Create a new text field.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique field name (used for form submission)
    /// * `rect` - Position and size of the field
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            value: None,
            default_value: None,
            max_length: None,
            flags: TextFieldFlags::empty(),
            alignment: TextAlignment::Left,
            font_name: "Helv".to_string(),
            font_size: 12.0,
            text_color: (0.0, 0.0, 0.0),
            style: WidgetStyle::default(),
        }
    }

    /// Set the current value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the default value (used for form reset).
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set maximum character length.
    pub fn with_max_length(mut self, max_len: u32) -> Self {
        self.max_length = Some(max_len);
        self
    }

    /// Make this a multiline text field.
    pub fn multiline(mut self) -> Self {
        self.flags |= TextFieldFlags::MULTILINE;
        self
    }

    /// Make this a password field (displays asterisks).
    pub fn password(mut self) -> Self {
        self.flags |= TextFieldFlags::PASSWORD;
        self
    }

    /// Make this a comb field; requires a maximum length.
    pub fn comb(mut self) -> Self {
        self.flags |= TextFieldFlags::COMB;
        self
    }

    /// Make the field read-only.
    pub fn read_only(mut self) -> Self {
        self.flags |= TextFieldFlags::READ_ONLY;
        self
    }

    /// Make the field required.
    pub fn required(mut self) -> Self {
        self.flags |= TextFieldFlags::REQUIRED;
        self
    }

    /// Set custom flags.
    pub fn with_flags(mut self, flags: TextFieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set text alignment.
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the font for text display.
    ///
    /// `name` must be a font in the AcroForm default resources (`Helv`).
    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    /// Set text color (RGB, 0.0-1.0).
    pub fn with_text_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.text_color = (r, g, b);
        self
    }

    /// Replace border, background and tooltip.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Set tooltip text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.style.tooltip = Some(tooltip.into());
        self
    }

    /// Current value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the required flag is set.
    pub fn is_required(&self) -> bool {
        self.flags.contains(TextFieldFlags::REQUIRED)
    }
}

impl FormFieldWidget for TextFieldWidget {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn field_type(&self) -> &'static str {
        "Tx"
    }

    fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn build_field_dict(&self) -> Dict {
        let mut dict = field_dict("Tx", &self.name, self.field_flags());

        if let Some(ref value) = self.value {
            dict.insert("V".to_string(), ObjectSerializer::string(value));
        }
        if let Some(ref dv) = self.default_value {
            dict.insert("DV".to_string(), ObjectSerializer::string(dv));
        }
        if let Some(max_len) = self.max_length {
            dict.insert("MaxLen".to_string(), Object::Integer(max_len as i64));
        }
        dict.insert(
            "DA".to_string(),
            default_appearance(&self.font_name, self.font_size, self.text_color),
        );
        if self.alignment != TextAlignment::Left {
            dict.insert("Q".to_string(), Object::Integer(self.alignment.q_value()));
        }
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dict {
        self.style.widget_dict(&self.rect, page_ref, None)
    }

    fn validate_value(&self) -> Result<()> {
        if self.flags.contains(TextFieldFlags::COMB) && self.max_length.is_none() {
            return Err(Error::invalid_document(format!(
                "comb text field '{}' needs a maximum length",
                self.name
            )));
        }
        if let (Some(max), Some(value)) = (self.max_length, &self.value) {
            if value.chars().count() > max as usize {
                return Err(Error::invalid_document(format!(
                    "text field '{}' value exceeds {} characters",
                    self.name, max
                )));
            }
        }
        if !(self.font_size.is_finite() && self.font_size >= 0.0) {
            return Err(Error::invalid_document(format!(
                "text field '{}' font size must be non-negative",
                self.name
            )));
        }
        validate_style(&self.name, &self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(72.0, 700.0, 200.0, 20.0)
    }

    #[test]
    fn test_text_field_flags() {
        let field = TextFieldWidget::new("comments", rect()).multiline().password();
        assert!(field.flags.contains(TextFieldFlags::MULTILINE));
        assert!(field.flags.contains(TextFieldFlags::PASSWORD));
        assert!(!field.is_required());
        assert!(TextFieldWidget::new("x", rect()).required().is_required());
    }

    #[test]
    fn test_build_field_dict() {
        let field = TextFieldWidget::new("name", rect())
            .with_value("John Doe")
            .with_max_length(50)
            .with_alignment(TextAlignment::Center)
            .required();

        let dict = field.build_field_dict();

        assert_eq!(dict.get("FT"), Some(&Object::Name("Tx".to_string())));
        assert_eq!(dict.get("T"), Some(&Object::String(b"name".to_vec())));
        assert_eq!(dict.get("V"), Some(&Object::String(b"John Doe".to_vec())));
        assert_eq!(dict.get("MaxLen"), Some(&Object::Integer(50)));
        assert_eq!(dict.get("Ff"), Some(&Object::Integer(2)));
        assert_eq!(dict.get("Q"), Some(&Object::Integer(1)));
        assert_eq!(dict.get("DA"), Some(&Object::String(b"/Helv 12 Tf 0 0 0 rg".to_vec())));
    }

    #[test]
    fn test_no_flags_no_ff() {
        let dict = TextFieldWidget::new("plain", rect()).build_field_dict();
        assert!(!dict.contains_key("Ff"));
        assert!(!dict.contains_key("Q"));
    }

    #[test]
    fn test_validate_value() {
        assert!(TextFieldWidget::new("zip", rect()).comb().validate_value().is_err());
        assert!(TextFieldWidget::new("zip", rect())
            .comb()
            .with_max_length(5)
            .validate_value()
            .is_ok());
        assert!(TextFieldWidget::new("zip", rect())
            .with_max_length(3)
            .with_value("12345")
            .validate_value()
            .is_err());
    }
}
