//! Checkbox widget for PDF forms.
//!
//! Implements checkbox fields per ISO 32000-1:2008 Section 12.7.4.2.
//! The check mark is ZapfDingbats character `4`, drawn by the viewer from
//! `/MK /CA` because the AcroForm asks for appearances to be regenerated.

use super::{validate_style, ButtonFieldFlags, FormFieldWidget, WidgetStyle};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// A checkbox field widget.
#[derive(Debug, Clone)]
pub struct CheckboxWidget {
    name: String,
    rect: Rect,
    checked: bool,
    /// Export value when checked (default: "Yes")
    export_value: String,
    flags: ButtonFieldFlags,
    style: WidgetStyle,
}

impl CheckboxWidget {
    /// Create a new checkbox.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique field name
    /// * `rect` - Position and size (typically square, e.g., 15x15)
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            checked: false,
            export_value: "Yes".to_string(),
            flags: ButtonFieldFlags::empty(),
            style: WidgetStyle::default(),
        }
    }

    /// Set the checkbox as checked.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Set initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the export value (value submitted when checked).
    pub fn with_export_value(mut self, value: impl Into<String>) -> Self {
        self.export_value = value.into();
        self
    }

    /// Make the field read-only.
    pub fn read_only(mut self) -> Self {
        self.flags |= ButtonFieldFlags::READ_ONLY;
        self
    }

    /// Make the field required.
    pub fn required(mut self) -> Self {
        self.flags |= ButtonFieldFlags::REQUIRED;
        self
    }

    /// Set border color (RGB, 0.0-1.0).
    pub fn with_border_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.style.border_color = Some((r, g, b));
        self
    }

    /// Replace border, background and tooltip.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the current checked state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Get the export value.
    pub fn export_value(&self) -> &str {
        &self.export_value
    }

    /// `/V` and `/AS`: the export value when checked, `Off` otherwise.
    fn state_name(&self) -> Object {
        if self.checked {
            Object::Name(self.export_value.clone())
        } else {
            Object::Name("Off".to_string())
        }
    }
}

impl FormFieldWidget for CheckboxWidget {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn field_type(&self) -> &'static str {
        "Btn"
    }

    fn field_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn build_field_dict(&self) -> Dict {
        let mut dict = super::field_dict("Btn", &self.name, self.field_flags());
        dict.insert("V".to_string(), self.state_name());
        dict.insert("DV".to_string(), self.state_name());
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dict {
        let mut dict = self.style.widget_dict(&self.rect, page_ref, Some("4"));
        dict.insert("AS".to_string(), self.state_name());
        dict
    }

    fn validate_value(&self) -> Result<()> {
        if self.export_value.is_empty() || self.export_value == "Off" {
            return Err(Error::invalid_document(format!(
                "checkbox '{}' export value must be a name other than Off",
                self.name
            )));
        }
        validate_style(&self.name, &self.style)
    }
}
