//! Choice field widgets for PDF forms.
//!
//! Implements choice fields per ISO 32000-1:2008 Section 12.7.4.4:
//! - Combo boxes (dropdown lists, `COMBO` flag set)
//! - List boxes (scrollable lists, `COMBO` flag clear)
//!
//! # Example
//!
//! ```
//! use pdf_forge::writer::form_fields::{ComboBoxWidget, ListBoxWidget};
//! use pdf_forge::geometry::Rect;
//!
//! let country = ComboBoxWidget::new("country", Rect::new(72.0, 700.0, 150.0, 20.0))
//!     .with_options(vec!["USA", "Canada", "UK"])
//!     .with_value("USA");
//!
//! let interests = ListBoxWidget::new("interests", Rect::new(72.0, 600.0, 150.0, 80.0))
//!     .with_options(vec!["Sports", "Music", "Art", "Technology"])
//!     .multi_select();
//! assert!(interests.is_multi_select());
//! ```

use super::{
    default_appearance, field_dict, validate_style, ChoiceFieldFlags, FormFieldWidget,
    WidgetStyle,
};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};
use crate::writer::object_serializer::ObjectSerializer;

/// A choice option with display text and export value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    /// Display text shown to user
    pub display: String,
    /// Export value (may differ from display)
    pub export: String,
}

impl ChoiceOption {
    /// Create a new option where display and export are the same.
    pub fn new(value: impl Into<String>) -> Self {
        let v = value.into();
        Self {
            display: v.clone(),
            export: v,
        }
    }

    /// Create a new option with different display and export values.
    pub fn new_with_export(display: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            export: export.into(),
        }
    }

    /// `/Opt` entry: a string, or `[export display]` when they differ.
    fn to_object(&self) -> Object {
        if self.display == self.export {
            ObjectSerializer::string(&self.display)
        } else {
            Object::Array(vec![
                ObjectSerializer::string(&self.export),
                ObjectSerializer::string(&self.display),
            ])
        }
    }
}

/// State shared by combo and list boxes.
#[derive(Debug, Clone)]
struct ChoiceBase {
    name: String,
    rect: Rect,
    options: Vec<ChoiceOption>,
    flags: ChoiceFieldFlags,
    font_name: String,
    font_size: f32,
    text_color: (f32, f32, f32),
    style: WidgetStyle,
}

impl ChoiceBase {
    fn new(name: String, rect: Rect, flags: ChoiceFieldFlags) -> Self {
        Self {
            name,
            rect,
            options: Vec::new(),
            flags,
            font_name: "Helv".to_string(),
            font_size: 12.0,
            text_color: (0.0, 0.0, 0.0),
            style: WidgetStyle::default(),
        }
    }

    /// `/FT /T /Ff /Opt /DA`; values are added by the caller.
    fn field_dict(&self) -> Dict {
        let mut dict = field_dict("Ch", &self.name, self.flags.bits());
        let options = self.options.iter().map(ChoiceOption::to_object).collect();
        dict.insert("Opt".to_string(), Object::Array(options));
        dict.insert(
            "DA".to_string(),
            default_appearance(&self.font_name, self.font_size, self.text_color),
        );
        dict
    }

    fn has_export(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.export == value)
    }

    fn check_value(&self, value: &str, editable: bool) -> Result<()> {
        if editable || self.has_export(value) {
            Ok(())
        } else {
            Err(Error::invalid_document(format!(
                "choice field '{}' value '{}' is not one of its options",
                self.name, value
            )))
        }
    }
}

/// A combo box (dropdown) field widget.
///
/// Editable combo boxes accept values outside the option list.
#[derive(Debug, Clone)]
pub struct ComboBoxWidget {
    base: ChoiceBase,
    value: Option<String>,
    default_value: Option<String>,
}

impl ComboBoxWidget {
    /// Create a new combo box.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            base: ChoiceBase::new(name.into(), rect, ChoiceFieldFlags::COMBO),
            value: None,
            default_value: None,
        }
    }

    /// Add options from strings (display = export).
    pub fn with_options(mut self, options: Vec<impl Into<String>>) -> Self {
        self.base.options = options.into_iter().map(ChoiceOption::new).collect();
        self
    }

    /// Add options with display/export pairs.
    pub fn with_choice_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.base.options = options;
        self
    }

    /// Set the current value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the default value.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Make the combo box editable (user can type custom value).
    pub fn editable(mut self) -> Self {
        self.base.flags |= ChoiceFieldFlags::EDIT;
        self
    }

    /// Sort options alphabetically.
    pub fn sorted(mut self) -> Self {
        self.base.flags |= ChoiceFieldFlags::SORT;
        self
    }

    /// Make the field required.
    pub fn required(mut self) -> Self {
        self.base.flags |= ChoiceFieldFlags::REQUIRED;
        self
    }

    /// Set font.
    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.base.font_name = name.into();
        self.base.font_size = size;
        self
    }

    /// Replace border, background and tooltip.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.base.style = style;
        self
    }

    /// Options in display order.
    pub fn options(&self) -> &[ChoiceOption] {
        &self.base.options
    }
}

impl FormFieldWidget for ComboBoxWidget {
    fn field_name(&self) -> &str {
        &self.base.name
    }

    fn rect(&self) -> Rect {
        self.base.rect
    }

    fn field_type(&self) -> &'static str {
        "Ch"
    }

    fn field_flags(&self) -> u32 {
        self.base.flags.bits()
    }

    fn build_field_dict(&self) -> Dict {
        let mut dict = self.base.field_dict();
        if let Some(ref value) = self.value {
            dict.insert("V".to_string(), ObjectSerializer::string(value));
        }
        if let Some(ref dv) = self.default_value {
            dict.insert("DV".to_string(), ObjectSerializer::string(dv));
        }
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dict {
        self.base.style.widget_dict(&self.base.rect, page_ref, None)
    }

    fn validate_value(&self) -> Result<()> {
        if !self.base.flags.contains(ChoiceFieldFlags::COMBO) {
            return Err(Error::invalid_document(format!(
                "combo box '{}' lacks the combo flag",
                self.base.name
            )));
        }
        let editable = self.base.flags.contains(ChoiceFieldFlags::EDIT);
        for value in self.value.iter().chain(&self.default_value) {
            self.base.check_value(value, editable)?;
        }
        validate_style(&self.base.name, &self.base.style)
    }
}

/// A list box field widget.
///
/// List boxes allow single or, with `multi_select`, multiple selections.
#[derive(Debug, Clone)]
pub struct ListBoxWidget {
    base: ChoiceBase,
    values: Vec<String>,
    top_index: Option<u32>,
}

impl ListBoxWidget {
    /// Create a new list box.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            base: ChoiceBase::new(name.into(), rect, ChoiceFieldFlags::empty()),
            values: Vec::new(),
            top_index: None,
        }
    }

    /// Add options from strings.
    pub fn with_options(mut self, options: Vec<impl Into<String>>) -> Self {
        self.base.options = options.into_iter().map(ChoiceOption::new).collect();
        self
    }

    /// Add options with display/export pairs.
    pub fn with_choice_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.base.options = options;
        self
    }

    /// Set the selected value (single selection).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values = vec![value.into()];
        self
    }

    /// Set selected values (multiple selection).
    pub fn with_values(mut self, values: Vec<impl Into<String>>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Enable multiple selection.
    pub fn multi_select(mut self) -> Self {
        self.base.flags |= ChoiceFieldFlags::MULTI_SELECT;
        self
    }

    /// Make the field required.
    pub fn required(mut self) -> Self {
        self.base.flags |= ChoiceFieldFlags::REQUIRED;
        self
    }

    /// Set the top visible item index.
    pub fn with_top_index(mut self, index: u32) -> Self {
        self.top_index = Some(index);
        self
    }

    /// Replace border, background and tooltip.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.base.style = style;
        self
    }

    /// Whether several options may be selected.
    pub fn is_multi_select(&self) -> bool {
        self.base.flags.contains(ChoiceFieldFlags::MULTI_SELECT)
    }
}

impl FormFieldWidget for ListBoxWidget {
    fn field_name(&self) -> &str {
        &self.base.name
    }

    fn rect(&self) -> Rect {
        self.base.rect
    }

    fn field_type(&self) -> &'static str {
        "Ch"
    }

    fn field_flags(&self) -> u32 {
        self.base.flags.bits()
    }

    fn build_field_dict(&self) -> Dict {
        let mut dict = self.base.field_dict();
        match self.values.as_slice() {
            [] => {},
            [single] => {
                dict.insert("V".to_string(), ObjectSerializer::string(single));
            },
            many => {
                let values = many.iter().map(|v| ObjectSerializer::string(v)).collect();
                dict.insert("V".to_string(), Object::Array(values));
            },
        }
        if let Some(ti) = self.top_index {
            dict.insert("TI".to_string(), Object::Integer(ti as i64));
        }
        dict
    }

    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dict {
        self.base.style.widget_dict(&self.base.rect, page_ref, None)
    }

    fn validate_value(&self) -> Result<()> {
        if self.base.flags.contains(ChoiceFieldFlags::COMBO) {
            return Err(Error::invalid_document(format!(
                "list box '{}' carries the combo flag",
                self.base.name
            )));
        }
        if self.values.len() > 1 && !self.is_multi_select() {
            return Err(Error::invalid_document(format!(
                "list box '{}' has {} selections without multi-select",
                self.base.name,
                self.values.len()
            )));
        }
        for value in &self.values {
            self.base.check_value(value, false)?;
        }
        if let Some(ti) = self.top_index {
            if ti as usize >= self.base.options.len() {
                return Err(Error::invalid_document(format!(
                    "list box '{}' top index {} is past its options",
                    self.base.name, ti
                )));
            }
        }
        validate_style(&self.base.name, &self.base.style)
    }
}
