//! Interactive form field widgets for PDF generation.
//!
//! Builders for interactive form fields per ISO 32000-1:2008 Section 12.7.
//! Every field is written as a single object that is both the field and its
//! widget annotation (a merged field/widget dictionary), so it appears in the
//! page's `/Annots` and in the AcroForm `/Fields` under the same number.
//!
//! # Supported Field Types
//!
//! - **Text Fields** (`TextFieldWidget`): Single-line and multiline text input
//! - **Checkboxes** (`CheckboxWidget`): Boolean on/off fields
//! - **Combo Boxes** (`ComboBoxWidget`): Dropdown selection lists
//! - **List Boxes** (`ListBoxWidget`): Scrollable selection lists
//!
//! # Example
//!
//! ```
//! use pdf_forge::writer::form_fields::{CheckboxWidget, FormField, TextFieldWidget};
//! use pdf_forge::geometry::Rect;
//!
//! let name: FormField = TextFieldWidget::new("name", Rect::new(72.0, 700.0, 200.0, 20.0))
//!     .with_value("John Doe")
//!     .required()
//!     .into();
//! let agree: FormField = CheckboxWidget::new("agree", Rect::new(72.0, 650.0, 15.0, 15.0))
//!     .checked()
//!     .into();
//! assert_eq!(name.name(), "name");
//! assert_eq!(agree.field_type(), "Btn");
//! ```

mod checkbox;
mod choice_fields;
mod field_flags;
mod text_field;

pub use checkbox::CheckboxWidget;
pub use choice_fields::{ChoiceOption, ComboBoxWidget, ListBoxWidget};
pub use field_flags::{ButtonFieldFlags, ChoiceFieldFlags, TextAlignment, TextFieldFlags};
pub use text_field::TextFieldWidget;

use super::annotation_builder::{insert_text, rect_object};
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// Common trait for all form field widgets.
pub trait FormFieldWidget {
    /// Get the field name (partial name for hierarchical fields).
    fn field_name(&self) -> &str;

    /// Get the bounding rectangle of the field's widget annotation.
    fn rect(&self) -> Rect;

    /// Get the field type name (Tx, Btn, Ch).
    fn field_type(&self) -> &'static str;

    /// Get the field flags value.
    fn field_flags(&self) -> u32;

    /// Field dictionary entries: `/FT /T /V /Ff` and type-specific keys.
    fn build_field_dict(&self) -> Dict;

    /// Widget annotation entries: `/Type /Subtype /Rect /P /F /MK`.
    fn build_widget_dict(&self, page_ref: ObjectRef) -> Dict;

    /// Type-specific checks beyond the shared name and rectangle ones.
    fn validate_value(&self) -> Result<()> {
        Ok(())
    }
}

/// Start a field dictionary with `/FT`, `/T` and, when non-zero, `/Ff`.
pub(crate) fn field_dict(field_type: &str, name: &str, flags: u32) -> Dict {
    let mut dict = Dict::new();
    dict.insert("FT".to_string(), Object::Name(field_type.to_string()));
    dict.insert("T".to_string(), ObjectSerializer::string(name));
    if flags != 0 {
        dict.insert("Ff".to_string(), Object::Integer(flags as i64));
    }
    dict
}

/// Default appearance string (`/DA`), e.g. `/Helv 12 Tf 0 0 0 rg`.
pub(crate) fn default_appearance(font_name: &str, font_size: f32, color: (f32, f32, f32)) -> Object {
    let (r, g, b) = color;
    ObjectSerializer::string(&format!("/{} {} Tf {} {} {} rg", font_name, font_size, r, g, b))
}

/// Border, background and tooltip shared by every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetStyle {
    /// Border color (RGB, 0.0-1.0)
    pub border_color: Option<(f32, f32, f32)>,
    /// Background color (RGB, 0.0-1.0)
    pub background_color: Option<(f32, f32, f32)>,
    /// Border width in points
    pub border_width: f32,
    /// Tooltip text (`/TU`)
    pub tooltip: Option<String>,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self {
            border_color: Some((0.0, 0.0, 0.0)),
            background_color: Some((1.0, 1.0, 1.0)),
            border_width: 1.0,
            tooltip: None,
        }
    }
}

impl WidgetStyle {
    /// Build the widget dictionary; `caption` becomes `/MK /CA`.
    pub(crate) fn widget_dict(&self, rect: &Rect, page: ObjectRef, caption: Option<&str>) -> Dict {
        let mut dict = Dict::new();
        dict.insert("Type".to_string(), Object::Name("Annot".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Widget".to_string()));
        dict.insert("Rect".to_string(), rect_object(rect));
        dict.insert("P".to_string(), Object::Reference(page));
        dict.insert("F".to_string(), Object::Integer(4));
        insert_text(&mut dict, "TU", self.tooltip.as_deref());

        if self.border_width > 0.0 {
            let mut bs = Dict::new();
            bs.insert("W".to_string(), Object::Real(self.border_width as f64));
            bs.insert("S".to_string(), Object::Name("S".to_string()));
            dict.insert("BS".to_string(), Object::Dictionary(bs));
        }

        let mut mk = Dict::new();
        if let Some((r, g, b)) = self.border_color {
            mk.insert("BC".to_string(), ObjectSerializer::color(&[r, g, b]));
        }
        if let Some((r, g, b)) = self.background_color {
            mk.insert("BG".to_string(), ObjectSerializer::color(&[r, g, b]));
        }
        if let Some(caption) = caption {
            mk.insert("CA".to_string(), ObjectSerializer::string(caption));
        }
        if !mk.is_empty() {
            dict.insert("MK".to_string(), Object::Dictionary(mk));
        }
        dict
    }

    fn is_valid(&self) -> bool {
        let in_range = |c: &(f32, f32, f32)| [c.0, c.1, c.2].iter().all(|v| (0.0..=1.0).contains(v));
        self.border_color.iter().chain(&self.background_color).all(in_range)
            && self.border_width.is_finite()
            && self.border_width >= 0.0
    }
}

/// A form field placed on a page.
#[derive(Debug, Clone)]
pub enum FormField {
    /// Text input
    Text(TextFieldWidget),
    /// Checkbox
    Checkbox(CheckboxWidget),
    /// Dropdown
    ComboBox(ComboBoxWidget),
    /// Scrollable list
    ListBox(ListBoxWidget),
}

impl FormField {
    fn widget(&self) -> &dyn FormFieldWidget {
        match self {
            FormField::Text(w) => w,
            FormField::Checkbox(w) => w,
            FormField::ComboBox(w) => w,
            FormField::ListBox(w) => w,
        }
    }

    /// Fully qualified field name (`/T`).
    pub fn name(&self) -> &str {
        self.widget().field_name()
    }

    /// Widget rectangle.
    pub fn rect(&self) -> Rect {
        self.widget().rect()
    }

    /// `Tx`, `Btn` or `Ch`.
    pub fn field_type(&self) -> &'static str {
        self.widget().field_type()
    }

    /// Check the name, rectangle and value.
    pub fn validate(&self) -> Result<()> {
        let widget = self.widget();
        if widget.field_name().is_empty() {
            return Err(Error::invalid_document("form field name is empty"));
        }
        if !widget.rect().has_area() {
            return Err(Error::invalid_document(format!(
                "form field '{}' rectangle has no area",
                widget.field_name()
            )));
        }
        widget.validate_value()
    }

    /// Merged field and widget dictionary for `page`.
    pub fn build(&self, page: ObjectRef) -> Dict {
        let widget = self.widget();
        let mut dict = widget.build_field_dict();
        dict.extend(widget.build_widget_dict(page));
        dict
    }
}

/// Reject a widget style with out-of-range colors or a negative border.
pub(crate) fn validate_style(name: &str, style: &WidgetStyle) -> Result<()> {
    if style.is_valid() {
        Ok(())
    } else {
        Err(Error::invalid_document(format!("form field '{}' has an invalid style", name)))
    }
}

impl From<TextFieldWidget> for FormField {
    fn from(w: TextFieldWidget) -> Self {
        FormField::Text(w)
    }
}

impl From<CheckboxWidget> for FormField {
    fn from(w: CheckboxWidget) -> Self {
        FormField::Checkbox(w)
    }
}

impl From<ComboBoxWidget> for FormField {
    fn from(w: ComboBoxWidget) -> Self {
        FormField::ComboBox(w)
    }
}

impl From<ListBoxWidget> for FormField {
    fn from(w: ListBoxWidget) -> Self {
        FormField::ListBox(w)
    }
}
