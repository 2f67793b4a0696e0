//! AcroForm builder for interactive PDF forms.
//!
//! Implements the document-level AcroForm dictionary per ISO 32000-1:2008 Section 12.7.2.
//!
//! The AcroForm dictionary is referenced from the document catalog and contains:
//! - References to all form fields
//! - Default resources (fonts named by field `/DA` strings)
//! - Default appearance string
//!
//! # Example
//!
//! ```
//! use pdf_forge::object::ObjectRef;
//! use pdf_forge::writer::AcroFormBuilder;
//!
//! let mut acroform = AcroFormBuilder::new();
//! acroform.add_field(ObjectRef::new(5, 0));
//! let dict = acroform.build();
//! assert!(dict.contains_key("DR"));
//! ```

use super::object_serializer::ObjectSerializer;
use crate::object::{Dict, Object, ObjectRef};

/// Builder for the document-level AcroForm dictionary.
#[derive(Debug, Clone)]
pub struct AcroFormBuilder {
    /// Field object references
    fields: Vec<ObjectRef>,
    /// Whether to regenerate appearances
    need_appearances: bool,
    /// Default appearance string
    default_appearance: Option<String>,
}

impl Default for AcroFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AcroFormBuilder {
    /// Create a new AcroForm builder.
    ///
    /// Widgets are written without appearance streams, so viewers are asked
    /// to generate them (`/NeedAppearances true`).
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            need_appearances: true,
            default_appearance: Some("/Helv 0 Tf 0 g".to_string()),
        }
    }

    /// Add a field reference.
    pub fn add_field(&mut self, field_ref: ObjectRef) {
        self.fields.push(field_ref);
    }

    /// Add multiple field references.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = ObjectRef>) {
        self.fields.extend(fields);
    }

    /// Set the NeedAppearances flag explicitly.
    pub fn with_need_appearances(mut self, need: bool) -> Self {
        self.need_appearances = need;
        self
    }

    /// Set the default appearance string.
    ///
    /// Format: "/FontName size Tf r g b rg" (e.g., "/Helv 12 Tf 0 g")
    pub fn with_default_appearance(mut self, da: impl Into<String>) -> Self {
        self.default_appearance = Some(da.into());
        self
    }

    /// Check if this form has any fields.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Build the AcroForm dictionary with embedded default resources.
    pub fn build(&self) -> Dict {
        let mut dict = Dict::new();

        let fields = self.fields.iter().map(|r| Object::Reference(*r)).collect();
        dict.insert("Fields".to_string(), Object::Array(fields));

        if self.need_appearances {
            dict.insert("NeedAppearances".to_string(), Object::Boolean(true));
        }
        if let Some(ref da) = self.default_appearance {
            dict.insert("DA".to_string(), ObjectSerializer::string(da));
        }
        dict.insert("DR".to_string(), Object::Dictionary(Self::default_resources()));
        dict
    }

    /// Default resources (`/DR`): Helvetica as `Helv` for text and ZapfDingbats
    /// as `ZaDb` for check marks.
    pub fn default_resources() -> Dict {
        let mut fonts = Dict::new();
        fonts.insert("Helv".to_string(), standard_font("Helvetica", true));
        fonts.insert("ZaDb".to_string(), standard_font("ZapfDingbats", false));

        let mut dr = Dict::new();
        dr.insert("Font".to_string(), Object::Dictionary(fonts));
        dr
    }
}

/// Inline Type1 font dictionary; symbolic fonts keep their built-in encoding.
fn standard_font(base_font: &str, win_ansi: bool) -> Object {
    let mut font = Dict::new();
    font.insert("Type".to_string(), Object::Name("Font".to_string()));
    font.insert("Subtype".to_string(), Object::Name("Type1".to_string()));
    font.insert("BaseFont".to_string(), Object::Name(base_font.to_string()));
    if win_ansi {
        font.insert("Encoding".to_string(), Object::Name("WinAnsiEncoding".to_string()));
    }
    Object::Dictionary(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acroform_new() {
        let acroform = AcroFormBuilder::new();

        assert!(!acroform.has_fields());
        assert!(acroform.need_appearances);
        assert_eq!(acroform.default_appearance.as_deref(), Some("/Helv 0 Tf 0 g"));
    }

    #[test]
    fn test_acroform_add_fields() {
        let mut acroform = AcroFormBuilder::new();
        acroform.add_field(ObjectRef::new(5, 0));
        acroform.add_fields([ObjectRef::new(6, 0), ObjectRef::new(9, 0)]);

        assert_eq!(acroform.field_count(), 3);
        assert!(acroform.has_fields());
    }

    #[test]
    fn test_acroform_build() {
        let mut acroform = AcroFormBuilder::new();
        acroform.add_field(ObjectRef::new(10, 0));

        let out = ObjectSerializer::compact().serialize_to_string(&Object::Dictionary(acroform.build()));
        assert_eq!(
            out,
            "<< /Fields [10 0 R] /NeedAppearances true /DA (/Helv 0 Tf 0 g) \
             /DR << /Font << /Helv << /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >> /ZaDb << /Type /Font /Subtype /Type1 \
             /BaseFont /ZapfDingbats >> >> >> >>"
        );
    }

    #[test]
    fn test_need_appearances_can_be_cleared() {
        let dict = AcroFormBuilder::new().with_need_appearances(false).build();
        assert!(!dict.contains_key("NeedAppearances"));
    }
}
