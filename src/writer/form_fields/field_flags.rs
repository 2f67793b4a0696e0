//! Field flags (`/Ff`), ISO 32000-1:2008 Section 12.7.3.
//!
//! Each field type gets its own set. Bits 1-3 (read-only, required,
//! no-export) are repeated in every set so one value fills `/Ff`.

use bitflags::bitflags;

bitflags! {
    /// Flags for text fields (`/FT /Tx`), Table 228.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextFieldFlags: u32 {
        /// Bit 1
        const READ_ONLY = 1 << 0;
        /// Bit 2
        const REQUIRED = 1 << 1;
        /// Bit 3
        const NO_EXPORT = 1 << 2;
        /// Bit 13: wrap and accept line breaks
        const MULTILINE = 1 << 12;
        /// Bit 14: mask input
        const PASSWORD = 1 << 13;
        /// Bit 23
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 24
        const DO_NOT_SCROLL = 1 << 23;
        /// Bit 25: one character per cell; needs `/MaxLen`
        const COMB = 1 << 24;
    }
}

bitflags! {
    /// Flags for checkboxes (`/FT /Btn`), Table 226.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonFieldFlags: u32 {
        /// Bit 1
        const READ_ONLY = 1 << 0;
        /// Bit 2
        const REQUIRED = 1 << 1;
        /// Bit 3
        const NO_EXPORT = 1 << 2;
    }
}

bitflags! {
    /// Flags for choice fields (`/FT /Ch`), Table 230.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChoiceFieldFlags: u32 {
        /// Bit 1
        const READ_ONLY = 1 << 0;
        /// Bit 2
        const REQUIRED = 1 << 1;
        /// Bit 3
        const NO_EXPORT = 1 << 2;
        /// Bit 18: drop-down instead of a list
        const COMBO = 1 << 17;
        /// Bit 19: combo box accepts free text
        const EDIT = 1 << 18;
        /// Bit 20
        const SORT = 1 << 19;
        /// Bit 22: list box allows several selections
        const MULTI_SELECT = 1 << 21;
        /// Bit 23
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 27: commit on every selection change
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

/// Quadding (`/Q`) of variable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// 0
    #[default]
    Left,
    /// 1
    Center,
    /// 2
    Right,
}

impl TextAlignment {
    /// Integer written to `/Q`.
    pub fn q_value(&self) -> i64 {
        *self as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions() {
        assert_eq!(TextFieldFlags::MULTILINE.bits(), 4096);
        assert_eq!(TextFieldFlags::COMB.bits(), 1 << 24);
        assert_eq!(ChoiceFieldFlags::COMBO.bits(), 131_072);
        assert_eq!(ChoiceFieldFlags::MULTI_SELECT.bits(), 2_097_152);
        assert_eq!(ButtonFieldFlags::REQUIRED.bits(), 2);
    }

    #[test]
    fn test_defaults_are_empty() {
        assert!(TextFieldFlags::default().is_empty());
        assert!(ButtonFieldFlags::default().is_empty());
        assert!(ChoiceFieldFlags::default().is_empty());
    }

    #[test]
    fn test_alignment() {
        assert_eq!(TextAlignment::default().q_value(), 0);
        assert_eq!(TextAlignment::Center.q_value(), 1);
        assert_eq!(TextAlignment::Right.q_value(), 2);
    }
}
