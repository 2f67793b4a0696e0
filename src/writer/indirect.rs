//! Indirect object framing.
//!
//! Format: `{number} {generation} obj\n{data}[\n]endobj\n`

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use std::io::Write;

/// An object number, generation and serialized body, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndirectObject {
    number: u32,
    generation: u16,
    data: Vec<u8>,
}

impl IndirectObject {
    /// Create an indirect object.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidObjectNumber`] when `number` is 0.
    pub fn new(number: u32, generation: u16, data: impl Into<Vec<u8>>) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidObjectNumber(number));
        }
        Ok(Self {
            number,
            generation,
            data: data.into(),
        })
    }

    /// Object number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Generation number.
    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// Serialized body, without framing.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reference to this object.
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.number, self.generation)
    }

    fn header(&self) -> String {
        format!("{} {} obj\n", self.number, self.generation)
    }

    fn needs_newline(&self) -> bool {
        self.data.last() != Some(&b'\n')
    }

    /// Write the framed object and return the exact number of bytes written.
    pub fn serialize<W: Write>(&self, w: &mut W) -> std::io::Result<usize> {
        let header = self.header();
        w.write_all(header.as_bytes())?;
        w.write_all(&self.data)?;
        let mut written = header.len() + self.data.len();
        if self.needs_newline() {
            w.write_all(b"\n")?;
            written += 1;
        }
        w.write_all(b"endobj\n")?;
        Ok(written + b"endobj\n".len())
    }

    /// Byte length [`serialize`](Self::serialize) would report.
    pub fn serialized_len(&self) -> usize {
        self.header().len() + self.data.len() + usize::from(self.needs_newline()) + 7
    }
}
