//! Stream compression for PDF content payloads.
//!
//! Streams written by this crate use the FlateDecode filter (zlib framing
//! around a deflate stream). This module provides:
//! - [`compress`] / [`decompress`]: the codec itself
//! - [`estimate_ratio`]: measured compressibility of a payload
//! - [`should_compress`]: cheap size-based recommendation
//!
//! Decompression is bounded by [`MAX_DECOMPRESSED_SIZE`] to reject
//! decompression bombs; the compressed size alone says nothing about how large
//! the output can grow.

use crate::error::{Error, Result};

mod flate;

pub use flate::{compress, compress_raw, decompress, decompress_with_limit};

/// Hard ceiling on decompressed output (100 MiB).
pub const MAX_DECOMPRESSED_SIZE: usize = 100 * 1024 * 1024;

/// Payloads shorter than this are not worth the filter overhead.
pub const COMPRESSION_THRESHOLD: usize = 50;

/// A validated flate compression level.
///
/// Valid levels are `-1` (codec default) and `0..=9`. The named constants cover
/// the common choices; [`CompressionLevel::new`] accepts any valid integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(i8);

impl CompressionLevel {
    /// No compression: deflate "stored" blocks.
    pub const STORE: Self = Self(0);
    /// Fastest compression.
    pub const FASTEST: Self = Self(1);
    /// The codec's default trade-off (level 6).
    pub const DEFAULT: Self = Self(-1);
    /// Best compression.
    pub const MAXIMUM: Self = Self(9);

    /// Validate an integer level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`] for anything outside `-1..=9`.
    pub fn new(level: i32) -> Result<Self> {
        if (-1..=9).contains(&level) {
            Ok(Self(level as i8))
        } else {
            Err(Error::InvalidCompressionLevel(level))
        }
    }

    /// Raw integer value (`-1` for the default level).
    pub fn value(self) -> i32 {
        self.0 as i32
    }

    pub(crate) fn to_flate2(self) -> flate2::Compression {
        if self.0 < 0 {
            flate2::Compression::default()
        } else {
            flate2::Compression::new(self.0 as u32)
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = Error;

    fn try_from(level: i32) -> Result<Self> {
        Self::new(level)
    }
}

/// Compressed size divided by original size, measured at the default level.
///
/// Returns 1.0 ("no benefit") for empty input or when compression fails.
pub fn estimate_ratio(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 1.0;
    }
    match compress(data, CompressionLevel::DEFAULT) {
        Ok(compressed) => compressed.len() as f64 / data.len() as f64,
        Err(e) => {
            log::debug!("Ratio estimate failed, assuming no benefit: {}", e);
            1.0
        },
    }
}

/// Size heuristic: compress once the payload reaches [`COMPRESSION_THRESHOLD`] bytes.
///
/// Callers that need a precise answer should use [`estimate_ratio`].
pub fn should_compress(data: &[u8]) -> bool {
    data.len() >= COMPRESSION_THRESHOLD
}
