//! FlateDecode (zlib/deflate) implementation.
//!
//! Uses the flate2 crate. Decompression drives the raw inflater in a loop so
//! the output ceiling is enforced while the stream is still being expanded.

use super::{CompressionLevel, MAX_DECOMPRESSED_SIZE};
use crate::error::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

/// Output growth step for the inflater loop.
const CHUNK_SIZE: usize = 64 * 1024;

/// Compress `data` with zlib framing at `level`.
///
/// Empty input yields empty output without emitting a zlib header.
pub fn compress(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), level.to_flate2());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    log::debug!(
        "FlateDecode: compressed {} -> {} bytes (level {})",
        data.len(),
        compressed.len(),
        level.value()
    );
    Ok(compressed)
}

/// Compress with an integer level, validating it first.
///
/// # Errors
///
/// [`Error::InvalidCompressionLevel`] for levels outside `-1..=9`, checked
/// before any work is done (even for empty input).
pub fn compress_raw(data: &[u8], level: i32) -> Result<Vec<u8>> {
    let level = CompressionLevel::new(level)?;
    compress(data, level)
}

/// Decompress a zlib stream, bounded by [`MAX_DECOMPRESSED_SIZE`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, MAX_DECOMPRESSED_SIZE)
}

/// Decompress a zlib stream, failing once the output would exceed `limit` bytes.
///
/// Pass `usize::MAX` for no ceiling.
///
/// # Errors
///
/// - [`Error::DecompressedSizeExceeded`] when the output grows past `limit`
/// - [`Error::CorruptStream`] for malformed input, a bad checksum or a
///   stream that ends before its final block
pub fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut inflater = Decompress::new(true);
    let mut output: Vec<u8> = Vec::new();

    loop {
        // Never hold more than limit + 1 bytes: one byte past the limit is enough to reject.
        if output.capacity() == output.len() {
            let room = limit.saturating_add(1).saturating_sub(output.len());
            let step = output.len().max(CHUNK_SIZE).min(room);
            output.reserve_exact(step);
        }

        let in_before = inflater.total_in() as usize;
        let out_before = inflater.total_out();

        let status = inflater
            .decompress_vec(&data[in_before..], &mut output, FlushDecompress::None)
            .map_err(|e| Error::CorruptStream(e.to_string()))?;

        if output.len() > limit {
            log::warn!(
                "FlateDecode: output exceeded {} byte limit after {} input bytes",
                limit,
                inflater.total_in()
            );
            return Err(Error::DecompressedSizeExceeded { limit });
        }

        match status {
            Status::StreamEnd => {
                log::debug!("FlateDecode: decompressed {} -> {} bytes", data.len(), output.len());
                return Ok(output);
            },
            Status::Ok | Status::BufError => {
                let progressed = inflater.total_in() as usize != in_before
                    || inflater.total_out() != out_before;
                if !progressed && output.len() < output.capacity() {
                    return Err(Error::CorruptStream(format!(
                        "stream truncated after {} of {} input bytes",
                        inflater.total_in(),
                        data.len()
                    )));
                }
            },
        }
    }
}
