//! Pixmap encoding to the raw binary variant.
//!
//! Output is always `P6` with a 255 channel ceiling, whatever variant the
//! buffer was decoded from. The header and pixel stream are assembled in
//! memory and written with a single call, so a failed save never leaves a
//! usable partial header behind.

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::decode::PixmapFormat;

/// Errors that can occur while saving a pixmap.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The destination could not be opened or written, e.g. because the
    /// containing directory does not exist. Directory creation is the
    /// caller's responsibility.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a buffer as raw-variant pixmap bytes.
///
/// The header is `P6\n<width> <height>\n255\n`, followed by the buffer's
/// row-major, channel-interleaved byte stream. Encoding is deterministic:
/// the same buffer always yields identical bytes.
pub fn encode_pixmap(buffer: &PixelBuffer) -> Vec<u8> {
    let header = format!(
        "{}\n{} {}\n255\n",
        PixmapFormat::Raw.tag(),
        buffer.width(),
        buffer.height()
    );

    let mut out = Vec::with_capacity(header.len() + buffer.byte_size());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(buffer.pixels());
    out
}

/// Encode a buffer and write it to `path`.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if the destination cannot be written. No
/// attempt is made to create missing directories.
pub fn save_pixmap(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_pixmap(buffer);
    fs::write(path, &bytes)?;
    debug!(
        "saved {}x{} pixmap to {} ({} bytes)",
        buffer.width(),
        buffer.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::decode_pixmap;
    use proptest::prelude::*;

    /// Build a 400x400 buffer from a handful of cheap pattern parameters,
    /// keeping case generation fast despite the minimum image size.
    fn patterned_buffer(seed: u8, step: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(400, 400).unwrap();
        for (i, byte) in buf.pixels_mut().iter_mut().enumerate() {
            *byte = seed.wrapping_add((i as u8).wrapping_mul(step));
        }
        buf
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Property: decoding encoded output restores the buffer exactly.
        #[test]
        fn prop_round_trip_restores_buffer(seed in any::<u8>(), step in any::<u8>()) {
            let buf = patterned_buffer(seed, step);
            let decoded = decode_pixmap(&encode_pixmap(&buf)).unwrap();
            prop_assert_eq!(decoded, buf);
        }

        /// Property: re-encoding decoded output is byte-identical.
        #[test]
        fn prop_encode_is_deterministic(seed in any::<u8>(), step in any::<u8>()) {
            let buf = patterned_buffer(seed, step);
            let first = encode_pixmap(&buf);
            let second = encode_pixmap(&decode_pixmap(&first).unwrap());
            prop_assert_eq!(first, second);
        }
    }
}
