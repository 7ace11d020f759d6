//! Pixmap parsing for the plain (`P3`) and raw (`P6`) variants.
//!
//! The header grammar is shared by both variants: a two-character format
//! tag, then width, height, and max-channel-value tokens, each of which may
//! be preceded by whitespace and `#` full-line comments. Plain pixel data
//! is ASCII decimal triplets; raw pixel data is one byte per channel,
//! starting immediately after the single whitespace byte that terminates
//! the header.

use std::fs;
use std::path::Path;

use log::debug;

use super::types::{DecodeError, PixmapFormat, PixmapHeader, MIN_IMAGE_SIZE};
use crate::buffer::{PixelBuffer, CHANNELS};

/// Read and decode a pixmap file.
///
/// The entire file is materialized in memory before parsing; there is no
/// streaming path.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be opened or read, or any
/// of the parse errors described on [`decode_pixmap`].
pub fn load_pixmap(path: impl AsRef<Path>) -> Result<PixelBuffer, DecodeError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_pixmap(&bytes)
}

/// Decode a pixmap from raw file bytes.
///
/// # Errors
///
/// * `UnrecognizedFormat` - the leading tag is not `P3` or `P6`
/// * `MalformedHeader` - a width/height/max-value token is missing or not
///   a non-negative integer, or the max value is zero
/// * `TooSmall` - the declared dimensions are under 400x400
/// * `MalformedPixels` - a plain-variant pixel has fewer than 3 samples
/// * `Truncated` - a raw-variant stream holds fewer than
///   `width * height * 3` data bytes
/// * `Alloc` - the pixel buffer cannot be allocated
pub fn decode_pixmap(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    let header = parse_header(&mut cursor)?;

    if header.width < MIN_IMAGE_SIZE || header.height < MIN_IMAGE_SIZE {
        return Err(DecodeError::TooSmall {
            width: header.width,
            height: header.height,
        });
    }

    let mut buffer = PixelBuffer::new(header.width, header.height)?;
    match header.format {
        PixmapFormat::Plain => decode_plain(&mut cursor, &mut buffer, header.max_value)?,
        PixmapFormat::Raw => decode_raw(&mut cursor, &mut buffer)?,
    }

    debug!(
        "decoded {}x{} {} pixmap (max value {})",
        header.width,
        header.height,
        header.format.tag(),
        header.max_value
    );
    Ok(buffer)
}

/// Parse the format tag and the three header tokens.
fn parse_header(cursor: &mut Cursor<'_>) -> Result<PixmapHeader, DecodeError> {
    let tag = cursor.take(2).ok_or(DecodeError::UnrecognizedFormat)?;
    let format = PixmapFormat::from_tag(tag).ok_or(DecodeError::UnrecognizedFormat)?;

    let width = header_token(cursor, "width")?;
    let height = header_token(cursor, "height")?;
    let max_value = header_token(cursor, "max channel value")?;
    if max_value == 0 {
        return Err(DecodeError::MalformedHeader(
            "max channel value must be positive".to_string(),
        ));
    }

    Ok(PixmapHeader {
        format,
        width,
        height,
        max_value,
    })
}

fn header_token(cursor: &mut Cursor<'_>, name: &str) -> Result<u32, DecodeError> {
    cursor
        .read_uint()
        .ok_or_else(|| DecodeError::MalformedHeader(format!("missing or non-numeric {name}")))
}

/// Read ASCII triplets, rescaling each sample into the 0-255 range.
fn decode_plain(
    cursor: &mut Cursor<'_>,
    buffer: &mut PixelBuffer,
    max_value: u32,
) -> Result<(), DecodeError> {
    let count = buffer.pixel_count();
    let pixels = buffer.pixels_mut();

    for i in 0..count {
        for channel in 0..CHANNELS {
            let raw = cursor.read_uint().ok_or_else(|| {
                DecodeError::MalformedPixels(format!("expected 3 integer samples for pixel {i}"))
            })?;
            pixels[i * CHANNELS + channel] = rescale(raw, max_value);
        }
    }
    Ok(())
}

/// Copy the raw byte stream that follows the header terminator.
fn decode_raw(cursor: &mut Cursor<'_>, buffer: &mut PixelBuffer) -> Result<(), DecodeError> {
    cursor.expect_header_terminator()?;

    let expected = buffer.byte_size();
    let rest = cursor.remaining();
    if rest.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            actual: rest.len(),
        });
    }

    // Raw-variant data is assumed to already use the 255 ceiling.
    buffer.pixels_mut().copy_from_slice(&rest[..expected]);
    Ok(())
}

/// Rescale a plain-variant sample from `0..=max_value` to `0..=255`,
/// rounding to nearest and clamping samples that exceed the declared max.
#[inline]
fn rescale(raw: u32, max_value: u32) -> u8 {
    if max_value == 255 {
        return raw.min(255) as u8;
    }
    let scaled = (255 * raw as u64 + max_value as u64 / 2) / max_value as u64;
    scaled.min(255) as u8
}

/// Byte-slice reader with the whitespace/comment handling the header
/// grammar needs.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Consume exactly `n` bytes, or `None` if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// Everything after the current position.
    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Skip whitespace runs and `#` comments that run to end of line.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Read the next unsigned decimal token.
    ///
    /// Returns `None` at end of input, when the next non-skipped byte is
    /// not a digit, or when the token overflows `u32`.
    fn read_uint(&mut self) -> Option<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)?
                .checked_add(u32::from(b - b'0'))?;
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(value)
        }
    }

    /// Consume the single whitespace byte separating the raw-variant
    /// header from its pixel data.
    fn expect_header_terminator(&mut self) -> Result<(), DecodeError> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(DecodeError::MalformedHeader(
                "missing whitespace after max channel value".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a plain-variant file with every pixel set to the same triplet.
    fn plain_fixture(width: u32, height: u32, rgb: (u32, u32, u32), max_value: u32) -> Vec<u8> {
        let mut out = format!("P3\n{width} {height}\n{max_value}\n").into_bytes();
        let triplet = format!("{} {} {}\n", rgb.0, rgb.1, rgb.2);
        for _ in 0..width * height {
            out.extend_from_slice(triplet.as_bytes());
        }
        out
    }

    /// Build a raw-variant file with every channel byte set to `fill`.
    fn raw_fixture(width: u32, height: u32, fill: u8) -> Vec<u8> {
        let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
        out.extend(std::iter::repeat(fill).take((width * height * 3) as usize));
        out
    }

    #[test]
    fn test_decode_raw_basic() {
        let buf = decode_pixmap(&raw_fixture(400, 400, 7)).unwrap();
        assert_eq!(buf.width(), 400);
        assert_eq!(buf.height(), 400);
        assert_eq!(buf.pixel(0, 0), [7, 7, 7]);
        assert_eq!(buf.pixel(399, 399), [7, 7, 7]);
    }

    #[test]
    fn test_decode_plain_rescales_to_ceiling() {
        // max value 100 with samples at 100 must decode to a full 255
        let buf = decode_pixmap(&plain_fixture(400, 400, (100, 100, 100), 100)).unwrap();
        assert!(buf.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_decode_plain_rounds_rescaled_samples() {
        // 255 * 50 / 100 = 127.5, rounds to 128
        let buf = decode_pixmap(&plain_fixture(400, 400, (50, 50, 50), 100)).unwrap();
        assert_eq!(buf.pixel(17, 200), [128, 128, 128]);
    }

    #[test]
    fn test_decode_plain_clamps_samples_above_max() {
        let buf = decode_pixmap(&plain_fixture(400, 400, (200, 0, 0), 100)).unwrap();
        assert_eq!(buf.pixel(0, 0), [255, 0, 0]);
    }

    #[test]
    fn test_decode_plain_max_255_is_identity() {
        let buf = decode_pixmap(&plain_fixture(400, 400, (12, 34, 56), 255)).unwrap();
        assert_eq!(buf.pixel(100, 100), [12, 34, 56]);
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let mut bytes = plain_fixture(400, 400, (0, 0, 0), 255);
        bytes[1] = b'1'; // P1 is a bitmap tag, not a pixmap
        let result = decode_pixmap(&bytes);
        assert!(matches!(result, Err(DecodeError::UnrecognizedFormat)));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(
            decode_pixmap(b""),
            Err(DecodeError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_decode_rejects_undersized_width() {
        let result = decode_pixmap(&raw_fixture(399, 400, 0));
        assert!(matches!(
            result,
            Err(DecodeError::TooSmall {
                width: 399,
                height: 400
            })
        ));
    }

    #[test]
    fn test_decode_rejects_undersized_height() {
        let result = decode_pixmap(&raw_fixture(400, 399, 0));
        assert!(matches!(
            result,
            Err(DecodeError::TooSmall {
                width: 400,
                height: 399
            })
        ));
    }

    #[test]
    fn test_decode_rejects_missing_header_token() {
        let result = decode_pixmap(b"P6\n400\n");
        assert!(matches!(result, Err(DecodeError::MalformedHeader(_))));
    }

    #[test]
    fn test_decode_rejects_non_numeric_header_token() {
        let result = decode_pixmap(b"P6\n400 abc\n255\n");
        assert!(matches!(result, Err(DecodeError::MalformedHeader(_))));
    }

    #[test]
    fn test_decode_rejects_zero_max_value() {
        let result = decode_pixmap(b"P3\n400 400\n0\n");
        assert!(matches!(result, Err(DecodeError::MalformedHeader(_))));
    }

    #[test]
    fn test_decode_skips_header_comments() {
        let mut bytes = b"P3\n# created by tintlab\n400 # width\n400\n# ceiling\n255\n".to_vec();
        for _ in 0..400u32 * 400 {
            bytes.extend_from_slice(b"1 2 3\n");
        }
        let buf = decode_pixmap(&bytes).unwrap();
        assert_eq!(buf.width(), 400);
        assert_eq!(buf.height(), 400);
        assert_eq!(buf.pixel(0, 0), [1, 2, 3]);
    }

    #[test]
    fn test_decode_truncated_raw_never_yields_buffer() {
        let mut bytes = raw_fixture(400, 400, 9);
        bytes.truncate(bytes.len() - 1);
        let result = decode_pixmap(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated {
                expected: 480_000,
                actual: 479_999
            })
        ));
    }

    #[test]
    fn test_decode_plain_missing_samples() {
        let mut bytes = plain_fixture(400, 400, (5, 5, 5), 255);
        // Drop the trailing "5\n" of the final triplet
        bytes.truncate(bytes.len() - 2);
        let result = decode_pixmap(&bytes);
        assert!(matches!(result, Err(DecodeError::MalformedPixels(_))));
    }

    #[test]
    fn test_decode_raw_requires_header_terminator() {
        // EOF right after the max value
        let result = decode_pixmap(b"P6\n400 400\n255");
        assert!(matches!(result, Err(DecodeError::MalformedHeader(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_pixmap("/nonexistent/tintlab/input.ppm");
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_rescale_rounds_to_nearest() {
        assert_eq!(rescale(0, 100), 0);
        assert_eq!(rescale(50, 100), 128);
        assert_eq!(rescale(100, 100), 255);
        assert_eq!(rescale(1, 3), 85);
    }
}
