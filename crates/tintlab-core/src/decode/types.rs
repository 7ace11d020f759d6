//! Core types for pixmap decoding.

use crate::buffer::AllocError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted width and height in pixels.
///
/// The filters and the comparison display downstream assume a minimum
/// working resolution; smaller images are rejected outright rather than
/// padded or cropped.
pub const MIN_IMAGE_SIZE: u32 = 400;

/// Error types for pixmap decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The two-character format tag is not a recognized pixmap variant.
    #[error("unrecognized format tag: only P3 and P6 pixmaps are supported")]
    UnrecognizedFormat,

    /// A header token is missing or not a non-negative integer.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A plain-variant pixel is missing one or more channel samples.
    #[error("malformed pixel data: {0}")]
    MalformedPixels(String),

    /// The declared dimensions are below the minimum working resolution.
    #[error("image is {width}x{height}; at least 400x400 pixels are required")]
    TooSmall { width: u32, height: u32 },

    /// The raw-variant byte stream ends before the declared pixel count.
    #[error("truncated pixel data: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The pixel buffer could not be allocated.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// The two recognized pixmap encoding variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixmapFormat {
    /// `P3` - ASCII decimal channel triplets separated by whitespace.
    Plain,
    /// `P6` - raw binary channel triplets, one byte per channel.
    Raw,
}

impl PixmapFormat {
    /// Map a two-byte format tag to its variant.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"P3" => Some(PixmapFormat::Plain),
            b"P6" => Some(PixmapFormat::Raw),
            _ => None,
        }
    }

    /// The two-character tag written at the start of a file.
    pub fn tag(self) -> &'static str {
        match self {
            PixmapFormat::Plain => "P3",
            PixmapFormat::Raw => "P6",
        }
    }
}

/// Parsed header fields, transient to a single decode call.
///
/// `max_value` is only used to rescale plain-variant samples into the
/// canonical 0-255 range; it is not retained on the decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixmapHeader {
    /// Encoding variant declared by the format tag.
    pub format: PixmapFormat,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Declared channel ceiling of the input data.
    pub max_value: u32,
}
