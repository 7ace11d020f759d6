//! Pixmap decoding pipeline for Tintlab.
//!
//! This module provides functionality for:
//! - Parsing the pixmap header (format tag, dimensions, channel ceiling)
//! - Decoding the plain ASCII variant with channel rescaling
//! - Decoding the raw binary variant
//!
//! # Architecture
//!
//! Decoding is strictly sequential and single-threaded; parallelism only
//! enters once a [`crate::buffer::PixelBuffer`] is handed to the filters.
//! The whole file is read into memory first - there is no streaming or
//! partial decode.
//!
//! # Examples
//!
//! ```ignore
//! use tintlab_core::decode::load_pixmap;
//!
//! let image = load_pixmap("photo.ppm")?;
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod pixmap;
mod types;

pub use pixmap::{decode_pixmap, load_pixmap};
pub use types::{DecodeError, PixmapFormat, PixmapHeader, MIN_IMAGE_SIZE};
