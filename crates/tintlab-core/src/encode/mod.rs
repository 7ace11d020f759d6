//! Pixmap encoding pipeline for Tintlab.
//!
//! This module provides functionality for:
//! - Encoding a pixel buffer to the raw binary pixmap variant
//! - Writing the encoded bytes to disk in a single operation
//!
//! # Examples
//!
//! ```ignore
//! use tintlab_core::encode::save_pixmap;
//!
//! save_pixmap("outputs/negative_image.ppm", &image)?;
//! ```

mod pixmap;

pub use pixmap::{encode_pixmap, save_pixmap, EncodeError};
