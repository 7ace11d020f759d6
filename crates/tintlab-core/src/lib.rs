//! Tintlab Core - Pixmap processing library
//!
//! This crate provides the core image processing functionality for
//! Tintlab: decoding the plain (`P3`) and raw (`P6`) pixmap variants,
//! applying pixel filters and a quarter-turn rotation, and encoding the
//! result back to the raw variant.
//!
//! The pipeline is `path -> decode -> PixelBuffer -> filter -> encode ->
//! path`. Decoding and encoding are sequential I/O steps; the filters in
//! between run data-parallel over the buffer via rayon. Front ends (the
//! interactive CLI, a comparison viewer) stay outside this crate and call
//! in with a file path and an [`Operation`] selector.

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod transform;

pub use buffer::{AllocError, PixelBuffer};
pub use decode::{decode_pixmap, load_pixmap, DecodeError};
pub use encode::{encode_pixmap, save_pixmap, EncodeError};
pub use transform::Operation;
