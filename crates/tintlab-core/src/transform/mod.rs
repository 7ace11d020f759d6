//! Pixel filters and geometric transforms.
//!
//! Every operation is data-parallel over independent pixels or rows: no
//! filter reads one pixel while writing another, so the only
//! synchronization is the implicit join at the end of each rayon pass.
//! The in-place filters mutate the buffer they are given; rotation
//! consumes its input and returns a new buffer with swapped dimensions.
//!
//! # Filters
//!
//! - [`apply_grayscale`] - BT.601 luminance, broadcast to all channels
//! - [`apply_negative`] - channel inversion, involutive
//! - [`apply_xray`] - grayscale plus a brightness power curve
//! - [`rotate90`] - quarter-turn into a new buffer
//! - [`apply_aged`] - warm sepia tint with blue falloff

mod aged;
mod grayscale;
mod negative;
mod rotate;
mod xray;

pub use aged::apply_aged;
pub use grayscale::apply_grayscale;
pub use negative::apply_negative;
pub use rotate::rotate90;
pub use xray::apply_xray;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::{AllocError, PixelBuffer};

/// Selector for a single filter operation.
///
/// This is the value an orchestrating caller passes in to pick a
/// transform; [`Operation::apply`] gives every filter, including the
/// shape-changing rotation, one uniform buffer-in/buffer-out entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Reduce every pixel to its luminance.
    Grayscale,
    /// Invert every channel.
    Negative,
    /// Grayscale with a brightness power curve.
    Xray,
    /// Quarter-turn rotation into a new buffer.
    Rotate90,
    /// Warm sepia tint.
    Aged,
}

impl Operation {
    /// Short human-readable name, used for logging and output naming.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Negative => "negative",
            Operation::Xray => "xray",
            Operation::Rotate90 => "rotated",
            Operation::Aged => "aged",
        }
    }

    /// Apply this operation to a buffer.
    ///
    /// The input buffer is consumed; the returned buffer is the same
    /// allocation for the in-place filters and a new one for
    /// [`Operation::Rotate90`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if a rotation cannot allocate its
    /// destination buffer.
    pub fn apply(self, mut buffer: PixelBuffer) -> Result<PixelBuffer, AllocError> {
        debug!("applying {} filter", self.label());
        match self {
            Operation::Grayscale => {
                apply_grayscale(&mut buffer);
                Ok(buffer)
            }
            Operation::Negative => {
                apply_negative(&mut buffer);
                Ok(buffer)
            }
            Operation::Xray => {
                apply_xray(&mut buffer);
                Ok(buffer)
            }
            Operation::Rotate90 => rotate90(buffer),
            Operation::Aged => {
                apply_aged(&mut buffer);
                Ok(buffer)
            }
        }
    }
}
