//! Quarter-turn rotation.
//!
//! Rotation is the one filter that changes the buffer's shape, so it
//! consumes its input and returns a freshly allocated `height x width`
//! buffer. Callers must use only the returned buffer afterwards; the move
//! makes holding on to the old one a compile error.

use rayon::prelude::*;

use crate::buffer::{AllocError, PixelBuffer, CHANNELS};

/// Rotate an image 90 degrees counterclockwise into a new buffer.
///
/// The pixel at source row `i`, column `j` lands at destination row `j`,
/// column `height - i - 1`. Applying the rotation four times restores the
/// original image exactly.
///
/// # Errors
///
/// Returns [`AllocError`] if the destination buffer cannot be allocated.
/// The source buffer is released either way.
pub fn rotate90(image: PixelBuffer) -> Result<PixelBuffer, AllocError> {
    let width = image.width();
    let height = image.height();
    let mut rotated = PixelBuffer::new(height, width)?;
    if image.is_empty() {
        return Ok(rotated);
    }

    let src = image.pixels();
    let src_stride = image.row_stride();
    let dst_stride = rotated.row_stride();
    let rows = height as usize;

    // Destination row j collects source column j, bottom of the column
    // first. Each destination row is written by exactly one worker.
    rotated
        .pixels_mut()
        .par_chunks_exact_mut(dst_stride)
        .enumerate()
        .for_each(|(j, dst_row)| {
            for i in 0..rows {
                let s = i * src_stride + j * CHANNELS;
                let d = (rows - 1 - i) * CHANNELS;
                dst_row[d..d + CHANNELS].copy_from_slice(&src[s..s + CHANNELS]);
            }
        });

    Ok(rotated)
}
