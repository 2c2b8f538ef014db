//! Mask-complement recoloring.
//!
//! Every color selection re-renders the full image from the untouched
//! source buffer: pixels outside the cached wall mask take the chosen
//! color, masked pixels pass through unchanged. The pass is a pure
//! function of its inputs - applying it twice with the same mask and
//! color equals applying it once.

use rayon::prelude::*;

use crate::color::Rgb;
use crate::error::{Result, WallpaintError};
use crate::pixel::PixelBuffer;

/// Recolor every pixel outside the mask.
///
/// Pixels where `mask != 255` get `color`'s R,G,B; their alpha byte is
/// left as decoded. Masked pixels are copied through untouched. Rows are
/// processed in parallel; the output is deterministic since each row
/// depends only on its own input.
///
/// # Arguments
/// * `image` - 4-channel source buffer
/// * `mask` - single-channel `{0, 255}` mask of identical dimensions
/// * `color` - replacement color for unmasked pixels
///
/// # Returns
/// A new buffer; the inputs are not mutated
pub fn recolor_outside_mask(
    image: &PixelBuffer,
    mask: &PixelBuffer,
    color: Rgb,
) -> Result<PixelBuffer> {
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(WallpaintError::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }
    if image.channels() != 4 || mask.channels() != 1 {
        return Err(WallpaintError::InvalidInput(format!(
            "recolor needs a 4-channel image and a 1-channel mask, got {} and {}",
            image.channels(),
            mask.channels()
        )));
    }

    let width = image.width() as usize;
    let mut output = image.clone();

    output
        .data_mut()
        .par_chunks_exact_mut(width * 4)
        .zip(mask.data().par_chunks_exact(width))
        .for_each(|(row, mask_row)| {
            for (pixel, &m) in row.chunks_exact_mut(4).zip(mask_row) {
                if m != 255 {
                    pixel[0] = color.r;
                    pixel[1] = color.g;
                    pixel[2] = color.b;
                }
            }
        });

    Ok(output)
}
