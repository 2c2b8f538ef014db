//! Tolerance-based seed fill for the interactive paint tool.
//!
//! Each canvas click becomes one [`flood_fill`] pass over the currently
//! displayed buffer: every pixel reachable from the seed through
//! 4-connected neighbors whose color matches the seed's original color
//! within the tolerance is overwritten with the fill color.
//!
//! The traversal is an explicit stack, never recursion - a large uniform
//! region would otherwise exhaust the call stack. A visited bitmap bounds
//! the work to one commit per pixel, which also makes filling a region
//! with its own color a terminating no-op.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Result, WallpaintError};
use crate::pixel::PixelBuffer;

/// Default per-channel tolerance for pointer-driven fills.
pub const DEFAULT_TOLERANCE: u8 = 30;

/// One fill action, as delivered by the pointer event layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FillRequest {
    /// Click position, already clamped to buffer bounds by the caller.
    pub seed: (u32, u32),
    /// Fill color; its alpha is ignored and written as fully opaque.
    pub color: (u8, u8, u8, u8),
    /// Per-channel tolerance, 0-255.
    pub tolerance: u8,
}

impl FillRequest {
    pub fn new(seed: (u32, u32), color: Rgba) -> Self {
        Self {
            seed,
            color: (color.r, color.g, color.b, color.a),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Flood-fill a region of similar color starting at `seed`.
///
/// Matching compares all four channels against the seed's original color:
/// each absolute difference must be at most `tolerance`. Alpha counts, so
/// a transparent and an opaque pixel of equal RGB belong to different
/// regions.
///
/// # Arguments
/// * `buffer` - 4-channel source buffer, left untouched
/// * `seed` - starting coordinate; out of bounds fails with `OutOfBounds`
/// * `fill` - replacement color, written with alpha forced to 255
/// * `tolerance` - maximum per-channel difference from the seed color
///
/// # Returns
/// A new buffer with the 4-connected tolerance closure of the seed
/// recolored; all other pixels byte-identical to the input
pub fn flood_fill(
    buffer: &PixelBuffer,
    seed: (u32, u32),
    fill: Rgba,
    tolerance: u8,
) -> Result<PixelBuffer> {
    if buffer.channels() != 4 {
        return Err(WallpaintError::InvalidInput(format!(
            "flood fill needs a 4-channel buffer, got {} channels",
            buffer.channels()
        )));
    }
    let (width, height) = (buffer.width(), buffer.height());
    let (sx, sy) = seed;
    if !buffer.contains(sx, sy) {
        return Err(WallpaintError::OutOfBounds {
            x: sx,
            y: sy,
            width,
            height,
        });
    }

    let mut output = buffer.clone();
    let target = output.rgba_at(sx, sy);
    let tol = tolerance as i32;

    let mut visited = vec![false; width as usize * height as usize];
    let mut stack: Vec<(i32, i32)> = vec![(sx as i32, sy as i32)];

    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            continue;
        }
        let (ux, uy) = (x as u32, y as u32);
        let visit_idx = y as usize * width as usize + x as usize;
        if visited[visit_idx] {
            continue;
        }
        // Filled pixels are always visited, so reading from the output
        // buffer observes original colors for every candidate.
        if !color_matches(output.rgba_at(ux, uy), target, tol) {
            continue;
        }

        visited[visit_idx] = true;
        output.put_rgba(ux, uy, Rgba::new(fill.r, fill.g, fill.b, 255));

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    Ok(output)
}

/// All four channel differences within tolerance.
#[inline]
fn color_matches(c: Rgba, reference: Rgba, tolerance: i32) -> bool {
    (c.r as i32 - reference.r as i32).abs() <= tolerance
        && (c.g as i32 - reference.g as i32).abs() <= tolerance
        && (c.b as i32 - reference.b as i32).abs() <= tolerance
        && (c.a as i32 - reference.a as i32).abs() <= tolerance
}
