//! WebAssembly exports for the wallpaint engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. They take
//! flat RGBA byte arrays straight out of a canvas `ImageData` and hand
//! back flat arrays the caller writes straight into one, so the browser
//! side stays a thin event adapter.

use wasm_bindgen::prelude::*;

use crate::color::{Rgb, Rgba};
use crate::detect::{build_mask, extract_contours};
use crate::filters::build_edge_map;
use crate::paint::flood_fill;
use crate::paint::recolor_outside_mask;
use crate::pixel::PixelBuffer;

// ============================================================================
// Wall detection
// ============================================================================

/// Detect the wall region and return its binary mask.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `low` - Hysteresis lower threshold (50 in the reference UI)
/// * `high` - Hysteresis upper threshold (150 in the reference UI)
///
/// # Returns
/// Flat array of width * height mask bytes, 255 inside the wall
#[wasm_bindgen]
pub fn detect_wall_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: f32,
    high: f32,
) -> Vec<u8> {
    let image = PixelBuffer::from_raw(data.to_vec(), width as u32, height as u32, 4)
        .expect("Invalid dimensions");

    let edge_map = build_edge_map(&image, low, high).expect("Invalid dimensions");
    let contours = extract_contours(edge_map.data(), width, height);
    let (mask, _) = build_mask(&contours, width as u32, height as u32);
    mask.into_raw()
}

/// Detect the wall region and return its bounding box.
///
/// # Returns
/// `[found, x, y, width, height]` - `found` is 1 when a wall was detected,
/// otherwise 0 with the remaining entries zeroed
#[wasm_bindgen]
pub fn detect_wall_bounds_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: f32,
    high: f32,
) -> Vec<i32> {
    let image = PixelBuffer::from_raw(data.to_vec(), width as u32, height as u32, 4)
        .expect("Invalid dimensions");

    let edge_map = build_edge_map(&image, low, high).expect("Invalid dimensions");
    let contours = extract_contours(edge_map.data(), width, height);
    let (_, selected) = build_mask(&contours, width as u32, height as u32);

    match selected {
        Some(i) => {
            let b = contours[i].bounding_box;
            vec![1, b.x as i32, b.y as i32, b.width as i32, b.height as i32]
        }
        None => vec![0, 0, 0, 0, 0],
    }
}

// ============================================================================
// Recoloring
// ============================================================================

/// Recolor every pixel outside the mask with the given RGB color.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `mask` - Flat array of width * height mask bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `r`, `g`, `b` - Replacement color channels
///
/// # Returns
/// Flat array of recolored RGBA bytes
#[wasm_bindgen]
pub fn recolor_outside_mask_wasm(
    data: &[u8],
    mask: &[u8],
    width: usize,
    height: usize,
    r: u8,
    g: u8,
    b: u8,
) -> Vec<u8> {
    let image = PixelBuffer::from_raw(data.to_vec(), width as u32, height as u32, 4)
        .expect("Invalid dimensions");
    let mask = PixelBuffer::from_raw(mask.to_vec(), width as u32, height as u32, 1)
        .expect("Invalid dimensions");

    let result = recolor_outside_mask(&image, &mask, Rgb::new(r, g, b))
        .expect("Invalid dimensions");
    result.into_raw()
}

/// Flood-fill from a seed point with the given color and tolerance.
///
/// A seed outside the buffer returns the input unchanged so a stray click
/// never breaks the canvas.
#[wasm_bindgen]
pub fn flood_fill_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    seed_x: u32,
    seed_y: u32,
    r: u8,
    g: u8,
    b: u8,
    tolerance: u8,
) -> Vec<u8> {
    let image = PixelBuffer::from_raw(data.to_vec(), width as u32, height as u32, 4)
        .expect("Invalid dimensions");

    match flood_fill(&image, (seed_x, seed_y), Rgba::new(r, g, b, 255), tolerance) {
        Ok(filled) => filled.into_raw(),
        Err(_) => image.into_raw(),
    }
}

// ============================================================================
// Color parsing
// ============================================================================

/// Parse a `#RRGGBB` string into `[r, g, b]`.
///
/// # Returns
/// Three channel bytes, or an empty array for malformed input
#[wasm_bindgen]
pub fn parse_hex_color_wasm(hex: &str) -> Vec<u8> {
    match Rgb::from_hex(hex) {
        Ok(color) => vec![color.r, color.g, color.b],
        Err(_) => Vec::new(),
    }
}
