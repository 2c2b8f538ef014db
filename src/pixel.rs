//! The `PixelBuffer` raster type shared by every stage of the engine.
//!
//! ## Layout
//!
//! A buffer is a flat, row-major byte grid. Pixel `(x, y)` channel `c`
//! lives at `data[(y * width + x) * channels + c]`.
//!
//! | Kind | Channels | Values |
//! |------|----------|--------|
//! | Image | 4 (R,G,B,A) | 0-255 |
//! | Edge map / mask | 1 | {0, 255} |
//!
//! Channel order is fixed as R,G,B,A at the API boundary. The filter layer
//! works on `ndarray` grids; the conversion helpers at the bottom of this
//! file bridge the two representations.

use ndarray::{Array2, Array3};

use crate::color::Rgba;
use crate::error::{Result, WallpaintError};

/// A width x height grid of 8-bit pixels, 1 or 4 channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        debug_assert!(channels == 1 || channels == 4);
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        }
    }

    /// Wrap an existing byte vector, enforcing the layout invariant
    /// `data.len() == width * height * channels`.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(WallpaintError::InvalidInput(format!(
                "buffer length {} does not match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset of pixel `(x, y)`, channel 0.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Read an RGBA pixel. Requires a 4-channel buffer and in-bounds
    /// coordinates.
    #[inline]
    pub fn rgba_at(&self, x: u32, y: u32) -> Rgba {
        debug_assert_eq!(self.channels, 4);
        let i = self.index(x, y);
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Write an RGBA pixel. Requires a 4-channel buffer and in-bounds
    /// coordinates.
    #[inline]
    pub fn put_rgba(&mut self, x: u32, y: u32, color: Rgba) {
        debug_assert_eq!(self.channels, 4);
        let i = self.index(x, y);
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    /// Read a single-channel value (edge maps, masks).
    #[inline]
    pub fn value_at(&self, x: u32, y: u32) -> u8 {
        debug_assert_eq!(self.channels, 1);
        self.data[y as usize * self.width as usize + x as usize]
    }

    // ========================================================================
    // ndarray interop for the filter layer
    // ========================================================================

    /// View a 4-channel buffer as an `(height, width, 4)` array.
    pub fn to_rgba_array(&self) -> Result<Array3<u8>> {
        if self.channels != 4 {
            return Err(WallpaintError::InvalidInput(format!(
                "expected a 4-channel buffer, got {} channels",
                self.channels
            )));
        }
        let shape = (self.height as usize, self.width as usize, 4);
        Array3::from_shape_vec(shape, self.data.clone())
            .map_err(|e| WallpaintError::InvalidInput(e.to_string()))
    }

    /// View a single-channel buffer as an `(height, width)` array.
    pub fn to_gray_array(&self) -> Result<Array2<u8>> {
        if self.channels != 1 {
            return Err(WallpaintError::InvalidInput(format!(
                "expected a single-channel buffer, got {} channels",
                self.channels
            )));
        }
        let shape = (self.height as usize, self.width as usize);
        Array2::from_shape_vec(shape, self.data.clone())
            .map_err(|e| WallpaintError::InvalidInput(e.to_string()))
    }

    /// Wrap an `(height, width)` array as a single-channel buffer.
    pub fn from_gray_array(array: Array2<u8>) -> Self {
        let (height, width) = (array.shape()[0], array.shape()[1]);
        let data = array.into_raw_vec_and_offset().0;
        Self {
            width: width as u32,
            height: height as u32,
            channels: 1,
            data,
        }
    }
}
