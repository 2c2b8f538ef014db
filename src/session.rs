//! Per-session editing state and the load -> detect -> repaint flow.
//!
//! A [`Session`] owns everything one client works on: the decoded source
//! image, the currently displayed buffer, the detected contours and the
//! cached wall mask. Each UI event maps to exactly one method, and every
//! method runs one complete, blocking pass before returning - there is no
//! background processing and no internal locking. Hosts serving multiple
//! clients give each its own `Session`.
//!
//! Failures are local: a method that returns an error leaves all prior
//! session state untouched, so the caller can simply retry with corrected
//! input.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::detect::{build_mask, extract_contours, BoundingBox, Contour};
use crate::error::{Result, WallpaintError};
use crate::filters::build_edge_map;
use crate::paint::{flood_fill, recolor_outside_mask, FillRequest};
use crate::pixel::PixelBuffer;

/// Edge-detection thresholds for the automatic wall-detection pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectSettings {
    /// Hysteresis lower threshold on Sobel gradient magnitude.
    pub low_threshold: f32,
    /// Hysteresis upper threshold, must exceed `low_threshold`.
    pub high_threshold: f32,
}

impl Default for DetectSettings {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

/// One client's editing state.
#[derive(Debug, Default)]
pub struct Session {
    settings: DetectSettings,
    source: Option<PixelBuffer>,
    display: Option<PixelBuffer>,
    contours: Vec<Contour>,
    mask: Option<PixelBuffer>,
    selected: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DetectSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // ========================================================================
    // Image ingestion
    // ========================================================================

    /// Decode an uploaded image and run wall detection on it.
    ///
    /// On success the decoded buffer replaces the session's source and
    /// display, and the detection artifacts (contours, mask, selection)
    /// are rebuilt. A decode failure leaves the previously loaded image,
    /// if any, fully active.
    pub fn load_from_memory(&mut self, bytes: &[u8]) -> Result<()> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let buffer = PixelBuffer::from_raw(rgba.into_raw(), width, height, 4)?;
        info!("decoded {}x{} upload", width, height);

        self.install(buffer)
    }

    /// Read and decode an image file. See [`Session::load_from_memory`].
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = std::fs::read(path)?;
        self.load_from_memory(&bytes)
    }

    /// Run detection on the new buffer, then commit everything at once.
    fn install(&mut self, buffer: PixelBuffer) -> Result<()> {
        let edge_map = build_edge_map(
            &buffer,
            self.settings.low_threshold,
            self.settings.high_threshold,
        )?;
        let contours = extract_contours(
            edge_map.data(),
            edge_map.width() as usize,
            edge_map.height() as usize,
        );
        let (mask, selected) = build_mask(&contours, buffer.width(), buffer.height());

        match selected {
            Some(i) => info!(
                "detected wall region: contour {} of {}, area {:.0}",
                i,
                contours.len(),
                contours[i].area
            ),
            None => info!("no wall region detected in {} contours", contours.len()),
        }

        self.display = Some(buffer.clone());
        self.source = Some(buffer);
        self.contours = contours;
        self.mask = Some(mask);
        self.selected = selected;
        Ok(())
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// The buffer to render, after the most recent recolor or fill.
    pub fn display(&self) -> Option<&PixelBuffer> {
        self.display.as_ref()
    }

    /// The decoded upload, untouched by any editing.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    /// The cached wall mask (all zero when no wall was detected).
    pub fn mask(&self) -> Option<&PixelBuffer> {
        self.mask.as_ref()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn has_wall(&self) -> bool {
        self.selected.is_some()
    }

    /// Bounding box of the detected wall, for placing the edit affordance.
    ///
    /// `None` means no wall was detected; the UI hides the affordance
    /// instead of reporting an error.
    pub fn wall_bounds(&self) -> Option<BoundingBox> {
        self.selected.map(|i| self.contours[i].bounding_box)
    }

    // ========================================================================
    // Editing operations
    // ========================================================================

    /// Repaint everything outside the wall mask with the selected color.
    ///
    /// Always re-renders from the untouched source buffer, so repeated
    /// color picks do not accumulate. With an all-zero mask the whole
    /// image takes the color.
    pub fn apply_wall_color(&mut self, color: Rgb) -> Result<&PixelBuffer> {
        let source = self.source.as_ref().ok_or_else(no_image)?;
        let mask = self.mask.as_ref().ok_or_else(no_image)?;

        let rendered = recolor_outside_mask(source, mask, color)?;
        debug!(
            "recolored outside mask with #{:02x}{:02x}{:02x}",
            color.r, color.g, color.b
        );
        Ok(self.display.insert(rendered))
    }

    /// One flood-fill pass on the displayed buffer.
    pub fn fill(&mut self, request: &FillRequest) -> Result<&PixelBuffer> {
        let display = self.display.as_ref().ok_or_else(no_image)?;

        let (r, g, b, a) = request.color;
        let filled = flood_fill(display, request.seed, Rgba::new(r, g, b, a), request.tolerance)?;
        debug!(
            "flood fill at ({}, {}) with tolerance {}",
            request.seed.0, request.seed.1, request.tolerance
        );
        Ok(self.display.insert(filled))
    }

    /// Flood-fill at a click position with the default tolerance.
    pub fn fill_at(&mut self, seed: (u32, u32), color: Rgb) -> Result<&PixelBuffer> {
        let request = FillRequest::new(seed, color.into());
        self.fill(&request)
    }
}

fn no_image() -> WallpaintError {
    WallpaintError::InvalidInput("no image loaded".to_string())
}
