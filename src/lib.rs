//! Wallpaint - wall detection and recoloring engine for room photos.
//!
//! Given an uploaded photo, the engine isolates the largest enclosed
//! region (the wall) and lets a UI recolor the image around it, or
//! repaint arbitrary regions with a tolerance-based seed fill.
//!
//! ## Pipeline
//!
//! ```text
//! upload -> decode -> edge map -> contours -> largest-area mask
//!                                                  |
//!                color pick  ->  recolor outside mask (from source)
//!                canvas click -> flood fill (on displayed buffer)
//! ```
//!
//! The computational core ([`filters`], [`detect`], [`paint`]) is pure:
//! buffers in, buffers out, no UI types anywhere. [`session::Session`]
//! ties the passes together for one client and is the only stateful
//! piece. Host UIs (the `wasm` feature targets the browser canvas) stay
//! thin event adapters.

pub mod color;
pub mod detect;
pub mod error;
pub mod filters;
pub mod paint;
pub mod pixel;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, WallpaintError};
pub use pixel::PixelBuffer;
pub use session::{DetectSettings, Session};
