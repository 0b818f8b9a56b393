//! Crop-to-fill viewport fitting
//!
//! The logical canvas is aspect-ratio locked at 540x960. The physical window
//! can be anything, so we scale uniformly by the larger of the two axis
//! ratios and center the result. The canvas always fully covers the window;
//! the overflowing axis is cropped, never letterboxed with gaps.

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

/// A fitted viewport: where the logical canvas lands in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window-pixel position of the logical canvas origin.
    /// Negative on the axis that overflows the window.
    pub offset: Vec2,
    /// Uniform scale from logical pixels to window pixels
    pub zoom: f32,
}

impl Viewport {
    /// Fit the logical canvas to a physical window size.
    ///
    /// Recomputed synchronously on every resize. Zero-size windows are the
    /// host's responsibility and are not handled here.
    pub fn fit(physical_w: f32, physical_h: f32) -> Self {
        let zoom = (physical_w / GAME_WIDTH).max(physical_h / GAME_HEIGHT);
        let offset = Vec2::new(
            (physical_w - GAME_WIDTH * zoom) / 2.0,
            (physical_h - GAME_HEIGHT * zoom) / 2.0,
        );
        Self { offset, zoom }
    }

    /// Map a logical-canvas point to window pixels
    #[inline]
    pub fn logical_to_screen(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.zoom
    }

    /// Map a window-pixel point back to the logical canvas
    #[inline]
    pub fn screen_to_logical(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.zoom
    }
}

impl Default for Viewport {
    /// Identity fit: window exactly matches the logical canvas
    fn default() -> Self {
        Self::fit(GAME_WIDTH, GAME_HEIGHT)
    }
}
