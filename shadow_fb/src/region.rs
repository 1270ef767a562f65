//! Dirty regions
//!
//! A `DirtyBox` is a half-open rectangle in shadow (unrotated) coordinates.
//! Damage tracking lives outside this crate; it hands boxes in, the refresh
//! engine only reads them.

use core::ops::Range;

use hal::SurfaceLayout;
use serde::{Deserialize, Serialize};

/// Half-open rectangle `[x1, x2) x [y1, y2)` in shadow coordinates
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirtyBox {
    /// Left edge, inclusive
    pub x1: usize,
    /// Top edge, inclusive
    pub y1: usize,
    /// Right edge, exclusive
    pub x2: usize,
    /// Bottom edge, exclusive
    pub y2: usize,
}

impl DirtyBox {
    /// Creates a box from its corners
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "inverted box");
        Self { x1, y1, x2, y2 }
    }

    /// Creates a box from its top-left corner and size
    pub fn from_origin_size(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Box covering a whole surface
    pub fn full(layout: &SurfaceLayout) -> Self {
        Self::new(0, 0, layout.width, layout.height)
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    /// Height in scanlines
    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }

    /// Returns true if the box covers no pixels
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Returns true if the box lies inside `layout`
    pub fn fits_within(&self, layout: &SurfaceLayout) -> bool {
        self.x1 <= self.x2
            && self.y1 <= self.y2
            && self.x2 <= layout.width
            && self.y2 <= layout.height
    }

    /// Scanlines touched once the rows are widened to whole packing groups
    ///
    /// `y1` rounds down and `y2` rounds up to a multiple of `group` (a power
    /// of two); the end is then clamped to `limit`, the shadow height, so the
    /// widened range never leaves the surface.
    pub fn aligned_rows(&self, group: usize, limit: usize) -> Range<usize> {
        debug_assert!(group.is_power_of_two());
        let mask = group - 1;
        let start = self.y1 & !mask;
        let end = ((self.y2 + mask) & !mask).min(limit);
        start..end.max(start)
    }

    /// The box with its rows widened as by [`aligned_rows`](Self::aligned_rows)
    pub fn aligned(&self, group: usize, limit: usize) -> Self {
        let rows = self.aligned_rows(group, limit);
        Self::new(self.x1, rows.start, self.x2, rows.end)
    }
}
