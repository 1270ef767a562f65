//! Heap-backed surfaces
//!
//! `MemorySurface` owns its pixels in a `Vec<u8>`. Drivers use it for the
//! shadow buffer itself; tests use it for both sides of a refresh.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::framebuffer::{Framebuffer, Surface, SurfaceError, SurfaceLayout};

/// A surface whose pixels live in an owned byte vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    layout: SurfaceLayout,
    bytes: Vec<u8>,
}

impl MemorySurface {
    /// Allocates a zeroed surface of `layout.buffer_size()` bytes
    pub fn new(layout: SurfaceLayout) -> Self {
        Self {
            layout,
            bytes: vec![0; layout.buffer_size()],
        }
    }

    /// Adopts existing bytes, checking they cover `layout`
    pub fn from_bytes(layout: SurfaceLayout, bytes: Vec<u8>) -> Result<Self, SurfaceError> {
        layout.check_len(bytes.len())?;
        Ok(Self { layout, bytes })
    }

    /// Returns the bytes of the pixel at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let offset = self.layout.offset(x, y);
        &self.bytes[offset..offset + self.layout.depth.bytes_per_pixel()]
    }

    /// Overwrites the pixel at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if `value` is not exactly one pixel wide.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: &[u8]) {
        let offset = self.layout.offset(x, y);
        let bpp = self.layout.depth.bytes_per_pixel();
        self.bytes[offset..offset + bpp].copy_from_slice(value);
    }

    /// Returns the pixel bytes of scanline `y`, without padding
    pub fn row(&self, y: usize) -> &[u8] {
        let offset = self.layout.offset(0, y);
        &self.bytes[offset..offset + self.layout.row_bytes()]
    }

    /// Consumes the surface, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Surface for MemorySurface {
    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn buffer(&self) -> &[u8] {
        &self.bytes
    }
}

impl Framebuffer for MemorySurface {
    fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
