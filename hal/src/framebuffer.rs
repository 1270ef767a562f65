//! # Framebuffer HAL
//!
//! This module defines the pixel layout of linear surfaces and the traits
//! through which the refresh engine reads the shadow buffer and writes the
//! scanout framebuffer.
//!
//! ## Design Principles
//!
//! 1. **Minimal and explicit**: Width, height, pitch in bytes, and pixel depth
//! 2. **Architecture-agnostic**: Any linear framebuffer a mode-setting layer maps
//! 3. **Testable**: Surfaces can be backed by a plain byte vector
//! 4. **Validated once**: Layouts are checked at construction, not per pixel

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rotation::RotationMode;

/// Errors raised while describing a surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Unsupported pixel depth: {0} bits per pixel")]
    UnsupportedDepth(u8),

    #[error("Pitch {pitch} is smaller than one scanline ({min} bytes)")]
    PitchTooSmall { pitch: usize, min: usize },

    #[error("Buffer of {len} bytes cannot hold the surface ({required} bytes required)")]
    BufferTooSmall { len: usize, required: usize },
}

/// Pixel depth of a surface
///
/// Serialized as its bits-per-pixel number (`8`, `16`, `24` or `32`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PixelDepth {
    /// 8 bits per pixel (palettized)
    Depth8,
    /// 16 bits per pixel
    Depth16,
    /// 24 bits per pixel, packed without padding
    Depth24,
    /// 32 bits per pixel
    Depth32,
}

impl PixelDepth {
    /// All supported depths, smallest first
    pub const ALL: [PixelDepth; 4] = [
        PixelDepth::Depth8,
        PixelDepth::Depth16,
        PixelDepth::Depth24,
        PixelDepth::Depth32,
    ];

    /// Looks up the depth for a bits-per-pixel value
    pub fn from_bpp(bpp: u8) -> Result<Self, SurfaceError> {
        match bpp {
            8 => Ok(PixelDepth::Depth8),
            16 => Ok(PixelDepth::Depth16),
            24 => Ok(PixelDepth::Depth24),
            32 => Ok(PixelDepth::Depth32),
            other => Err(SurfaceError::UnsupportedDepth(other)),
        }
    }

    /// Returns the number of bits per pixel
    pub const fn bits(&self) -> u8 {
        match self {
            PixelDepth::Depth8 => 8,
            PixelDepth::Depth16 => 16,
            PixelDepth::Depth24 => 24,
            PixelDepth::Depth32 => 32,
        }
    }

    /// Returns the number of bytes per pixel
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of vertically adjacent pixels packed into whole 32-bit stores
    /// when a surface of this depth is rotated.
    pub const fn group_size(&self) -> usize {
        match self {
            PixelDepth::Depth8 | PixelDepth::Depth24 => 4,
            PixelDepth::Depth16 => 2,
            PixelDepth::Depth32 => 1,
        }
    }
}

impl TryFrom<u8> for PixelDepth {
    type Error = SurfaceError;

    fn try_from(bpp: u8) -> Result<Self, Self::Error> {
        Self::from_bpp(bpp)
    }
}

impl From<PixelDepth> for u8 {
    fn from(depth: PixelDepth) -> Self {
        depth.bits()
    }
}

/// Rounds a scanline of `bits` bits up to whole 32-bit words, in bytes
pub const fn bitmap_byte_pad(bits: usize) -> usize {
    bits.div_ceil(32) * 4
}

/// Geometry of a linear surface
///
/// Deserialization goes through [`SurfaceLayout::new`], so a stored layout
/// with a short pitch is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LayoutFields")]
pub struct SurfaceLayout {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Bytes between the starts of consecutive scanlines
    pub pitch: usize,
    /// Pixel depth
    pub depth: PixelDepth,
}

/// Unchecked wire form of a `SurfaceLayout`
#[derive(Deserialize)]
struct LayoutFields {
    width: usize,
    height: usize,
    pitch: usize,
    depth: PixelDepth,
}

impl TryFrom<LayoutFields> for SurfaceLayout {
    type Error = SurfaceError;

    fn try_from(fields: LayoutFields) -> Result<Self, Self::Error> {
        Self::new(fields.width, fields.height, fields.pitch, fields.depth)
    }
}

impl SurfaceLayout {
    /// Creates a layout with an explicit pitch
    pub fn new(
        width: usize,
        height: usize,
        pitch: usize,
        depth: PixelDepth,
    ) -> Result<Self, SurfaceError> {
        let min = width * depth.bytes_per_pixel();
        if pitch < min {
            return Err(SurfaceError::PitchTooSmall { pitch, min });
        }
        Ok(Self {
            width,
            height,
            pitch,
            depth,
        })
    }

    /// Creates a layout whose pitch is the scanline padded to 32 bits
    pub const fn padded(width: usize, height: usize, depth: PixelDepth) -> Self {
        Self {
            width,
            height,
            pitch: bitmap_byte_pad(width * depth.bits() as usize),
            depth,
        }
    }

    /// Layout of the scanout surface that shows this surface under `mode`
    ///
    /// Quarter turns swap width and height; the pitch is re-padded for the
    /// new scanline length.
    pub const fn rotated(&self, mode: RotationMode) -> Self {
        if mode.swaps_axes() {
            Self::padded(self.height, self.width, self.depth)
        } else {
            Self::padded(self.width, self.height, self.depth)
        }
    }

    /// Calculate the byte offset for a pixel at (x, y)
    pub const fn offset(&self, x: usize, y: usize) -> usize {
        y * self.pitch + x * self.depth.bytes_per_pixel()
    }

    /// Bytes of pixel data in one scanline, excluding padding
    pub const fn row_bytes(&self) -> usize {
        self.width * self.depth.bytes_per_pixel()
    }

    /// Returns total buffer size in bytes, padding of the last row included
    pub const fn buffer_size(&self) -> usize {
        self.height * self.pitch
    }

    /// Smallest buffer that holds every pixel of the surface
    ///
    /// The last scanline needs no trailing padding.
    pub const fn required_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            0
        } else {
            (self.height - 1) * self.pitch + self.row_bytes()
        }
    }

    /// Checks that a buffer of `len` bytes can back this layout
    pub fn check_len(&self, len: usize) -> Result<(), SurfaceError> {
        let required = self.required_len();
        if len < required {
            return Err(SurfaceError::BufferTooSmall { len, required });
        }
        Ok(())
    }
}

/// A readable pixel surface
///
/// The shadow buffer is any `Surface`; the refresh engine borrows it
/// read-only for the duration of one call.
pub trait Surface {
    /// Returns the surface geometry
    fn layout(&self) -> SurfaceLayout;

    /// Returns the pixel bytes, at least `layout().required_len()` long
    fn buffer(&self) -> &[u8];
}

/// Framebuffer trait for pixel-based output
///
/// This trait provides access to a linear framebuffer for drawing pixels.
/// Implementations handle platform-specific memory mapping and synchronization.
pub trait Framebuffer: Surface {
    /// Returns a mutable slice to the framebuffer pixel data
    ///
    /// # Notes
    ///
    /// The slice may be backed by device memory (e.g., video RAM).
    /// Write ordering may matter on some platforms.
    fn buffer_mut(&mut self) -> &mut [u8];
}

/// Borrowed read-only surface over memory mapped by someone else
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    layout: SurfaceLayout,
    bytes: &'a [u8],
}

impl<'a> SurfaceView<'a> {
    /// Wraps `bytes`, checking they cover `layout`
    pub fn new(layout: SurfaceLayout, bytes: &'a [u8]) -> Result<Self, SurfaceError> {
        layout.check_len(bytes.len())?;
        Ok(Self { layout, bytes })
    }
}

impl Surface for SurfaceView<'_> {
    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn buffer(&self) -> &[u8] {
        self.bytes
    }
}

/// Borrowed writable surface, typically a mapped scanout aperture
#[derive(Debug)]
pub struct SurfaceViewMut<'a> {
    layout: SurfaceLayout,
    bytes: &'a mut [u8],
}

impl<'a> SurfaceViewMut<'a> {
    /// Wraps `bytes`, checking they cover `layout`
    pub fn new(layout: SurfaceLayout, bytes: &'a mut [u8]) -> Result<Self, SurfaceError> {
        layout.check_len(bytes.len())?;
        Ok(Self { layout, bytes })
    }
}

impl Surface for SurfaceViewMut<'_> {
    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn buffer(&self) -> &[u8] {
        &*self.bytes
    }
}

impl Framebuffer for SurfaceViewMut<'_> {
    fn buffer_mut(&mut self) -> &mut [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth_from_bpp() {
        assert_eq!(PixelDepth::from_bpp(8), Ok(PixelDepth::Depth8));
        assert_eq!(PixelDepth::from_bpp(24), Ok(PixelDepth::Depth24));
        assert_eq!(
            PixelDepth::from_bpp(15),
            Err(SurfaceError::UnsupportedDepth(15))
        );
    }

    #[test]
    fn test_pixel_depth_group_sizes() {
        let groups: Vec<usize> = PixelDepth::ALL.iter().map(|d| d.group_size()).collect();
        assert_eq!(groups, vec![4, 2, 4, 1]);

        // Every packed group fills whole 32-bit stores
        for depth in PixelDepth::ALL {
            assert_eq!(depth.group_size() * depth.bytes_per_pixel() % 4, 0);
        }
    }

    #[test]
    fn test_pixel_depth_serde_as_bpp() {
        let json = serde_json::to_string(&PixelDepth::Depth16).unwrap();
        assert_eq!(json, "16");

        let depth: PixelDepth = serde_json::from_str("24").unwrap();
        assert_eq!(depth, PixelDepth::Depth24);

        assert!(serde_json::from_str::<PixelDepth>("12").is_err());
    }

    #[test]
    fn test_bitmap_byte_pad() {
        assert_eq!(bitmap_byte_pad(0), 0);
        assert_eq!(bitmap_byte_pad(8), 4);
        assert_eq!(bitmap_byte_pad(32), 4);
        assert_eq!(bitmap_byte_pad(33), 8);
        // 601 pixels at 24bpp = 14424 bits = 1803 bytes, padded to 1804
        assert_eq!(bitmap_byte_pad(601 * 24), 1804);
    }

    #[test]
    fn test_layout_rejects_short_pitch() {
        assert_eq!(
            SurfaceLayout::new(10, 4, 29, PixelDepth::Depth24),
            Err(SurfaceError::PitchTooSmall { pitch: 29, min: 30 })
        );
        assert!(SurfaceLayout::new(10, 4, 30, PixelDepth::Depth24).is_ok());
    }

    #[test]
    fn test_layout_deserialize_checks_pitch() {
        let layout: SurfaceLayout =
            serde_json::from_str(r#"{"width":10,"height":4,"pitch":32,"depth":24}"#).unwrap();
        assert_eq!(layout, SurfaceLayout::new(10, 4, 32, PixelDepth::Depth24).unwrap());

        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(serde_json::from_str::<SurfaceLayout>(&json).unwrap(), layout);

        let short = serde_json::from_str::<SurfaceLayout>(
            r#"{"width":10,"height":4,"pitch":29,"depth":24}"#,
        );
        assert!(short.is_err());
    }

    #[test]
    fn test_layout_offset() {
        let layout = SurfaceLayout::new(80, 25, 336, PixelDepth::Depth32).unwrap();
        assert_eq!(layout.offset(0, 0), 0);
        assert_eq!(layout.offset(1, 0), 4);
        assert_eq!(layout.offset(0, 1), 336);
        assert_eq!(layout.offset(10, 5), 5 * 336 + 40);
    }

    #[test]
    fn test_layout_sizes() {
        let layout = SurfaceLayout::padded(5, 3, PixelDepth::Depth24);
        assert_eq!(layout.pitch, 16);
        assert_eq!(layout.row_bytes(), 15);
        assert_eq!(layout.buffer_size(), 48);
        assert_eq!(layout.required_len(), 47);

        let empty = SurfaceLayout::padded(0, 3, PixelDepth::Depth8);
        assert_eq!(empty.required_len(), 0);
    }

    #[test]
    fn test_layout_rotated_swaps_axes() {
        let shadow = SurfaceLayout::padded(640, 480, PixelDepth::Depth8);

        let portrait = shadow.rotated(RotationMode::Rotate90);
        assert_eq!((portrait.width, portrait.height), (480, 640));
        assert_eq!(portrait.pitch, 480);

        let ccw = shadow.rotated(RotationMode::Rotate270);
        assert_eq!(ccw, portrait);

        assert_eq!(shadow.rotated(RotationMode::None), shadow);
    }

    #[test]
    fn test_surface_view_checks_length() {
        let layout = SurfaceLayout::padded(3, 2, PixelDepth::Depth16);
        let bytes = [0u8; 13];
        assert_eq!(
            SurfaceView::new(layout, &bytes).unwrap_err(),
            SurfaceError::BufferTooSmall {
                len: 13,
                required: 14
            }
        );

        let bytes = [0u8; 14];
        let view = SurfaceView::new(layout, &bytes).unwrap();
        assert_eq!(view.layout(), layout);
        assert_eq!(view.buffer().len(), 14);
    }

    #[test]
    fn test_surface_view_mut_writes_through() {
        let layout = SurfaceLayout::padded(2, 2, PixelDepth::Depth32);
        let mut bytes = [0u8; 16];
        {
            let mut view = SurfaceViewMut::new(layout, &mut bytes).unwrap();
            let offset = layout.offset(1, 1);
            view.buffer_mut()[offset] = 0x7F;
        }
        assert_eq!(bytes[12], 0x7F);
    }
}
