//! Refresh Test Utilities
//!
//! This crate provides shared fixtures for the shadow refresh integration
//! tests.
//!
//! ## Test Philosophy
//!
//! - **Deterministic fixtures**: Surfaces are filled from a seeded generator
//! - **Independent oracle**: Expected framebuffers are built pixel by pixel
//!   from the rotation formulas, never through the engines under test
//! - **Whole-buffer comparison**: Padding bytes are compared too, so a stray
//!   write anywhere in the framebuffer fails the test

use hal::{MemorySurface, PixelDepth, RotationMode, Surface, SurfaceLayout};
use shadow_fb::DirtyBox;

/// Small xorshift generator for fixture data
#[derive(Debug, Clone)]
pub struct Pattern {
    state: u32,
}

impl Pattern {
    /// Creates a generator; a zero seed is bumped to keep the sequence alive
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Returns the next byte of the sequence
    pub fn next_byte(&mut self) -> u8 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x ^ (x >> 16)) as u8
    }
}

/// Zeroed surface with 32-bit padded scanlines
pub fn blank(width: usize, height: usize, depth: PixelDepth) -> MemorySurface {
    MemorySurface::new(SurfaceLayout::padded(width, height, depth))
}

/// Surface whose pixels are filled from `Pattern::new(seed)`
///
/// Padding bytes stay zero.
pub fn patterned(layout: SurfaceLayout, seed: u32) -> MemorySurface {
    let mut pattern = Pattern::new(seed);
    let mut surface = MemorySurface::new(layout);
    let bpp = layout.depth.bytes_per_pixel();
    let mut pixel = vec![0u8; bpp];
    for y in 0..layout.height {
        for x in 0..layout.width {
            pixel.iter_mut().for_each(|b| *b = pattern.next_byte());
            surface.set_pixel(x, y, &pixel);
        }
    }
    surface
}

/// Builds the framebuffer showing `shadow` under `mode`, pixel by pixel
///
/// Clockwise: shadow `(x, y)` goes to `(W - 1 - y, x)`. Counter-clockwise:
/// `(x, y)` goes to `(y, H - 1 - x)`. `W` and `H` are the framebuffer width
/// and height.
pub fn expected_rotation(shadow: &MemorySurface, mode: RotationMode) -> MemorySurface {
    expected_rotation_area(shadow, mode, &DirtyBox::full(&shadow.layout()))
}

/// Like [`expected_rotation`], but only the pixels of `area` are placed;
/// the rest of the framebuffer stays zero
pub fn expected_rotation_area(
    shadow: &MemorySurface,
    mode: RotationMode,
    area: &DirtyBox,
) -> MemorySurface {
    let src = shadow.layout();
    let mut out = MemorySurface::new(src.rotated(mode));
    let dst = out.layout();
    for y in area.y1..area.y2 {
        for x in area.x1..area.x2 {
            let (dx, dy) = match mode {
                RotationMode::None => (x, y),
                RotationMode::Rotate90 => (dst.width - 1 - y, x),
                RotationMode::Rotate270 => (y, dst.height - 1 - x),
            };
            out.set_pixel(dx, dy, shadow.pixel(x, y));
        }
    }
    out
}

/// First pixel where two equally sized surfaces differ
pub fn first_difference(a: &MemorySurface, b: &MemorySurface) -> Option<(usize, usize)> {
    let layout = a.layout();
    (0..layout.height)
        .flat_map(|y| (0..layout.width).map(move |x| (x, y)))
        .find(|&(x, y)| a.pixel(x, y) != b.pixel(x, y))
}
