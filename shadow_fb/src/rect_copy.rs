//! Straight rectangle copy
//!
//! Used when shadow and framebuffer share an orientation: every scanline of
//! the box is copied as one contiguous run of bytes.

use hal::{Framebuffer, Surface};

use crate::region::DirtyBox;

/// Copies `area` from `shadow` to the same position in `framebuffer`
///
/// Scanlines are copied top to bottom, `width * bytes_per_pixel` bytes each,
/// honoring the separate pitches of the two surfaces. The box must lie inside
/// both surfaces and both must share a pixel depth.
pub fn copy_area<S, F>(shadow: &S, framebuffer: &mut F, area: &DirtyBox)
where
    S: Surface + ?Sized,
    F: Framebuffer + ?Sized,
{
    let src_layout = shadow.layout();
    let dst_layout = framebuffer.layout();
    debug_assert_eq!(src_layout.depth, dst_layout.depth);
    debug_assert!(area.fits_within(&src_layout), "box outside shadow");
    debug_assert!(area.fits_within(&dst_layout), "box outside framebuffer");

    let span = area.width() * src_layout.depth.bytes_per_pixel();
    if span == 0 {
        return;
    }

    let src = shadow.buffer();
    let dst = framebuffer.buffer_mut();
    for y in area.y1..area.y2 {
        let from = src_layout.offset(area.x1, y);
        let to = dst_layout.offset(area.x1, y);
        dst[to..to + span].copy_from_slice(&src[from..from + span]);
    }
}
