//! Rotating blit
//!
//! Copies a shadow region into a framebuffer whose axes are the transposed
//! shadow axes. One shadow column becomes one framebuffer scanline; along
//! that scanline, groups of vertically adjacent shadow pixels are packed into
//! whole 32-bit stores (see [`packing`](crate::packing)).
//!
//! The row range of the box is widened to whole packing groups and clamped
//! to the shadow height. Full groups take the packed path; the partial group
//! left over when the clamp cuts a group short is copied pixel by pixel, so
//! reads never leave the shadow's declared extents.

use core::marker::PhantomData;
use core::ops::Range;

use hal::{Framebuffer, QuarterTurn, Surface, SurfaceLayout};

use crate::packing::{store, PixelPacking};
use crate::region::DirtyBox;

/// Maps shadow coordinates to framebuffer coordinates for one quarter turn
#[derive(Debug, Clone, Copy)]
struct Transpose {
    turn: QuarterTurn,
    shadow_width: usize,
    shadow_height: usize,
}

impl Transpose {
    fn new(shadow: &SurfaceLayout, turn: QuarterTurn) -> Self {
        Self {
            turn,
            shadow_width: shadow.width,
            shadow_height: shadow.height,
        }
    }

    /// Framebuffer scanline receiving shadow column `x`
    fn dst_row(&self, x: usize) -> usize {
        match self.turn {
            QuarterTurn::Clockwise => x,
            QuarterTurn::CounterClockwise => self.shadow_width - 1 - x,
        }
    }

    /// Shadow scanline shown at framebuffer column `col`
    fn src_row(&self, col: usize) -> usize {
        match self.turn {
            QuarterTurn::Clockwise => self.shadow_height - 1 - col,
            QuarterTurn::CounterClockwise => col,
        }
    }

    /// Framebuffer columns covered by the shadow scanlines `rows`
    fn dst_columns(&self, rows: &Range<usize>) -> Range<usize> {
        match self.turn {
            QuarterTurn::Clockwise => {
                self.shadow_height - rows.end..self.shadow_height - rows.start
            }
            QuarterTurn::CounterClockwise => rows.clone(),
        }
    }
}

/// Rotating blitter for one pixel depth
///
/// `P` selects the packing; the traversal is shared by all depths.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotatingBlitter<P: PixelPacking> {
    _packing: PhantomData<P>,
}

impl<P: PixelPacking> RotatingBlitter<P> {
    /// Copies `area` with packed stores, widening its rows to whole groups
    ///
    /// Scanlines of the widened range outside `area` are re-copied from the
    /// shadow; they carry the same data the framebuffer already shows.
    pub fn blit<S, F>(shadow: &S, framebuffer: &mut F, area: &DirtyBox, turn: QuarterTurn)
    where
        S: Surface + ?Sized,
        F: Framebuffer + ?Sized,
    {
        let src_layout = shadow.layout();
        let dst_layout = framebuffer.layout();
        debug_check::<P>(&src_layout, &dst_layout, area);

        let rows = area.aligned_rows(P::GROUP, src_layout.height);
        let plan = Transpose::new(&src_layout, turn);
        let columns = plan.dst_columns(&rows);
        let packed_end = columns.start + (columns.len() / P::GROUP) * P::GROUP;
        let bpp = P::DEPTH.bytes_per_pixel();

        let src = shadow.buffer();
        let dst = framebuffer.buffer_mut();
        for x in area.x1..area.x2 {
            let dst_row = plan.dst_row(x);

            for col in (columns.start..packed_end).step_by(P::GROUP) {
                let words = P::pack(src, |k| src_layout.offset(x, plan.src_row(col + k)));
                store(dst, dst_layout.offset(col, dst_row), words.as_ref());
            }

            for col in packed_end..columns.end {
                let from = src_layout.offset(x, plan.src_row(col));
                let to = dst_layout.offset(col, dst_row);
                dst[to..to + bpp].copy_from_slice(&src[from..from + bpp]);
            }
        }
    }

    /// Copies exactly `area`, one pixel at a time, without packing
    ///
    /// Produces the same framebuffer contents as [`blit`](Self::blit) over
    /// the widened box.
    pub fn blit_unpacked<S, F>(shadow: &S, framebuffer: &mut F, area: &DirtyBox, turn: QuarterTurn)
    where
        S: Surface + ?Sized,
        F: Framebuffer + ?Sized,
    {
        let src_layout = shadow.layout();
        let dst_layout = framebuffer.layout();
        debug_check::<P>(&src_layout, &dst_layout, area);

        let plan = Transpose::new(&src_layout, turn);
        let columns = plan.dst_columns(&(area.y1..area.y2));
        let bpp = P::DEPTH.bytes_per_pixel();

        let src = shadow.buffer();
        let dst = framebuffer.buffer_mut();
        for x in area.x1..area.x2 {
            let dst_row = plan.dst_row(x);
            for col in columns.clone() {
                let from = src_layout.offset(x, plan.src_row(col));
                let to = dst_layout.offset(col, dst_row);
                dst[to..to + bpp].copy_from_slice(&src[from..from + bpp]);
            }
        }
    }
}

fn debug_check<P: PixelPacking>(src: &SurfaceLayout, dst: &SurfaceLayout, area: &DirtyBox) {
    debug_assert_eq!(src.depth, P::DEPTH, "shadow depth");
    debug_assert_eq!(dst.depth, P::DEPTH, "framebuffer depth");
    debug_assert!(
        dst.width == src.height && dst.height == src.width,
        "framebuffer is not the transposed shadow"
    );
    debug_assert!(area.fits_within(src), "box outside shadow");
}
