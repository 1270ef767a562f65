//! Refresh orchestration
//!
//! One refresh takes the dirty boxes of a display cycle and copies each of
//! them from the shadow to the framebuffer, in order, with the engine that
//! matches the configured rotation and depth.

use hal::{Framebuffer, PixelDepth, PointerSink, QuarterTurn, Surface, SurfaceLayout};
use input_types::ScreenSize;
use thiserror::Error;

use crate::config::ShadowConfig;
use crate::packing::{Packed16, Packed24, Packed32, Packed8};
use crate::pointer::PointerTransform;
use crate::rect_copy::copy_area;
use crate::region::DirtyBox;
use crate::rotate::RotatingBlitter;

/// Surface setup errors, reported before the first refresh
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("{surface} depth {actual:?} does not match configured {expected:?}")]
    DepthMismatch {
        surface: &'static str,
        expected: PixelDepth,
        actual: PixelDepth,
    },

    #[error("Framebuffer is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    LayoutMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

/// Copies every box in `boxes` from `shadow` to `framebuffer`
///
/// Boxes are processed in the given order; empty boxes are skipped and
/// overlapping boxes are simply copied again. Surfaces must match `config`
/// (see [`ShadowRefresher::check_surfaces`]) and every box must lie inside
/// the shadow.
pub fn refresh_area<S, F>(
    config: &ShadowConfig,
    shadow: &S,
    framebuffer: &mut F,
    boxes: &[DirtyBox],
) where
    S: Surface + ?Sized,
    F: Framebuffer + ?Sized,
{
    log::trace!(
        "refreshing {} boxes ({:?}, {} bpp)",
        boxes.len(),
        config.rotation,
        config.depth.bits()
    );

    for area in boxes.iter().filter(|area| !area.is_empty()) {
        match config.rotation.quarter_turn() {
            None => copy_area(shadow, framebuffer, area),
            Some(turn) => blit_rotated(config.depth, shadow, framebuffer, area, turn),
        }
    }
}

fn blit_rotated<S, F>(
    depth: PixelDepth,
    shadow: &S,
    framebuffer: &mut F,
    area: &DirtyBox,
    turn: QuarterTurn,
) where
    S: Surface + ?Sized,
    F: Framebuffer + ?Sized,
{
    match depth {
        PixelDepth::Depth8 => RotatingBlitter::<Packed8>::blit(shadow, framebuffer, area, turn),
        PixelDepth::Depth16 => RotatingBlitter::<Packed16>::blit(shadow, framebuffer, area, turn),
        PixelDepth::Depth24 => RotatingBlitter::<Packed24>::blit(shadow, framebuffer, area, turn),
        PixelDepth::Depth32 => RotatingBlitter::<Packed32>::blit(shadow, framebuffer, area, turn),
    }
}

/// Shadow refresh for one display adapter
///
/// Holds the adapter configuration and applies it to every refresh and
/// pointer update.
#[derive(Debug, Clone)]
pub struct ShadowRefresher {
    config: ShadowConfig,
}

impl ShadowRefresher {
    /// Creates a refresher for `config`
    pub fn new(config: ShadowConfig) -> Self {
        log::debug!(
            "shadow refresh: rotation {:?}, {} bpp, pointer policy {:?}",
            config.rotation,
            config.depth.bits(),
            config.pointer_policy
        );
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    /// Replaces the configuration between refreshes
    pub fn set_config(&mut self, config: ShadowConfig) {
        if config != self.config {
            log::debug!(
                "shadow refresh reconfigured: rotation {:?} -> {:?}, {} -> {} bpp",
                self.config.rotation,
                config.rotation,
                self.config.depth.bits(),
                config.depth.bits()
            );
        }
        self.config = config;
    }

    /// Framebuffer layout that scans out a shadow of layout `shadow`
    ///
    /// Width and height are swapped under rotation; the pitch is the
    /// scanline padded to 32 bits.
    pub fn expected_framebuffer_layout(&self, shadow: &SurfaceLayout) -> SurfaceLayout {
        shadow.rotated(self.config.rotation)
    }

    /// Checks that the surfaces fit the configuration
    ///
    /// Meant for mode-setting time; `refresh` itself never checks.
    pub fn check_surfaces(
        &self,
        shadow: &SurfaceLayout,
        framebuffer: &SurfaceLayout,
    ) -> Result<(), RefreshError> {
        for (surface, layout) in [("Shadow", shadow), ("Framebuffer", framebuffer)] {
            if layout.depth != self.config.depth {
                return Err(RefreshError::DepthMismatch {
                    surface,
                    expected: self.config.depth,
                    actual: layout.depth,
                });
            }
        }

        let expected = self.expected_framebuffer_layout(shadow);
        if (framebuffer.width, framebuffer.height) != (expected.width, expected.height) {
            return Err(RefreshError::LayoutMismatch {
                expected_width: expected.width,
                expected_height: expected.height,
                actual_width: framebuffer.width,
                actual_height: framebuffer.height,
            });
        }
        Ok(())
    }

    /// Copies the dirty boxes of one display cycle
    pub fn refresh<S, F>(&self, shadow: &S, framebuffer: &mut F, boxes: &[DirtyBox])
    where
        S: Surface + ?Sized,
        F: Framebuffer + ?Sized,
    {
        refresh_area(&self.config, shadow, framebuffer, boxes);
    }

    /// Copies the whole shadow
    pub fn refresh_all<S, F>(&self, shadow: &S, framebuffer: &mut F)
    where
        S: Surface + ?Sized,
        F: Framebuffer + ?Sized,
    {
        let full = DirtyBox::full(&shadow.layout());
        refresh_area(&self.config, shadow, framebuffer, &[full]);
    }

    /// Forwards a pointer position, rewritten for the active rotation
    pub fn pointer_moved<K>(&self, x: i32, y: i32, screen: ScreenSize, sink: &mut K)
    where
        K: PointerSink + ?Sized,
    {
        PointerTransform::new(&self.config).forward(x, y, screen, sink);
    }
}
