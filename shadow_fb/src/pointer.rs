//! Pointer coordinate transform
//!
//! Keeps pointer input consistent with a rotated screen: each raw position
//! is rewritten for the active rotation and handed once to the next stage.

use hal::{PointerSink, RotationMode};
use input_types::{PointerEvent, ScreenSize};

use crate::config::{PointerPolicy, ShadowConfig};

/// Rewrites pointer positions for one rotation and policy
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointerTransform {
    rotation: RotationMode,
    policy: PointerPolicy,
}

impl PointerTransform {
    /// Creates the transform for an adapter configuration
    pub fn new(config: &ShadowConfig) -> Self {
        Self {
            rotation: config.rotation,
            policy: config.pointer_policy,
        }
    }

    /// Maps raw `(x, y)` on `screen` to the rotated position
    ///
    /// `Rotate90` maps to `(height - y - 1, x)` and `Rotate270` to
    /// `(y, width - x - 1)`. With no rotation the legacy policy also applies
    /// the `Rotate270` mapping; the symmetric policy passes the position
    /// through. Arithmetic wraps, so raw positions far off screen never
    /// panic.
    pub fn apply(&self, x: i32, y: i32, screen: ScreenSize) -> (i32, i32) {
        match (self.rotation, self.policy) {
            (RotationMode::Rotate90, _) => (screen.height.wrapping_sub(y).wrapping_sub(1), x),
            (RotationMode::None, PointerPolicy::Symmetric) => (x, y),
            (RotationMode::Rotate270, _) | (RotationMode::None, PointerPolicy::Legacy) => {
                (y, screen.width.wrapping_sub(x).wrapping_sub(1))
            }
        }
    }

    /// Maps a whole pointer event
    pub fn transform_event(&self, event: PointerEvent, screen: ScreenSize) -> PointerEvent {
        let (x, y) = self.apply(event.x, event.y, screen);
        PointerEvent::new(x, y)
    }

    /// Maps `(x, y)` and forwards the result to `sink` exactly once
    pub fn forward<K>(&self, x: i32, y: i32, screen: ScreenSize, sink: &mut K)
    where
        K: PointerSink + ?Sized,
    {
        let (new_x, new_y) = self.apply(x, y, screen);
        sink.pointer_moved(new_x, new_y);
    }
}

/// Maps `(x, y)` for `config` and forwards it to `sink`
pub fn pointer_moved<K>(config: &ShadowConfig, x: i32, y: i32, screen: ScreenSize, sink: &mut K)
where
    K: PointerSink + ?Sized,
{
    PointerTransform::new(config).forward(x, y, screen, sink);
}
