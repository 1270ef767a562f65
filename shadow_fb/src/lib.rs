//! # Shadow Framebuffer Refresh
//!
//! This crate copies dirty regions of a CPU-side shadow buffer into the
//! scanout framebuffer, rotating them by a quarter turn when the adapter has
//! to present a portrait screen it cannot rotate in hardware.
//!
//! ## Philosophy
//!
//! This is NOT a renderer. No drawing, no blending, no format conversion.
//! It moves pixels that already exist: same shadow + same boxes → same
//! framebuffer bytes.
//!
//! ## Design Principles
//!
//! 1. **Explicit configuration**: Rotation and depth arrive as a `ShadowConfig` value
//! 2. **One engine per concern**: Straight copy, packed rotation, pointer transform
//! 3. **Checked at setup, not per pixel**: Layout errors surface from
//!    `check_surfaces`; the refresh path only carries debug assertions
//! 4. **Stays in bounds**: Group widening is clamped to the shadow height

pub mod config;
pub mod packing;
pub mod pointer;
pub mod rect_copy;
pub mod refresh;
pub mod region;
pub mod rotate;

pub use config::{ConfigError, PointerPolicy, ShadowConfig};
pub use packing::{Packed16, Packed24, Packed32, Packed8, PixelPacking};
pub use pointer::{pointer_moved, PointerTransform};
pub use rect_copy::copy_area;
pub use refresh::{refresh_area, RefreshError, ShadowRefresher};
pub use region::DirtyBox;
pub use rotate::RotatingBlitter;
