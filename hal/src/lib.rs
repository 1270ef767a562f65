//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the display-side hardware abstractions the shadow
//! refresh engine is written against.
//!
//! ## Philosophy
//!
//! **Mode-setting and allocation stay outside.**
//!
//! The HAL describes surfaces (geometry, pixel depth, backing bytes) and the
//! pointer hand-off; it never allocates video memory or programs hardware.
//!
//! ## Design Principles
//!
//! 1. **No adapter-specific assumptions**: Any linear framebuffer fits
//! 2. **Trait-based**: The engine reads and writes through `Surface` and `Framebuffer`
//! 3. **No unsafe**: Mapped memory arrives as byte slices with checked length
//! 4. **Testable**: `MemorySurface` stands in for real video memory

pub mod framebuffer;
pub mod pointer;
pub mod rotation;
#[cfg(feature = "alloc")]
pub mod surface;

pub use framebuffer::{
    bitmap_byte_pad, Framebuffer, PixelDepth, Surface, SurfaceError, SurfaceLayout, SurfaceView,
    SurfaceViewMut,
};
pub use pointer::PointerSink;
pub use rotation::{QuarterTurn, RotationMode};
#[cfg(feature = "alloc")]
pub use surface::MemorySurface;
