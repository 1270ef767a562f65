#![no_std]

//! # Input Types
//!
//! This crate defines the pointer event types exchanged between the input
//! layer and the shadow refresh engine.
//!
//! ## Philosophy
//!
//! - **Events, not registers**: Positions are structured values, not raw device reports
//! - **Screen-relative**: Coordinates are always paired with the screen they live on
//! - **Testable**: Events are serializable and can be injected for testing
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Raw device protocols (PS/2 mouse packets, USB HID reports)
//! - Acceleration or button state tracking
//! - A complete input subsystem (just the types)

use core::fmt;
use serde::{Deserialize, Serialize};

/// Pointer motion event
///
/// Coordinates are signed: devices may report positions just outside the
/// screen while a drag is in progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Horizontal position in pixels
    pub x: i32,
    /// Vertical position in pixels
    pub y: i32,
}

impl PointerEvent {
    /// Creates a pointer event at (x, y)
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position as a tuple
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns true if the position lies on `screen`
    pub const fn is_within(&self, screen: ScreenSize) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < screen.width && self.y < screen.height
    }
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Logical size of the screen a pointer moves over
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl ScreenSize {
    /// Creates a screen size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged
    pub const fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_pointer_event_position() {
        let event = PointerEvent::new(10, 5);
        assert_eq!(event.position(), (10, 5));
        assert_eq!(event.to_string(), "(10, 5)");
    }

    #[test]
    fn test_pointer_event_is_within() {
        let screen = ScreenSize::new(800, 600);
        assert!(PointerEvent::new(0, 0).is_within(screen));
        assert!(PointerEvent::new(799, 599).is_within(screen));
        assert!(!PointerEvent::new(800, 0).is_within(screen));
        assert!(!PointerEvent::new(0, -1).is_within(screen));
    }

    #[test]
    fn test_screen_size_transposed() {
        let screen = ScreenSize::new(800, 600);
        assert_eq!(screen.transposed(), ScreenSize::new(600, 800));
        assert_eq!(screen.transposed().transposed(), screen);
        assert_eq!(screen.to_string(), "800x600");
    }

    #[test]
    fn test_pointer_event_serialization() {
        let event = PointerEvent::new(-3, 42);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"x":-3,"y":42}"#);

        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
