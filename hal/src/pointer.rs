//! Pointer device abstraction
//!
//! The refresh engine does not own pointer input. It receives raw pointer
//! positions from the input layer, rewrites them for the active rotation, and
//! hands them to the next stage through a `PointerSink`.
//!
//! ## Design
//!
//! - **Borrowed, not retained**: a sink is passed in for one call
//! - **Push-based**: exactly one `pointer_moved` per incoming position
//! - **Testable**: any `FnMut(i32, i32)` closure is a sink

/// Receiver of pointer positions
pub trait PointerSink {
    /// Called with the pointer position in the receiver's coordinate space
    fn pointer_moved(&mut self, x: i32, y: i32);
}

impl<F> PointerSink for F
where
    F: FnMut(i32, i32),
{
    fn pointer_moved(&mut self, x: i32, y: i32) {
        self(x, y)
    }
}
