//! Scanout rotation
//!
//! Describes how the logical screen is oriented relative to the physical
//! scanout. The mode-setting layer picks a mode; everything below it treats
//! the mode as fixed for the duration of a refresh.

use serde::{Deserialize, Serialize};

/// Logical screen orientation relative to the physical scanout
///
/// `Rotate90` is clockwise: the logical pixel `(x, y)` lands at
/// `(fb_width - 1 - y, x)` in the framebuffer. `Rotate270` is
/// counter-clockwise: `(x, y)` lands at `(y, fb_height - 1 - x)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Shadow and framebuffer share one orientation
    #[default]
    None,
    /// Quarter turn clockwise
    Rotate90,
    /// Quarter turn counter-clockwise
    Rotate270,
}

impl RotationMode {
    /// Returns true if the framebuffer axes are the transposed shadow axes
    pub const fn swaps_axes(&self) -> bool {
        !matches!(self, RotationMode::None)
    }

    /// Returns the quarter turn to apply, or `None` for a straight copy
    pub const fn quarter_turn(&self) -> Option<QuarterTurn> {
        match self {
            RotationMode::None => None,
            RotationMode::Rotate90 => Some(QuarterTurn::Clockwise),
            RotationMode::Rotate270 => Some(QuarterTurn::CounterClockwise),
        }
    }

    /// Returns the mode that undoes this one
    pub const fn inverse(&self) -> RotationMode {
        match self {
            RotationMode::None => RotationMode::None,
            RotationMode::Rotate90 => RotationMode::Rotate270,
            RotationMode::Rotate270 => RotationMode::Rotate90,
        }
    }
}

/// A rotation that transposes the axes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    /// 90 degrees clockwise
    Clockwise,
    /// 90 degrees counter-clockwise (270 clockwise)
    CounterClockwise,
}

impl From<QuarterTurn> for RotationMode {
    fn from(turn: QuarterTurn) -> Self {
        match turn {
            QuarterTurn::Clockwise => RotationMode::Rotate90,
            QuarterTurn::CounterClockwise => RotationMode::Rotate270,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_default_is_none() {
        assert_eq!(RotationMode::default(), RotationMode::None);
        assert!(!RotationMode::None.swaps_axes());
        assert!(RotationMode::Rotate90.swaps_axes());
        assert!(RotationMode::Rotate270.swaps_axes());
    }

    #[test]
    fn test_quarter_turn_round_trip() {
        assert_eq!(RotationMode::None.quarter_turn(), None);
        for mode in [RotationMode::Rotate90, RotationMode::Rotate270] {
            let turn = mode.quarter_turn().unwrap();
            assert_eq!(RotationMode::from(turn), mode);
        }
    }

    #[test]
    fn test_inverse() {
        assert_eq!(RotationMode::Rotate90.inverse(), RotationMode::Rotate270);
        assert_eq!(RotationMode::Rotate270.inverse(), RotationMode::Rotate90);
        assert_eq!(RotationMode::None.inverse(), RotationMode::None);
    }

    #[test]
    fn test_rotation_serde_names() {
        assert_eq!(
            serde_json::to_string(&RotationMode::Rotate90).unwrap(),
            "\"rotate90\""
        );
        let mode: RotationMode = serde_json::from_str("\"rotate270\"").unwrap();
        assert_eq!(mode, RotationMode::Rotate270);
        let mode: RotationMode = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(mode, RotationMode::None);
    }
}
