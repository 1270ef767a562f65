//! Adapter configuration
//!
//! The rotation, depth and pointer policy of one display adapter, held as a
//! plain value and passed by reference into every refresh. The mode-setting
//! layer owns it and swaps it between refreshes.

use hal::{PixelDepth, RotationMode, SurfaceError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid surface: {0}")]
    Surface(#[from] SurfaceError),
}

/// How pointer positions are rewritten for the active rotation
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPolicy {
    /// Two branches: `Rotate90` gets its own mapping, every other mode
    /// (including no rotation) gets the `Rotate270` mapping. Matches drivers
    /// that only install the pointer hook while rotated.
    Legacy,
    /// One mapping per mode; no rotation passes positions through
    #[default]
    Symmetric,
}

/// Per-adapter shadow refresh configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShadowConfig {
    /// Orientation of the logical screen relative to scanout
    #[serde(default)]
    pub rotation: RotationMode,
    /// Depth of both the shadow and the framebuffer
    pub depth: PixelDepth,
    /// Pointer coordinate policy
    #[serde(default)]
    pub pointer_policy: PointerPolicy,
}

impl ShadowConfig {
    /// Creates an unrotated configuration
    pub fn new(depth: PixelDepth) -> Self {
        Self {
            rotation: RotationMode::None,
            depth,
            pointer_policy: PointerPolicy::default(),
        }
    }

    /// Creates a configuration from a bits-per-pixel value
    pub fn for_bpp(bpp: u8, rotation: RotationMode) -> Result<Self, ConfigError> {
        Ok(Self::new(PixelDepth::from_bpp(bpp)?).with_rotation(rotation))
    }

    /// Sets the rotation mode
    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the pointer policy
    pub fn with_pointer_policy(mut self, policy: PointerPolicy) -> Self {
        self.pointer_policy = policy;
        self
    }

    /// Parses a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("rejecting shadow configuration: {err}");
            ConfigError::from(err)
        })
    }

    /// Serializes the configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ShadowConfig::new(PixelDepth::Depth16);
        assert_eq!(config.rotation, RotationMode::None);
        assert_eq!(config.pointer_policy, PointerPolicy::Symmetric);
    }

    #[test]
    fn test_config_builders() {
        let config = ShadowConfig::new(PixelDepth::Depth8)
            .with_rotation(RotationMode::Rotate270)
            .with_pointer_policy(PointerPolicy::Legacy);
        assert_eq!(config.rotation, RotationMode::Rotate270);
        assert_eq!(config.pointer_policy, PointerPolicy::Legacy);
    }

    #[test]
    fn test_config_for_bpp() {
        let config = ShadowConfig::for_bpp(24, RotationMode::Rotate90).unwrap();
        assert_eq!(config.depth, PixelDepth::Depth24);
        assert_eq!(config.rotation, RotationMode::Rotate90);

        let err = ShadowConfig::for_bpp(12, RotationMode::None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Surface(SurfaceError::UnsupportedDepth(12))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config = ShadowConfig::from_json(
            r#"{"rotation":"rotate90","depth":16,"pointer_policy":"legacy"}"#,
        )
        .unwrap();
        assert_eq!(config.rotation, RotationMode::Rotate90);
        assert_eq!(config.depth, PixelDepth::Depth16);
        assert_eq!(config.pointer_policy, PointerPolicy::Legacy);
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = ShadowConfig::from_json(r#"{"depth":32}"#).unwrap();
        assert_eq!(config, ShadowConfig::new(PixelDepth::Depth32));
    }

    #[test]
    fn test_config_from_json_rejects_bad_input() {
        assert!(matches!(
            ShadowConfig::from_json(r#"{"depth":15}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(ShadowConfig::from_json(r#"{"rotation":"rotate90"}"#).is_err());
        assert!(ShadowConfig::from_json(r#"{"depth":8,"rotation":"rotate180"}"#).is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ShadowConfig::new(PixelDepth::Depth24).with_rotation(RotationMode::Rotate270);
        let json = config.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"rotation":"rotate270","depth":24,"pointer_policy":"symmetric"}"#
        );
        assert_eq!(ShadowConfig::from_json(&json).unwrap(), config);
    }
}
