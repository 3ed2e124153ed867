//! Navbar configuration (navbar.toml)
//!
//! ```toml
//! [scroll_animation]
//! duration_ms = 100
//! easing = "ease_in_out"
//!
//! [layout_animation]
//! duration_ms = 0
//! ```

use std::fs;
use std::path::Path;

use navbar_animation::{Easing, Timing};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Animation timings used by the coordinator
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavBarConfig {
    /// Scroll-driven updates and open/close snaps
    #[serde(default = "default_scroll_animation")]
    pub scroll_animation: Timing,
    /// Resync after rotation or resize
    #[serde(default = "default_layout_animation")]
    pub layout_animation: Timing,
}

fn default_scroll_animation() -> Timing {
    Timing::default()
}

fn default_layout_animation() -> Timing {
    Timing::instant()
}

impl Default for NavBarConfig {
    fn default() -> Self {
        Self {
            scroll_animation: default_scroll_animation(),
            layout_animation: default_layout_animation(),
        }
    }
}

impl NavBarConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("NavBarConfig::load - {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder: set the scroll animation duration, keeping its easing
    pub fn with_scroll_duration(mut self, duration_ms: u32) -> Self {
        self.scroll_animation.duration_ms = duration_ms;
        self
    }

    /// Builder: set the scroll animation easing
    pub fn with_scroll_easing(mut self, easing: Easing) -> Self {
        self.scroll_animation.easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavBarError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = NavBarConfig::from_toml_str("").unwrap();
        assert_eq!(config, NavBarConfig::default());
        assert_eq!(config.scroll_animation.duration_ms, 100);
        assert_eq!(config.scroll_animation.easing, Easing::EaseInOut);
        assert!(config.layout_animation.is_instant());
    }

    #[test]
    fn test_partial_section() {
        let config = NavBarConfig::from_toml_str(
            r#"
            [scroll_animation]
            duration_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll_animation.duration_ms, 250);
        // Fields missing inside a section fall back to the field defaults
        assert_eq!(config.scroll_animation.easing, Easing::Linear);
        assert!(config.layout_animation.is_instant());
    }

    #[test]
    fn test_bezier_easing() {
        let config = NavBarConfig::from_toml_str(
            r#"
            [scroll_animation]
            duration_ms = 180
            easing = { cubic_bezier = [0.2, 0.0, 0.0, 1.0] }
            "#,
        )
        .unwrap();

        assert_eq!(
            config.scroll_animation.easing,
            Easing::CubicBezier(0.2, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = NavBarConfig::from_toml_str("[scroll_animation]\nduration_ms = \"fast\"")
            .unwrap_err();
        assert!(matches!(err, NavBarError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NavBarConfig::load(Path::new("/nonexistent/navbar.toml")).unwrap_err();
        assert!(matches!(err, NavBarError::Io(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NavBarConfig::default()
            .with_scroll_duration(150)
            .with_scroll_easing(Easing::EaseOut);
        let text = config.to_toml().unwrap();
        assert_eq!(NavBarConfig::from_toml_str(&text).unwrap(), config);
    }
}
