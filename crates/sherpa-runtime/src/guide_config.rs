#![forbid(unsafe_code)]

//! Policy-as-data configuration for tours.
//!
//! Captures every tunable of the sequencer and the overlay as a single
//! [`GuideConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # sherpa.toml
//! promotion_delay_ms = 300
//!
//! [overlay]
//! placeholder_opacity = 0.0
//!
//! [overlay.backdrop]
//! r = 0.8
//! g = 0.8
//! b = 0.8
//! a = 0.4
//! ```
//!
//! ```rust,ignore
//! let config = GuideConfig::from_toml_file("sherpa.toml")?;
//! let config = GuideConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `GuideConfig::default()` is the stock look: a 250 ms entrance fade, a
//! light gray backdrop at 40% opacity, and a near-transparent tap catcher.

#[cfg(feature = "guide-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "guide-config")]
use serde::{Deserialize, Serialize};

use sherpa_core::Rgba;

/// Default delay between entering a step and accepting input on it.
pub const DEFAULT_PROMOTION_DELAY: Duration = Duration::from_millis(250);

/// Top-level tour configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct GuideConfig {
    /// How long a step stays in `transition` before it is promoted to
    /// `active`. Zero promotes synchronously.
    #[cfg_attr(
        feature = "guide-config",
        serde(rename = "promotion_delay_ms", with = "duration_ms")
    )]
    pub promotion_delay: Duration,

    /// Overlay paint parameters.
    pub overlay: OverlayStyle,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            promotion_delay: DEFAULT_PROMOTION_DELAY,
            overlay: OverlayStyle::default(),
        }
    }
}

/// Paint parameters for the overlay layers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "guide-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "guide-config", serde(default))]
pub struct OverlayStyle {
    /// Fill of the dimmed backdrop and of the four mask strips.
    pub backdrop: Rgba,
    /// Fill of the tap catcher laid over the cutout.
    pub catcher: Rgba,
    /// Opacity of the callout placeholder during `transition`.
    pub placeholder_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            backdrop: Rgba::gray(0.8, 0.4),
            catcher: Rgba::BLACK.with_alpha(0.05),
            placeholder_opacity: 0.0,
        }
    }
}

impl GuideConfig {
    /// Builder-style override of the promotion delay.
    #[must_use]
    pub fn with_promotion_delay(mut self, delay: Duration) -> Self {
        self.promotion_delay = delay;
        self
    }

    /// Builder-style override of the overlay style.
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayStyle) -> Self {
        self.overlay = overlay;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "guide-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, GuideConfigError> {
        let config: Self = toml::from_str(s).map_err(GuideConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "guide-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GuideConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GuideConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "guide-config")]
    pub fn from_json_str(s: &str) -> Result<Self, GuideConfigError> {
        let config: Self = serde_json::from_str(s).map_err(GuideConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "guide-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GuideConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GuideConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.promotion_delay > Duration::from_secs(10) {
            errors.push(format!(
                "promotion_delay must be <= 10s, got {:?}",
                self.promotion_delay
            ));
        }

        for (name, color) in [
            ("overlay.backdrop", self.overlay.backdrop),
            ("overlay.catcher", self.overlay.catcher),
        ] {
            if color.clamped() != color {
                errors.push(format!("{name} channels must be in [0, 1], got {color:?}"));
            }
        }

        let opacity = self.overlay.placeholder_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            errors.push(format!(
                "overlay.placeholder_opacity must be in [0, 1], got {opacity}"
            ));
        }

        errors
    }

    /// `self` if [`GuideConfig::validate`] finds nothing, otherwise the errors.
    pub fn validated(self) -> Result<Self, GuideConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(GuideConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`GuideConfig`].
#[derive(Debug)]
pub enum GuideConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "guide-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "guide-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for GuideConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "guide-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "guide-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for GuideConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "guide-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "guide-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for Duration
// ---------------------------------------------------------------------------

#[cfg(feature = "guide-config")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
