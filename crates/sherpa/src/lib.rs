#![forbid(unsafe_code)]

//! Sherpa public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a prelude for day-to-day usage.
//!
//! ```
//! use sherpa::prelude::*;
//!
//! let guide = TourGuide::new();
//! let mut overlay = TourContainer::new(guide.clone(), Size::new(390.0, 844.0))
//!     .with_accessory(SkipButton::new());
//!
//! overlay.register("search", Rect::new(16.0, 60.0, 358.0, 36.0), Callout::text("Search"), TouchMode::Advance);
//! overlay.commit_layout();
//!
//! guide.start(["search"]);
//! let frame = overlay.render();
//! assert_eq!(frame.mode(), TourState::Transition);
//! ```

use std::fmt;
#[cfg(feature = "guide-config")]
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use sherpa_core::{
    CutoutMask, Edge, MaskSide, Offset, Rect, Rgba, Size, StepId, compute_mask, place, place_rect,
};

// --- Runtime re-exports ----------------------------------------------------

pub use sherpa_runtime::{
    GuideConfig, GuideConfigError, OverlayStyle, PromotionTicket, SequencerState, Subscription,
    TourGuide, TourState, TourStatus,
};

// --- Widget re-exports -----------------------------------------------------

pub use sherpa_widgets::{
    AccessoryView, AnchorRegistry, Callout, CalloutContent, Compositor, Layer, LayerId, LayerKind,
    NoAccessory, OverlayFrame, Paint, RegistrySnapshot, SkipButton, StepDetails, TapOutcome,
    TapTarget, TextCallout, TouchAction, TouchMode, TourAccessory, TourContainer,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Sherpa hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid or unreadable tour configuration.
    Config(GuideConfigError),
    /// I/O failure outside configuration loading.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<GuideConfigError> for Error {
    fn from(err: GuideConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Sherpa APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a [`GuideConfig`] from disk, picking the format from the extension.
///
/// `.json` files are read as JSON; anything else as TOML.
#[cfg(feature = "guide-config")]
pub fn load_config(path: impl AsRef<Path>) -> Result<GuideConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        GuideConfig::from_json_file(path)?
    } else {
        GuideConfig::from_toml_file(path)?
    };
    Ok(config)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Callout, Edge, Error, GuideConfig, Offset, OverlayFrame, Rect, Result, Size, SkipButton,
        StepId, TapOutcome, TouchMode, TourContainer, TourGuide, TourState,
    };

    pub use crate::{core, runtime, widgets};
}

pub use sherpa_core as core;
pub use sherpa_runtime as runtime;
pub use sherpa_widgets as widgets;
