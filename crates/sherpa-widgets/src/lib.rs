#![forbid(unsafe_code)]

//! Overlay widgets for Sherpa tours.
//!
//! - [`registry`]: where each step's element sits, rebuilt every layout pass
//! - [`compositor`]: tour state plus registry into a stack of layers
//! - [`container`]: the frame loop tying both to a [`TourGuide`](sherpa_runtime::TourGuide)
//! - [`callout`], [`touch`], [`accessory`]: per-step content and policies

pub mod accessory;
pub mod callout;
pub mod compositor;
pub mod container;
pub mod registry;
pub mod touch;

pub use accessory::{AccessoryView, NoAccessory, SkipButton, TourAccessory};
pub use callout::{Callout, CalloutContent, TextCallout};
pub use compositor::{
    Compositor, Layer, LayerId, LayerKind, OverlayFrame, Paint, TapOutcome, TapTarget,
};
pub use container::TourContainer;
pub use registry::{AnchorRegistry, RegistrySnapshot, StepDetails};
pub use touch::{TouchAction, TouchMode};
