#![forbid(unsafe_code)]

//! Core: geometry, cutout masks, and callout placement.
//!
//! # Role in Sherpa
//! `sherpa-core` is the pure layer. Everything here is a deterministic
//! function of its inputs: no state, no timers, no logging.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Rect`], [`Size`], and [`Offset`] in a shared screen
//!   coordinate space (origin at top-left, y grows downward).
//! - **Mask**: the four strips that dim everything outside a cutout.
//! - **Placement**: where a callout sits relative to its anchor.
//! - **Step ids**: the opaque identifiers that tie anchors to tour steps.
//!
//! # How it fits in the system
//! `sherpa-runtime` sequences [`StepId`]s through a tour; `sherpa-widgets`
//! looks up the current step's anchor and feeds it to [`mask::compute_mask`]
//! and [`placement::place`] to build the overlay.

pub mod color;
pub mod geometry;
pub mod mask;
pub mod placement;
pub mod step;

pub use color::Rgba;
pub use geometry::{Offset, Rect, Size};
pub use mask::{CutoutMask, MaskSide, compute_mask};
pub use placement::{Edge, place, place_rect};
pub use step::StepId;
