#![forbid(unsafe_code)]

//! Sherpa Runtime
//!
//! Stateful half of a guided tour: which step is showing, whether it is
//! still fading in, and who needs to hear about it.
//!
//! # Key Components
//!
//! - [`TourGuide`] - The step sequencer (`hidden → transition → active`)
//! - [`Observable`] - Shared value with change notification
//! - [`PromotionTimer`] - One-shot, supersedable timer behind the entrance fade
//! - [`GuideConfig`] - Tunables, optionally loaded from TOML or JSON
//!
//! # Role in Sherpa
//! `sherpa-runtime` owns tour state. It depends only on `sherpa-core` for
//! [`StepId`](sherpa_core::StepId) and colors; it knows nothing about
//! anchors or rendering.
//!
//! # How it fits in the system
//! `sherpa-widgets` subscribes to a [`TourGuide`] and rebuilds the overlay
//! on every transition. The host drives time by calling
//! [`TourGuide::tick`], or schedules [`TourGuide::pending_promotion`] on its
//! own timer and calls [`TourGuide::fire_promotion`].

pub mod guide;
pub mod guide_config;
pub mod promotion;
pub mod reactive;

pub use guide::{SequencerState, TourGuide, TourState, TourStatus};
pub use guide_config::{DEFAULT_PROMOTION_DELAY, GuideConfig, GuideConfigError, OverlayStyle};
pub use promotion::{PromotionTicket, PromotionTimer};
pub use reactive::{Observable, Subscription};
