#![forbid(unsafe_code)]

//! Step sequencer: the tour state machine.
//!
//! ```text
//!            start(steps)                 promotion fires
//!   Hidden ───────────────▶ Transition ───────────────────▶ Active
//!     ▲                         ▲                             │
//!     │                         └──── advance() (not last) ───┤
//!     └──────────── stop() from any state / advance() on last ┘
//! ```
//!
//! # Invariants
//!
//! 1. `current_step_index` is `Some` iff the state is not `Hidden`.
//! 2. When defined, `current_step_index < ordered_steps.len()`.
//! 3. Every transition is published to observers, one notification per
//!    transition, in the order transitions happen. A transition an observer
//!    causes from its callback is published after the one it is reacting to.
//! 4. A pending promotion only applies to the step it was armed for; `stop`
//!    and `advance` supersede it.
//!
//! # Failure Modes
//!
//! - `start` with no steps is a caller bug: it trips a debug assertion and is
//!   otherwise ignored.
//! - `advance` outside `Active` and `start` outside `Hidden` are ignored, so
//!   rapid taps during the entrance fade cannot skip a step.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use sherpa_core::StepId;
use tracing::{debug, trace, warn};

use crate::guide_config::GuideConfig;
use crate::promotion::{PromotionTicket, PromotionTimer};
use crate::reactive::{Observable, Subscription};

/// Lifecycle phase of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TourState {
    /// No tour running.
    #[default]
    Hidden,
    /// Entering a step: backdrop only, no interactive cutout yet.
    Transition,
    /// A step is highlighted and accepting input.
    Active,
}

impl TourState {
    /// Whether anything of the tour is on screen.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Transition => "transition",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for TourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the sequencer published to observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequencerState {
    tour_state: TourState,
    current_step_index: Option<usize>,
    ordered_steps: Rc<[StepId]>,
}

impl SequencerState {
    /// No tour running.
    pub fn hidden() -> Self {
        Self::default()
    }

    fn at(tour_state: TourState, steps: Rc<[StepId]>, index: usize) -> Self {
        debug_assert!(tour_state.is_visible());
        debug_assert!(index < steps.len(), "step index {index} out of range");
        Self {
            tour_state,
            current_step_index: Some(index),
            ordered_steps: steps,
        }
    }

    #[inline]
    pub fn tour_state(&self) -> TourState {
        self.tour_state
    }

    #[inline]
    pub fn current_step_index(&self) -> Option<usize> {
        self.current_step_index
    }

    /// Steps of the running tour, in tour order. Empty when hidden.
    #[inline]
    pub fn ordered_steps(&self) -> &[StepId] {
        &self.ordered_steps
    }

    /// Id of the current step.
    pub fn current_step(&self) -> Option<&StepId> {
        self.current_step_index
            .and_then(|i| self.ordered_steps.get(i))
    }

    /// Whether the current step is the final one.
    pub fn is_last_step(&self) -> bool {
        self.current_step_index
            .is_some_and(|i| i + 1 == self.ordered_steps.len())
    }

    /// Read-only projection for accessory UIs.
    pub fn status(&self) -> TourStatus {
        TourStatus {
            state: self.tour_state,
            current: self.current_step().cloned(),
            index: self.current_step_index,
            total: self.ordered_steps.len(),
        }
    }
}

/// What a skip button or progress indicator needs to know about a tour.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourStatus {
    pub state: TourState,
    pub current: Option<StepId>,
    pub index: Option<usize>,
    pub total: usize,
}

impl TourStatus {
    /// One-based `(position, total)`, e.g. `(2, 5)` on the second of five steps.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.index.map(|i| (i + 1, self.total))
    }
}

/// Drives a tour through its steps.
///
/// `TourGuide` is a cheap, cloneable handle: the overlay, the accessory, and
/// the host app all hold clones of the same guide. All methods take `&self`;
/// state lives behind an [`Observable`].
#[derive(Clone)]
pub struct TourGuide {
    state: Observable<SequencerState>,
    timer: Rc<RefCell<PromotionTimer>>,
    config: Rc<GuideConfig>,
}

impl fmt::Debug for TourGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourGuide")
            .field("state", &self.state)
            .field("pending", &self.pending_promotion())
            .finish_non_exhaustive()
    }
}

impl Default for TourGuide {
    fn default() -> Self {
        Self::new()
    }
}

impl TourGuide {
    /// Create an idle guide with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GuideConfig::default())
    }

    /// Create an idle guide with the given configuration.
    pub fn with_config(config: GuideConfig) -> Self {
        Self {
            state: Observable::new(SequencerState::hidden()),
            timer: Rc::new(RefCell::new(PromotionTimer::new())),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    /// Clone of the current sequencer state.
    pub fn state(&self) -> SequencerState {
        self.state.get()
    }

    pub fn tour_state(&self) -> TourState {
        self.state.with(SequencerState::tour_state)
    }

    /// Id of the step currently highlighted (or fading in).
    pub fn current(&self) -> Option<StepId> {
        self.state.with(|s| s.current_step().cloned())
    }

    pub fn status(&self) -> TourStatus {
        self.state.with(SequencerState::status)
    }

    /// Bumped once per published transition.
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Observe every transition. Dropping the guard unsubscribes.
    pub fn subscribe(&self, observer: impl Fn(&SequencerState) + 'static) -> Subscription {
        self.state.subscribe(observer)
    }

    /// Begin a tour over `steps`, in the given order.
    ///
    /// Only valid while hidden. `steps` must be non-empty.
    pub fn start<I>(&self, steps: I)
    where
        I: IntoIterator,
        I::Item: Into<StepId>,
    {
        let steps: Rc<[StepId]> = steps.into_iter().map(Into::into).collect();
        debug_assert!(!steps.is_empty(), "TourGuide::start requires at least one step");
        if steps.is_empty() {
            warn!(message = "guide.start.empty");
            return;
        }

        let from = self.tour_state();
        if from != TourState::Hidden {
            trace!(message = "guide.start.ignored", from = from.as_str());
            return;
        }

        debug!(message = "guide.start", steps = steps.len());
        self.enter(steps, 0, from);
    }

    /// Move past the current step; finishes the tour on the last step.
    ///
    /// Ignored unless the tour is `Active`.
    pub fn advance(&self) {
        let state = self.state.get();
        if state.tour_state != TourState::Active {
            trace!(message = "guide.advance.ignored", from = state.tour_state.as_str());
            return;
        }
        let Some(index) = state.current_step_index else {
            return;
        };

        if state.is_last_step() {
            debug!(message = "guide.complete", steps = state.ordered_steps.len());
            self.stop();
        } else {
            self.enter(state.ordered_steps, index + 1, TourState::Active);
        }
    }

    /// End the tour from any state.
    pub fn stop(&self) {
        self.timer.borrow_mut().cancel();
        let from = self.tour_state();
        if self.state.set(SequencerState::hidden()) {
            debug!(
                message = "guide.transition",
                from = from.as_str(),
                to = TourState::Hidden.as_str()
            );
        }
    }

    /// The armed promotion, for hosts that schedule their own timers.
    pub fn pending_promotion(&self) -> Option<PromotionTicket> {
        self.timer.borrow().pending()
    }

    /// Apply a promotion scheduled earlier. Stale tickets are ignored.
    ///
    /// Returns `true` if the tour moved to `Active`.
    pub fn fire_promotion(&self, ticket: PromotionTicket) -> bool {
        let state = self.state.get();
        let matches_step = state.tour_state == TourState::Transition
            && state.current_step_index == Some(ticket.step_index());
        if !matches_step || !self.timer.borrow_mut().take(&ticket) {
            trace!(
                message = "guide.promotion.stale",
                generation = ticket.generation(),
                step_index = ticket.step_index()
            );
            return false;
        }

        let index = ticket.step_index();
        self.state
            .set(SequencerState::at(TourState::Active, state.ordered_steps, index));
        debug!(
            message = "guide.transition",
            from = TourState::Transition.as_str(),
            to = TourState::Active.as_str(),
            step_index = index
        );
        true
    }

    /// Advance the guide's clock by `elapsed`, firing the promotion if due.
    ///
    /// Returns `true` if the tour moved to `Active`.
    pub fn tick(&self, elapsed: Duration) -> bool {
        let due = self.timer.borrow_mut().elapse(elapsed);
        due.is_some_and(|ticket| self.fire_promotion(ticket))
    }

    fn enter(&self, steps: Rc<[StepId]>, index: usize, from: TourState) {
        let delay = self.config.promotion_delay;
        let ticket = self.timer.borrow_mut().arm(index, delay);
        self.state
            .set(SequencerState::at(TourState::Transition, steps, index));
        debug!(
            message = "guide.transition",
            from = from.as_str(),
            to = TourState::Transition.as_str(),
            step_index = index,
            delay_ms = delay.as_millis() as u64
        );
        if delay.is_zero() {
            self.fire_promotion(ticket);
        }
    }
}
