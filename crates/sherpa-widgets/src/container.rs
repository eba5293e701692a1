#![forbid(unsafe_code)]

//! Tour container: the glue between layout, tour state, and the overlay.
//!
//! A [`TourContainer`] owns the [`AnchorRegistry`] for a view tree, holds a
//! handle to the [`TourGuide`], and turns both into an [`OverlayFrame`] on
//! every render. Taps on the overlay are routed back through the frame's
//! hit test and dispatched to the guide, the step's custom action, or the
//! accessory.
//!
//! # Frame loop
//!
//! ```text
//! layout pass:  register(..) * n  →  commit_layout()
//! render:       render()          →  OverlayFrame
//! input:        tap(point)        →  TapOutcome   (renders first if stale)
//! clock:        tick(elapsed)
//! ```
//!
//! # Callout measurement
//!
//! Placement needs the callout's size before it can position it. Each
//! render places the callout with the size measured by the previous render
//! (zero the first time), then measures and publishes the current size. If
//! the size changed, [`TourContainer::needs_render`] stays `true` so the host
//! renders again and the callout settles in its final position.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use sherpa_core::{Offset, Rect, Size, StepId};
use sherpa_runtime::{Subscription, TourGuide};

use crate::accessory::{NoAccessory, TourAccessory};
use crate::callout::Callout;
use crate::compositor::{Compositor, OverlayFrame, TapOutcome, TapTarget};
use crate::registry::AnchorRegistry;
use crate::touch::TouchMode;

/// Hosts a tour over one view tree.
pub struct TourContainer {
    guide: TourGuide,
    registry: AnchorRegistry,
    compositor: Compositor,
    accessory: Box<dyn TourAccessory>,
    screen: Size,
    measured: HashMap<StepId, Size, ahash::RandomState>,
    frame: OverlayFrame,
    dirty: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl fmt::Debug for TourContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourContainer")
            .field("guide", &self.guide)
            .field("screen", &self.screen)
            .field("anchors", &self.registry.snapshot().len())
            .field("dirty", &self.dirty.get())
            .finish_non_exhaustive()
    }
}

impl TourContainer {
    /// Create a container driven by `guide`, styled from the guide's config.
    pub fn new(guide: TourGuide, screen: Size) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = guide.subscribe(move |_| flag.set(true));
        let compositor = Compositor::new(guide.config().overlay);
        Self {
            guide,
            registry: AnchorRegistry::new(),
            compositor,
            accessory: Box::new(NoAccessory),
            screen,
            measured: HashMap::default(),
            frame: OverlayFrame::empty(screen),
            dirty,
            _subscription: subscription,
        }
    }

    /// Install an accessory shown while a tour runs.
    #[must_use]
    pub fn with_accessory(mut self, accessory: impl TourAccessory + 'static) -> Self {
        self.accessory = Box::new(accessory);
        self.dirty.set(true);
        self
    }

    pub fn guide(&self) -> &TourGuide {
        &self.guide
    }

    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    #[inline]
    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Size) {
        if self.screen != screen {
            self.screen = screen;
            self.dirty.set(true);
        }
    }

    /// Report an element's layout for the pass in progress.
    pub fn register(
        &mut self,
        step: impl Into<StepId>,
        anchor: Rect,
        callout: Callout,
        touch: TouchMode,
    ) -> Rect {
        self.registry.register(step, anchor, callout, touch)
    }

    /// Finish the layout pass.
    pub fn commit_layout(&mut self) {
        self.registry.commit();
        self.dirty.set(true);
    }

    /// Size last published for `step`'s callout, zero if never measured.
    pub fn callout_size(&self, step: &str) -> Size {
        self.measured.get(step).copied().unwrap_or(Size::ZERO)
    }

    /// Whether state, layout, or a callout measurement changed since the
    /// last render.
    #[inline]
    pub fn needs_render(&self) -> bool {
        self.dirty.get()
    }

    /// The most recently rendered frame.
    #[inline]
    pub fn frame(&self) -> &OverlayFrame {
        &self.frame
    }

    /// Composite the overlay and measure the current callout.
    pub fn render(&mut self) -> &OverlayFrame {
        let state = self.guide.state();
        let step = state.current_step().cloned();
        let published = step
            .as_ref()
            .and_then(|s| self.measured.get(s).copied())
            .unwrap_or(Size::ZERO);

        let accessory = if state.tour_state().is_visible() {
            self.accessory.layout(self.screen, &state.status())
        } else {
            None
        };

        self.frame = self.compositor.compose(
            &state,
            self.registry.snapshot(),
            self.screen,
            published,
            accessory,
        );
        self.dirty.set(false);

        let remeasured = step
            .as_ref()
            .and_then(|s| self.registry.lookup(s))
            .map(|details| details.callout.measure())
            .filter(|size| *size != published);
        if let (Some(step), Some(size)) = (step, remeasured) {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                message = "container.callout.measured",
                step = %step,
                width = size.width,
                height = size.height
            );
            self.measured.insert(step, size);
            self.dirty.set(true);
        }

        &self.frame
    }

    /// Route a tap through the overlay and act on it.
    ///
    /// If state, layout, or the screen changed since the last render, the
    /// frame is rebuilt first so the tap never reaches a layer that is no
    /// longer on screen.
    pub fn tap(&mut self, point: Offset) -> TapOutcome {
        if self.needs_render() {
            self.render();
        }
        let outcome = self.frame.hit_test(point);
        #[cfg(feature = "tracing")]
        {
            if let TapOutcome::Hit { kind, .. } = &outcome {
                tracing::debug!(message = "container.tap", layer = kind.as_str());
            }
        }
        if let TapOutcome::Hit { target, .. } = &outcome {
            match target {
                TapTarget::Advance => self.guide.advance(),
                TapTarget::Custom(action) => action.invoke(&self.guide),
                TapTarget::Accessory => self.accessory.tap(&self.guide),
                TapTarget::Absorb => {}
            }
        }
        outcome
    }

    /// Advance the tour's clock. Returns `true` if a step was promoted.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.guide.tick(elapsed)
    }
}
