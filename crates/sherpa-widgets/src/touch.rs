#![forbid(unsafe_code)]

//! What a tap inside the cutout does.

use std::fmt;
use std::rc::Rc;

use sherpa_runtime::TourGuide;

/// Host-supplied handler for [`TouchMode::Custom`].
///
/// Receives the guide so the handler can advance, stop, or leave the tour
/// where it is. Equality is identity: two actions are equal only if they are
/// clones of the same handler.
#[derive(Clone)]
pub struct TouchAction(Rc<dyn Fn(&TourGuide)>);

impl TouchAction {
    pub fn new(action: impl Fn(&TourGuide) + 'static) -> Self {
        Self(Rc::new(action))
    }

    /// Run the handler.
    pub fn invoke(&self, guide: &TourGuide) {
        (self.0)(guide);
    }
}

impl PartialEq for TouchAction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TouchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TouchAction").field(&"<fn>").finish()
    }
}

/// Policy for taps that land inside the highlighted cutout.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TouchMode {
    /// Nothing covers the cutout; taps reach the highlighted element.
    Passthrough,
    /// A near-transparent catcher covers the cutout and advances the tour.
    #[default]
    Advance,
    /// Like `Advance`, but runs the given action instead.
    Custom(TouchAction),
}

impl TouchMode {
    /// Shorthand for `TouchMode::Custom(TouchAction::new(action))`.
    pub fn custom(action: impl Fn(&TourGuide) + 'static) -> Self {
        Self::Custom(TouchAction::new(action))
    }

    /// Whether the cutout is covered by a catcher layer.
    #[inline]
    pub fn catches(&self) -> bool {
        !matches!(self, Self::Passthrough)
    }
}
