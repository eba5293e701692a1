#![forbid(unsafe_code)]

//! Overlay compositor: turns tour state into a stack of layers.
//!
//! The compositor is backend-neutral. It decides *what* the overlay shows
//! for the current [`SequencerState`] and emits an [`OverlayFrame`]: an
//! ordered list of [`Layer`]s (bottom to top), each with a rectangle, a
//! paint, and an optional tap target. The host draws the layers and routes
//! taps through [`OverlayFrame::hit_test`].
//!
//! # Render modes
//!
//! | State        | Anchor   | Layers                                              |
//! |--------------|----------|-----------------------------------------------------|
//! | `hidden`     | any      | none                                                |
//! | `transition` | found    | backdrop, invisible callout placeholder, accessory |
//! | `transition` | missing  | backdrop, accessory                                 |
//! | `active`     | found    | 4 mask strips, catcher (per touch mode), callout, accessory |
//! | `active`     | missing  | backdrop that advances on tap, accessory            |
//!
//! # Invariants
//!
//! 1. Layers are ordered bottom to top; hit testing walks them top-down.
//! 2. Degenerate rectangles are emitted but never drawn and never hit.
//! 3. With `passthrough`, nothing covers the cutout, so taps inside it
//!    resolve to [`TapOutcome::Passthrough`].
//! 4. A missing anchor never leaves the tour without a way forward.

use std::hash::BuildHasher;

use sherpa_core::{MaskSide, Offset, Rect, Rgba, Size, StepId, compute_mask, place_rect};
use sherpa_runtime::{OverlayStyle, SequencerState, TourState};

use crate::accessory::AccessoryView;
use crate::callout::Callout;
use crate::registry::RegistrySnapshot;
use crate::touch::{TouchAction, TouchMode};

/// Stable identity of a layer, derived from its role and rectangle.
///
/// Two frames that place the same kind of layer at the same rectangle give
/// it the same id, so hosts can diff frames cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl LayerId {
    fn derive(kind: LayerKind, rect: Rect) -> Self {
        let hasher = ahash::RandomState::with_seeds(
            0x5348_4552_5041_0001,
            0x5348_4552_5041_0002,
            0x5348_4552_5041_0003,
            0x5348_4552_5041_0004,
        );
        let key = (
            kind,
            [
                rect.x.to_bits(),
                rect.y.to_bits(),
                rect.width.to_bits(),
                rect.height.to_bits(),
            ],
        );
        Self(BuildHasher::hash_one(&hasher, key))
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer:{:016x}", self.0)
    }
}

/// Role of a layer in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Full-screen dimming.
    Backdrop,
    /// One strip of the cutout mask.
    Mask(MaskSide),
    /// Near-transparent tap catcher over the cutout.
    Catcher,
    /// Callout laid out at zero opacity while the step fades in.
    CalloutPlaceholder,
    Callout,
    Accessory,
}

impl LayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::Mask(MaskSide::Top) => "mask.top",
            Self::Mask(MaskSide::Bottom) => "mask.bottom",
            Self::Mask(MaskSide::Left) => "mask.left",
            Self::Mask(MaskSide::Right) => "mask.right",
            Self::Catcher => "catcher",
            Self::CalloutPlaceholder => "callout.placeholder",
            Self::Callout => "callout",
            Self::Accessory => "accessory",
        }
    }
}

/// What to draw inside a layer's rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill(Rgba),
    Callout { callout: Callout, opacity: f32 },
    Accessory { label: String },
}

/// What a tap on a layer does.
#[derive(Debug, Clone, PartialEq)]
pub enum TapTarget {
    /// Advance the tour.
    Advance,
    /// Run a step's custom touch action.
    Custom(TouchAction),
    /// Forward to the accessory.
    Accessory,
    /// Swallow the tap.
    Absorb,
}

/// One rectangle of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    pub rect: Rect,
    pub paint: Paint,
    pub tap: Option<TapTarget>,
}

impl Layer {
    fn new(kind: LayerKind, rect: Rect, paint: Paint, tap: Option<TapTarget>) -> Self {
        Self {
            id: LayerId::derive(kind, rect),
            kind,
            rect,
            paint,
            tap,
        }
    }

    /// Whether a backend should draw this layer at all.
    pub fn is_drawable(&self) -> bool {
        !self.rect.is_degenerate()
    }

    /// Whether a tap at `point` lands on this layer.
    pub fn hits(&self, point: Offset) -> bool {
        self.tap.is_some() && self.rect.contains(point)
    }
}

/// Result of routing a tap through a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// The tap landed on an overlay layer.
    Hit {
        layer: LayerId,
        kind: LayerKind,
        target: TapTarget,
    },
    /// Nothing in the overlay took the tap; it belongs to the host UI.
    Passthrough,
}

/// Composited overlay for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    mode: TourState,
    step: Option<StepId>,
    anchor: Option<Rect>,
    screen: Size,
    layers: Vec<Layer>,
}

impl OverlayFrame {
    /// A frame with nothing in it.
    pub fn empty(screen: Size) -> Self {
        Self {
            mode: TourState::Hidden,
            step: None,
            anchor: None,
            screen,
            layers: Vec::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> TourState {
        self.mode
    }

    /// Step this frame was built for.
    pub fn step(&self) -> Option<&StepId> {
        self.step.as_ref()
    }

    /// Anchor of the current step, if it was registered.
    #[inline]
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    #[inline]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// All layers, bottom to top.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers a backend needs to draw, bottom to top.
    pub fn drawable(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.is_drawable())
    }

    /// First layer of the given kind.
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Route a tap to the topmost layer under `point`.
    pub fn hit_test(&self, point: Offset) -> TapOutcome {
        self.layers
            .iter()
            .rev()
            .find(|l| l.hits(point))
            .and_then(|l| {
                l.tap.clone().map(|target| TapOutcome::Hit {
                    layer: l.id,
                    kind: l.kind,
                    target,
                })
            })
            .unwrap_or(TapOutcome::Passthrough)
    }

    fn push(&mut self, kind: LayerKind, rect: Rect, paint: Paint, tap: Option<TapTarget>) {
        self.layers.push(Layer::new(kind, rect, paint, tap));
    }
}

/// Builds [`OverlayFrame`]s with a fixed [`OverlayStyle`].
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    style: OverlayStyle,
}

impl Compositor {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Composite the overlay for `state`.
    ///
    /// `callout_size` is the size published by the previous measurement of
    /// the current step's callout. `accessory` is ignored while hidden.
    pub fn compose(
        &self,
        state: &SequencerState,
        registry: &RegistrySnapshot,
        screen: Size,
        callout_size: Size,
        accessory: Option<AccessoryView>,
    ) -> OverlayFrame {
        let mut frame = OverlayFrame::empty(screen);
        frame.mode = state.tour_state();
        frame.step = state.current_step().cloned();

        let details = state.current_step().and_then(|step| registry.get(step));
        frame.anchor = details.map(|d| d.anchor);
        let full = Rect::from_size(screen);
        let backdrop = Paint::Fill(self.style.backdrop);

        match state.tour_state() {
            TourState::Hidden => return frame,
            TourState::Transition => {
                frame.push(LayerKind::Backdrop, full, backdrop, Some(TapTarget::Absorb));
                if let Some(details) = details {
                    let rect = place_rect(details.anchor, callout_size, details.callout.edge());
                    frame.push(
                        LayerKind::CalloutPlaceholder,
                        rect,
                        Paint::Callout {
                            callout: details.callout.clone(),
                            opacity: self.style.placeholder_opacity,
                        },
                        None,
                    );
                }
            }
            TourState::Active => match details {
                Some(details) => {
                    let mask = compute_mask(details.anchor, screen);
                    for side in MaskSide::ALL {
                        frame.push(
                            LayerKind::Mask(side),
                            mask.side(side),
                            backdrop.clone(),
                            Some(TapTarget::Advance),
                        );
                    }

                    let catcher = match &details.touch {
                        TouchMode::Passthrough => None,
                        TouchMode::Advance => Some(TapTarget::Advance),
                        TouchMode::Custom(action) => Some(TapTarget::Custom(action.clone())),
                    };
                    if let Some(target) = catcher {
                        frame.push(
                            LayerKind::Catcher,
                            details.anchor,
                            Paint::Fill(self.style.catcher),
                            Some(target),
                        );
                    }

                    let rect = place_rect(details.anchor, callout_size, details.callout.edge());
                    frame.push(
                        LayerKind::Callout,
                        rect,
                        Paint::Callout {
                            callout: details.callout.clone(),
                            opacity: 1.0,
                        },
                        Some(TapTarget::Advance),
                    );
                }
                None => {
                    frame.push(LayerKind::Backdrop, full, backdrop, Some(TapTarget::Advance));
                }
            },
        }

        if let Some(view) = accessory {
            frame.push(
                LayerKind::Accessory,
                view.rect,
                Paint::Accessory { label: view.label },
                Some(TapTarget::Accessory),
            );
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "compositor.compose",
            mode = frame.mode.as_str(),
            anchored = frame.anchor.is_some(),
            layers = frame.layers.len()
        );

        frame
    }
}
