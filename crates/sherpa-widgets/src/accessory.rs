#![forbid(unsafe_code)]

//! Accessory slot: host UI drawn alongside a running tour.
//!
//! An accessory is shown whenever a tour is on screen and receives the
//! [`TourGuide`] when tapped. [`SkipButton`] is the stock accessory.

use sherpa_core::{Rect, Size};
use sherpa_runtime::{TourGuide, TourStatus};
use unicode_width::UnicodeWidthStr;

/// Where an accessory sits this frame and what it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessoryView {
    pub rect: Rect,
    pub label: String,
}

/// Host-supplied overlay that lives next to the tour.
pub trait TourAccessory {
    /// Lay out for this frame. `None` draws nothing.
    fn layout(&self, screen: Size, status: &TourStatus) -> Option<AccessoryView>;

    /// Handle a tap on the accessory.
    fn tap(&self, guide: &TourGuide);
}

/// Empty accessory slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccessory;

impl TourAccessory for NoAccessory {
    fn layout(&self, _screen: Size, _status: &TourStatus) -> Option<AccessoryView> {
        None
    }

    fn tap(&self, _guide: &TourGuide) {}
}

/// Button in the top-trailing corner that ends the tour.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipButton {
    label: String,
    glyph: Size,
    padding: f64,
    trailing_inset: f64,
    show_progress: bool,
}

impl Default for SkipButton {
    fn default() -> Self {
        Self {
            label: "Skip".to_owned(),
            glyph: Size::new(8.0, 16.0),
            padding: 10.0,
            trailing_inset: 8.0,
            show_progress: false,
        }
    }
}

impl SkipButton {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn glyph(mut self, glyph: Size) -> Self {
        self.glyph = glyph;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn trailing_inset(mut self, inset: f64) -> Self {
        self.trailing_inset = inset;
        self
    }

    /// Append "n/total" to the label.
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn text(&self, status: &TourStatus) -> String {
        match status.position() {
            Some((n, total)) if self.show_progress => format!("{} {n}/{total}", self.label),
            _ => self.label.clone(),
        }
    }
}

impl TourAccessory for SkipButton {
    fn layout(&self, screen: Size, status: &TourStatus) -> Option<AccessoryView> {
        if !status.state.is_visible() {
            return None;
        }
        let label = self.text(status);
        let width = label.width() as f64 * self.glyph.width + 2.0 * self.padding;
        let height = self.glyph.height + 2.0 * self.padding;
        let x = screen.width - self.trailing_inset - width;
        Some(AccessoryView {
            rect: Rect::new(x, 0.0, width, height),
            label,
        })
    }

    fn tap(&self, guide: &TourGuide) {
        guide.stop();
    }
}
