#![forbid(unsafe_code)]

//! Callout content: anything with an intrinsic size that can sit next to
//! the highlighted anchor.
//!
//! The overlay never draws content itself. It asks the content for its
//! [`measure`](CalloutContent::measure)d size, positions it with
//! [`place`](sherpa_core::place), and hands the content back to the host in
//! a [`Layer`](crate::compositor::Layer) for drawing.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use sherpa_core::{Edge, Size};
use unicode_width::UnicodeWidthStr;

/// Renderable callout body with an intrinsic measured size.
pub trait CalloutContent {
    /// Size the content wants to occupy, in screen units.
    fn measure(&self) -> Size;

    /// Downcast hook so the host can recover its concrete content type.
    fn as_any(&self) -> &dyn Any;
}

/// Callout content plus the edge of the anchor it attaches to.
#[derive(Clone)]
pub struct Callout {
    content: Rc<dyn CalloutContent>,
    edge: Edge,
}

impl Callout {
    pub fn new(content: impl CalloutContent + 'static, edge: Edge) -> Self {
        Self::from_rc(Rc::new(content), edge)
    }

    pub fn from_rc(content: Rc<dyn CalloutContent>, edge: Edge) -> Self {
        Self { content, edge }
    }

    /// A plain text callout below the anchor.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TextCallout::new(text), Edge::Bottom)
    }

    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    #[inline]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    #[inline]
    pub fn content(&self) -> &Rc<dyn CalloutContent> {
        &self.content
    }

    pub fn measure(&self) -> Size {
        self.content.measure()
    }

    /// Borrow the content as `T`, if that is what it is.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.content.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Callout {
    fn eq(&self, other: &Self) -> bool {
        self.edge == other.edge && Rc::ptr_eq(&self.content, &other.content)
    }
}

impl fmt::Debug for Callout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callout")
            .field("edge", &self.edge)
            .field("size", &self.content.measure())
            .finish_non_exhaustive()
    }
}

/// Multi-line text in a padded box, sized on a fixed glyph grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCallout {
    text: String,
    glyph: Size,
    padding: f64,
}

impl TextCallout {
    pub const DEFAULT_GLYPH: Size = Size::new(8.0, 16.0);
    pub const DEFAULT_PADDING: f64 = 12.0;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            glyph: Self::DEFAULT_GLYPH,
            padding: Self::DEFAULT_PADDING,
        }
    }

    /// Cell size of one narrow glyph. Wide glyphs take two cells.
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

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `(columns, rows)` of the laid-out text. Empty text is one empty row.
    pub fn grid(&self) -> (usize, usize) {
        let columns = self.text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
        let rows = self.text.lines().count().max(1);
        (columns, rows)
    }
}

impl CalloutContent for TextCallout {
    fn measure(&self) -> Size {
        let (columns, rows) = self.grid();
        Size::new(
            columns as f64 * self.glyph.width + 2.0 * self.padding,
            rows as f64 * self.glyph.height + 2.0 * self.padding,
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
