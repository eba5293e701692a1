#![forbid(unsafe_code)]

//! Callout placement relative to an anchor.
//!
//! The callout is centered horizontally on the anchor and sits flush
//! against either the anchor's top edge or its bottom edge. Placement is
//! not clamped to the screen: a callout near an edge may overflow.

use crate::geometry::{Offset, Rect, Size};

/// Which edge of the anchor the callout attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Edge {
    /// Callout's bottom edge meets the anchor's top edge.
    Top,
    /// Callout's top edge meets the anchor's bottom edge.
    #[default]
    Bottom,
}

/// Top-left offset of a callout of `callout` size attached to `anchor`.
pub fn place(anchor: Rect, callout: Size, edge: Edge) -> Offset {
    let x = anchor.mid_x() - callout.width / 2.0;
    let y = match edge {
        Edge::Top => anchor.min_y() - callout.height,
        Edge::Bottom => anchor.max_y(),
    };
    Offset::new(x, y)
}

/// Full rectangle occupied by the placed callout.
pub fn place_rect(anchor: Rect, callout: Size, edge: Edge) -> Rect {
    Rect::from_origin_size(place(anchor, callout, edge), callout)
}
