#![forbid(unsafe_code)]

//! Cutout mask geometry.
//!
//! The dimmed overlay is drawn as four strips around the cutout rather than
//! as one full-screen rectangle with a hole, so each strip stays an ordinary
//! axis-aligned rectangle:
//!
//! ```text
//! +------+-----------+-------+
//! |      |    top    |       |
//! |      +-----------+       |
//! | left |  cutout   | right |
//! |      +-----------+       |
//! |      |  bottom   |       |
//! +------+-----------+-------+
//! ```
//!
//! # Invariants
//!
//! 1. For a cutout fully inside the screen, the four strips plus the cutout
//!    tile the screen exactly (no gaps, no overlap).
//! 2. A zero-area cutout collapses to a pure top/bottom split: the left and
//!    right strips have zero width and no strip has negative width.
//! 3. Cutouts partially or fully off-screen are accepted; the affected strips
//!    come out with zero or negative extent and are skipped at render time.

use crate::geometry::{Rect, Size};

/// Which strip of the mask a rectangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl MaskSide {
    /// All sides in mask order.
    pub const ALL: [MaskSide; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// The four rectangles covering everything outside a cutout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CutoutMask {
    /// Above the cutout, spanning its x-range.
    pub top: Rect,
    /// Below the cutout, spanning its x-range.
    pub bottom: Rect,
    /// Left of the cutout, full screen height.
    pub left: Rect,
    /// Right of the cutout, full screen height.
    pub right: Rect,
}

impl CutoutMask {
    /// Strips in `[top, bottom, left, right]` order.
    #[inline]
    pub fn rects(&self) -> [Rect; 4] {
        [self.top, self.bottom, self.left, self.right]
    }

    /// Strip for a given side.
    #[inline]
    pub fn side(&self, side: MaskSide) -> Rect {
        match side {
            MaskSide::Top => self.top,
            MaskSide::Bottom => self.bottom,
            MaskSide::Left => self.left,
            MaskSide::Right => self.right,
        }
    }

    /// Strips that cover a positive area, tagged with their side.
    pub fn visible(&self) -> impl Iterator<Item = (MaskSide, Rect)> + '_ {
        MaskSide::ALL
            .into_iter()
            .map(|side| (side, self.side(side)))
            .filter(|(_, rect)| !rect.is_degenerate())
    }

    /// Total area of the non-degenerate strips.
    pub fn covered_area(&self) -> f64 {
        self.rects().iter().map(Rect::area).sum()
    }
}

/// Compute the mask strips for `cutout` on a screen of size `screen`.
///
/// Pure and total: containment of the cutout is not assumed.
pub fn compute_mask(cutout: Rect, screen: Size) -> CutoutMask {
    if cutout.is_degenerate() {
        // Nothing to cut out: split the screen at the cutout's top edge.
        return CutoutMask {
            top: Rect::new(0.0, 0.0, screen.width, cutout.y),
            bottom: Rect::new(0.0, cutout.y, screen.width, screen.height - cutout.y),
            left: Rect::new(0.0, 0.0, 0.0, screen.height),
            right: Rect::new(screen.width, 0.0, 0.0, screen.height),
        };
    }

    CutoutMask {
        top: Rect::new(cutout.min_x(), 0.0, cutout.width, cutout.min_y()),
        bottom: Rect::new(
            cutout.min_x(),
            cutout.max_y(),
            cutout.width,
            screen.height - cutout.max_y(),
        ),
        left: Rect::new(0.0, 0.0, cutout.min_x(), screen.height),
        right: Rect::new(
            cutout.max_x(),
            0.0,
            screen.width - cutout.max_x(),
            screen.height,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Size {
        Size::new(400.0, 800.0)
    }

    #[test]
    fn centered_cutout_produces_four_strips() {
        let mask = compute_mask(Rect::new(100.0, 200.0, 50.0, 30.0), screen());
        assert_eq!(mask.top, Rect::new(100.0, 0.0, 50.0, 200.0));
        assert_eq!(mask.bottom, Rect::new(100.0, 230.0, 50.0, 570.0));
        assert_eq!(mask.left, Rect::new(0.0, 0.0, 100.0, 800.0));
        assert_eq!(mask.right, Rect::new(150.0, 0.0, 250.0, 800.0));
        assert_eq!(mask.visible().count(), 4);
    }

    #[test]
    fn covered_area_plus_cutout_is_screen_area() {
        let cutout = Rect::new(10.0, 20.0, 30.0, 40.0);
        let mask = compute_mask(cutout, screen());
        assert_eq!(mask.covered_area() + cutout.area(), 400.0 * 800.0);
    }

    #[test]
    fn cutout_touching_top_left_corner() {
        let mask = compute_mask(Rect::new(0.0, 0.0, 50.0, 50.0), screen());
        assert!(mask.top.is_degenerate());
        assert!(mask.left.is_degenerate());
        let sides: Vec<_> = mask.visible().map(|(side, _)| side).collect();
        assert_eq!(sides, vec![MaskSide::Bottom, MaskSide::Right]);
    }

    #[test]
    fn cutout_past_right_edge_yields_negative_width() {
        let mask = compute_mask(Rect::new(380.0, 10.0, 50.0, 10.0), screen());
        assert_eq!(mask.right.width, -30.0);
        assert!(mask.right.is_degenerate());
    }

    #[test]
    fn cutout_fully_offscreen_is_accepted() {
        let mask = compute_mask(Rect::new(-100.0, -100.0, 20.0, 20.0), screen());
        assert!(mask.left.is_degenerate());
        assert!(mask.top.is_degenerate());
        // Right strip covers the entire screen width past x = -80.
        assert_eq!(mask.right, Rect::new(-80.0, 0.0, 480.0, 800.0));
    }

    #[test]
    fn zero_area_cutout_splits_top_and_bottom() {
        let mask = compute_mask(Rect::new(120.0, 300.0, 0.0, 40.0), screen());
        assert_eq!(mask.top, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(mask.bottom, Rect::new(0.0, 300.0, 400.0, 500.0));
        assert_eq!(mask.left.width, 0.0);
        assert_eq!(mask.right.width, 0.0);
        assert_eq!(mask.visible().count(), 2);
    }

    #[test]
    fn zero_area_cutout_at_screen_top_leaves_single_strip() {
        let mask = compute_mask(Rect::new(0.0, 0.0, 0.0, 0.0), screen());
        let visible: Vec<_> = mask.visible().collect();
        assert_eq!(visible, vec![(MaskSide::Bottom, Rect::from_size(screen()))]);
    }

    #[test]
    fn side_lookup_matches_rects_order() {
        let mask = compute_mask(Rect::new(5.0, 5.0, 5.0, 5.0), Size::new(20.0, 20.0));
        let by_side: Vec<Rect> = MaskSide::ALL.iter().map(|s| mask.side(*s)).collect();
        assert_eq!(by_side, mask.rects().to_vec());
    }
}
