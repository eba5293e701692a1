#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sherpa_core::{Edge, Rect, Size, compute_mask, place_rect};

#[derive(Debug, Arbitrary)]
struct Input {
    cutout: [f64; 4],
    screen: [f64; 2],
    callout: [f64; 2],
    top: bool,
}

fuzz_target!(|input: Input| {
    let [x, y, w, h] = input.cutout;
    let cutout = Rect::new(x, y, w, h);
    let screen = Size::new(input.screen[0], input.screen[1]);

    let mask = compute_mask(cutout, screen);

    // Strips that survive the degenerate filter are positive in both extents.
    for (side, strip) in mask.visible() {
        assert!(
            strip.width > 0.0 && strip.height > 0.0,
            "{side:?} strip visible with non-positive extent: {strip:?}"
        );
    }

    let edge = if input.top { Edge::Top } else { Edge::Bottom };
    let callout = Size::new(input.callout[0], input.callout[1]);
    let _ = place_rect(cutout, callout, edge);
});
