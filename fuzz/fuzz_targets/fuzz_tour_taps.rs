#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sherpa_core::{Edge, Offset, Rect, Size};
use sherpa_runtime::{GuideConfig, TourGuide, TourState};
use sherpa_widgets::{Callout, SkipButton, TextCallout, TourContainer, TouchMode};

const STEPS: [&str; 4] = ["a", "b", "c", "unregistered"];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = f64::from(data[0].max(1)) * 4.0;
    let height = f64::from(data[1].max(1)) * 4.0;

    let guide = TourGuide::with_config(GuideConfig::default().with_promotion_delay(Duration::from_millis(50)));
    let mut container = TourContainer::new(guide.clone(), Size::new(width, height)).with_accessory(SkipButton::new());

    for chunk in data[2..].chunks(3) {
        let [op, a, b] = match chunk {
            [op, a, b] => [*op, *a, *b],
            _ => break,
        };
        match op % 6 {
            0 => {
                let len = usize::from(a % 4) + 1;
                guide.start(STEPS[..len].iter().copied());
            }
            1 => guide.advance(),
            2 => guide.stop(),
            3 => {
                container.tick(Duration::from_millis(u64::from(a)));
            }
            4 => {
                for (i, step) in STEPS[..3].iter().enumerate() {
                    let x = f64::from(a) * i as f64 - 64.0;
                    let y = f64::from(b) * i as f64 - 64.0;
                    let touch = if i == 2 { TouchMode::Passthrough } else { TouchMode::Advance };
                    let callout = Callout::new(TextCallout::new(*step), if b % 2 == 0 { Edge::Top } else { Edge::Bottom });
                    container.register(*step, Rect::new(x, y, f64::from(b), f64::from(a)), callout, touch);
                }
                container.commit_layout();
            }
            _ => {
                container.render();
                container.tap(Offset::new(f64::from(a) * 4.0, f64::from(b) * 4.0));
            }
        }

        let state = guide.state();
        match state.tour_state() {
            TourState::Hidden => assert!(state.current_step_index().is_none()),
            _ => {
                let index = state.current_step_index().expect("visible tour has a step");
                assert!(index < state.ordered_steps().len());
            }
        }
    }
});
