//! End-to-end tour flow through `TourContainer`: layout, render, tap, tick.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use sherpa_core::{Edge, Offset, Rect, Size, StepId};
use sherpa_runtime::{GuideConfig, TourGuide, TourState};
use sherpa_widgets::{
    Callout, LayerKind, SkipButton, TapOutcome, TapTarget, TextCallout, TourContainer, TouchMode,
};

const SCREEN: Size = Size::new(390.0, 844.0);
const DELAY: Duration = Duration::from_millis(250);

const SEARCH: Rect = Rect::new(16.0, 60.0, 358.0, 36.0);
const FILTERS: Rect = Rect::new(16.0, 110.0, 120.0, 32.0);
const PROFILE: Rect = Rect::new(320.0, 780.0, 48.0, 48.0);

fn center(rect: Rect) -> Offset {
    Offset::new(rect.mid_x(), rect.mid_y())
}

/// One layout pass of the host screen.
fn layout(container: &mut TourContainer, filters_touch: TouchMode) {
    container.register("search", SEARCH, Callout::text("Search everything"), TouchMode::Advance);
    container.register("filters", FILTERS, Callout::text("Narrow results"), filters_touch);
    container.register(
        "profile",
        PROFILE,
        Callout::new(TextCallout::new("Your account"), Edge::Top),
        TouchMode::Passthrough,
    );
    container.commit_layout();
}

fn settle(container: &mut TourContainer) {
    for _ in 0..3 {
        if !container.needs_render() {
            break;
        }
        container.render();
    }
}

#[test]
fn full_tour_by_tapping_cutouts_and_callouts() {
    let guide = TourGuide::new();
    let mut container = TourContainer::new(guide.clone(), SCREEN).with_accessory(SkipButton::new());
    layout(&mut container, TouchMode::Advance);

    guide.start(["search", "filters", "profile"]);
    settle(&mut container);
    assert_eq!(container.frame().mode(), TourState::Transition);
    assert!(container.frame().layer(LayerKind::CalloutPlaceholder).is_some());

    // Taps during the fade do nothing.
    let outcome = container.tap(center(SEARCH));
    assert!(matches!(outcome, TapOutcome::Hit { target: TapTarget::Absorb, .. }));
    assert_eq!(guide.state().current_step_index(), Some(0));

    assert!(container.tick(DELAY));
    settle(&mut container);
    assert_eq!(container.frame().anchor(), Some(SEARCH));
    container.tap(center(SEARCH));
    assert_eq!(guide.state().current_step_index(), Some(1));
    assert_eq!(guide.tour_state(), TourState::Transition);

    container.tick(DELAY);
    settle(&mut container);
    let callout = container
        .frame()
        .layer(LayerKind::Callout)
        .map(|l| l.rect)
        .expect("callout for filters");
    assert_eq!(callout.min_y(), FILTERS.max_y());
    container.tap(center(callout));
    assert_eq!(guide.state().current_step_index(), Some(2));

    container.tick(DELAY);
    settle(&mut container);
    let callout = container
        .frame()
        .layer(LayerKind::Callout)
        .map(|l| l.rect)
        .expect("callout for profile");
    assert_eq!(callout.max_y(), PROFILE.min_y());

    // Passthrough: the cutout belongs to the host UI.
    assert_eq!(container.tap(center(PROFILE)), TapOutcome::Passthrough);
    assert_eq!(guide.tour_state(), TourState::Active);

    // Tapping the dimmed area finishes the last step.
    container.tap(Offset::new(10.0, 400.0));
    assert_eq!(guide.tour_state(), TourState::Hidden);
    settle(&mut container);
    assert!(container.frame().is_empty());
}

#[test]
fn custom_touch_action_runs_instead_of_advancing() {
    let guide = TourGuide::with_config(GuideConfig::default().with_promotion_delay(Duration::ZERO));
    let mut container = TourContainer::new(guide.clone(), SCREEN);
    let opened = Rc::new(Cell::new(0));
    let opened_clone = Rc::clone(&opened);
    layout(
        &mut container,
        TouchMode::custom(move |_| opened_clone.set(opened_clone.get() + 1)),
    );

    guide.start(["filters", "search"]);
    settle(&mut container);
    container.tap(center(FILTERS));
    assert_eq!(opened.get(), 1);
    assert_eq!(guide.current(), Some(StepId::from("filters")));
}

#[test]
fn tap_after_stop_without_render_is_passthrough() {
    let guide = TourGuide::with_config(GuideConfig::default().with_promotion_delay(Duration::ZERO));
    let mut container = TourContainer::new(guide.clone(), SCREEN);
    let opened = Rc::new(Cell::new(0));
    let opened_clone = Rc::clone(&opened);
    layout(
        &mut container,
        TouchMode::custom(move |_| opened_clone.set(opened_clone.get() + 1)),
    );

    guide.start(["filters", "search"]);
    settle(&mut container);
    assert!(container.frame().layer(LayerKind::Catcher).is_some());

    guide.stop();
    assert_eq!(container.tap(center(FILTERS)), TapOutcome::Passthrough);
    assert_eq!(container.tap(Offset::new(10.0, 400.0)), TapOutcome::Passthrough);
    assert_eq!(opened.get(), 0);
    assert_eq!(container.frame().mode(), TourState::Hidden);
}

#[test]
fn tap_after_advance_without_render_hits_new_frame() {
    let guide = TourGuide::new();
    let mut container = TourContainer::new(guide.clone(), SCREEN);
    layout(&mut container, TouchMode::Advance);

    guide.start(["search", "filters"]);
    guide.tick(DELAY);
    settle(&mut container);
    guide.advance();

    // Step 1 is fading in; a second tap on the old cutout must not skip it.
    let outcome = container.tap(center(SEARCH));
    assert!(matches!(outcome, TapOutcome::Hit { target: TapTarget::Absorb, .. }));
    assert_eq!(guide.current(), Some(StepId::from("filters")));
    assert_eq!(guide.tour_state(), TourState::Transition);
}

#[test]
fn skip_button_ends_tour_mid_way() {
    let guide = TourGuide::new();
    let mut container = TourContainer::new(guide.clone(), SCREEN).with_accessory(SkipButton::new());
    layout(&mut container, TouchMode::Advance);

    guide.start(["search", "filters", "profile"]);
    settle(&mut container);
    let skip = container
        .frame()
        .layer(LayerKind::Accessory)
        .map(|l| l.rect)
        .expect("skip button while running");
    assert_eq!(skip.max_x(), SCREEN.width - 8.0);

    container.tap(center(skip));
    assert_eq!(guide.tour_state(), TourState::Hidden);
    assert_eq!(guide.pending_promotion(), None);
    assert!(!container.tick(DELAY));
}

#[test]
fn unregistered_step_still_advances() {
    let guide = TourGuide::with_config(GuideConfig::default().with_promotion_delay(Duration::ZERO));
    let mut container = TourContainer::new(guide.clone(), SCREEN);
    layout(&mut container, TouchMode::Advance);

    guide.start(["settings", "search"]);
    settle(&mut container);
    assert_eq!(container.frame().anchor(), None);
    assert!(container.frame().layer(LayerKind::Callout).is_none());

    container.tap(Offset::new(200.0, 400.0));
    assert_eq!(guide.current(), Some(StepId::from("search")));
}

#[test]
fn anchor_moves_with_layout() {
    let guide = TourGuide::with_config(GuideConfig::default().with_promotion_delay(Duration::ZERO));
    let mut container = TourContainer::new(guide.clone(), SCREEN);
    layout(&mut container, TouchMode::Advance);
    guide.start(["search"]);
    settle(&mut container);
    assert_eq!(container.frame().anchor(), Some(SEARCH));

    let moved = Rect::new(16.0, 300.0, 358.0, 36.0);
    container.register("search", moved, Callout::text("Search everything"), TouchMode::Advance);
    container.commit_layout();
    assert!(container.needs_render());
    settle(&mut container);
    assert_eq!(container.frame().anchor(), Some(moved));
}
