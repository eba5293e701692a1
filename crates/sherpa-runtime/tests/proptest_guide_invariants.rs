//! Property-based invariant tests for the tour sequencer.
//!
//! ## Invariants
//!
//! 1. Step index is defined iff the tour is visible, and always in range
//! 2. Promoting and advancing through n steps hides on exactly the n-th advance
//! 3. `stop()` from any reachable state hides with no current step
//! 4. `advance()` during `transition` changes nothing
//! 5. A promotion armed before `stop()` never fires afterwards
//! 6. Observers see exactly one notification per published transition

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use sherpa_runtime::{SequencerState, TourGuide, TourState};

const DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    Advance,
    Stop,
    Tick(u64),
}

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (1usize..6).prop_map(Op::Start),
        3 => Just(Op::Advance),
        1 => Just(Op::Stop),
        3 => (0u64..400).prop_map(Op::Tick),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arb_op(), 0..40)
}

fn step_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("step-{i}")).collect()
}

fn apply(guide: &TourGuide, op: &Op) {
    match op {
        Op::Start(n) => guide.start(step_names(*n)),
        Op::Advance => guide.advance(),
        Op::Stop => guide.stop(),
        Op::Tick(ms) => {
            guide.tick(Duration::from_millis(*ms));
        }
    }
}

fn assert_well_formed(state: &SequencerState) -> Result<(), TestCaseError> {
    match state.tour_state() {
        TourState::Hidden => {
            prop_assert_eq!(state.current_step_index(), None);
        }
        TourState::Transition | TourState::Active => {
            let index = state.current_step_index();
            prop_assert!(index.is_some());
            prop_assert!(index.unwrap_or(usize::MAX) < state.ordered_steps().len());
        }
    }
    Ok(())
}

// ── 1. Well-formed after any operation sequence ───────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn state_always_well_formed(ops in arb_ops()) {
        let guide = TourGuide::new();
        for op in &ops {
            apply(&guide, op);
            assert_well_formed(&guide.state())?;
        }
    }
}

// ── 2. Full walk-through ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn hides_exactly_on_final_advance(n in 1usize..12) {
        let guide = TourGuide::new();
        guide.start(step_names(n));
        for i in 0..n {
            prop_assert!(guide.tick(DELAY));
            prop_assert_eq!(guide.tour_state(), TourState::Active);
            prop_assert_eq!(guide.state().current_step_index(), Some(i));
            guide.advance();
            if i + 1 < n {
                prop_assert_eq!(guide.tour_state(), TourState::Transition);
            }
        }
        prop_assert_eq!(guide.state(), SequencerState::hidden());
    }
}

// ── 3. stop() from anywhere ───────────────────────────────────────────────

proptest! {
    #[test]
    fn stop_always_hides(ops in arb_ops()) {
        let guide = TourGuide::new();
        for op in &ops {
            apply(&guide, op);
        }
        guide.stop();
        prop_assert_eq!(guide.tour_state(), TourState::Hidden);
        prop_assert_eq!(guide.current(), None);
        prop_assert_eq!(guide.pending_promotion(), None);
    }
}

// ── 4. advance() during transition ────────────────────────────────────────

proptest! {
    #[test]
    fn advance_during_transition_is_noop(
        ops in arb_ops(),
        n in 1usize..6,
        elapsed in 0u64..250,
        advances in 1usize..5,
    ) {
        let guide = TourGuide::new();
        for op in &ops {
            apply(&guide, op);
        }
        guide.stop();
        guide.start(step_names(n));
        guide.tick(Duration::from_millis(elapsed));
        prop_assume!(guide.tour_state() == TourState::Transition);

        let before = guide.state();
        let version = guide.version();
        for _ in 0..advances {
            guide.advance();
        }
        prop_assert_eq!(guide.state(), before);
        prop_assert_eq!(guide.version(), version);
    }
}

// ── 5. Cancelled promotions stay cancelled ────────────────────────────────

proptest! {
    #[test]
    fn promotion_cancelled_by_stop(n in 1usize..6, later in 0u64..2_000) {
        let guide = TourGuide::new();
        guide.start(step_names(n));
        let ticket = guide.pending_promotion();
        prop_assert!(ticket.is_some());
        guide.stop();
        prop_assert!(!guide.tick(Duration::from_millis(later)));
        if let Some(ticket) = ticket {
            prop_assert!(!guide.fire_promotion(ticket));
        }
        prop_assert_eq!(guide.tour_state(), TourState::Hidden);
    }
}

// ── 6. One notification per transition ────────────────────────────────────

proptest! {
    #[test]
    fn one_notification_per_version(ops in arb_ops()) {
        let guide = TourGuide::new();
        let calls = Rc::new(Cell::new(0u64));
        let calls_clone = Rc::clone(&calls);
        let _sub = guide.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        for op in &ops {
            apply(&guide, op);
        }
        prop_assert_eq!(calls.get(), guide.version());
    }
}
