//! Property-based tests for anchor registry merging.
//!
//! ## Invariants
//!
//! 1. Contributions for distinct steps converge to the same snapshot in any order
//! 2. Merging snapshots of distinct steps commutes
//! 3. For duplicate steps, the last contribution wins
//! 4. Every contributed step is present after commit

use proptest::prelude::*;
use sherpa_core::Rect;
use sherpa_widgets::{AnchorRegistry, Callout, RegistrySnapshot, StepDetails, TouchMode};

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-100i32..1000, -100i32..1000, 0i32..300, 0i32..300)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn arb_touch() -> impl Strategy<Value = TouchMode> {
    prop_oneof![Just(TouchMode::Passthrough), Just(TouchMode::Advance)]
}

fn arb_details() -> impl Strategy<Value = StepDetails> {
    (arb_rect(), arb_touch()).prop_map(|(rect, touch)| StepDetails::new(rect, Callout::text("step"), touch))
}

/// Distinct ids with details, plus a permutation of the same list.
fn arb_distinct_with_permutation()
-> impl Strategy<Value = (Vec<(String, StepDetails)>, Vec<(String, StepDetails)>)> {
    prop::collection::hash_set("[a-z]{1,6}", 0..16)
        .prop_flat_map(|ids| {
            let ids: Vec<String> = ids.into_iter().collect();
            let n = ids.len();
            (Just(ids), prop::collection::vec(arb_details(), n))
        })
        .prop_flat_map(|(ids, details)| {
            let entries: Vec<(String, StepDetails)> = ids.into_iter().zip(details).collect();
            (Just(entries.clone()), Just(entries).prop_shuffle())
        })
}

// ── 1. Order independence ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn distinct_contributions_are_order_independent(
        (entries, shuffled) in arb_distinct_with_permutation()
    ) {
        let a = RegistrySnapshot::from_contributions(entries.clone());
        let b = RegistrySnapshot::from_contributions(shuffled);
        prop_assert_eq!(a.len(), entries.len());
        prop_assert_eq!(a, b);
    }
}

// ── 2. Merge commutes for distinct steps ──────────────────────────────────

proptest! {
    #[test]
    fn merge_commutes_for_distinct_steps(
        (entries, _) in arb_distinct_with_permutation(),
        split in 0usize..16,
    ) {
        let split = split.min(entries.len());
        let (left, right) = entries.split_at(split);

        let mut lr = RegistrySnapshot::from_contributions(left.to_vec());
        lr.merge(RegistrySnapshot::from_contributions(right.to_vec()));

        let mut rl = RegistrySnapshot::from_contributions(right.to_vec());
        rl.merge(RegistrySnapshot::from_contributions(left.to_vec()));

        prop_assert_eq!(lr, rl);
    }
}

// ── 3. Last writer wins ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn last_contribution_wins(
        ids in prop::collection::vec(0u8..4, 1..24),
        rects in prop::collection::vec(arb_rect(), 24),
    ) {
        let mut registry = AnchorRegistry::new();
        for (id, rect) in ids.iter().zip(&rects) {
            registry.register(format!("s{id}"), *rect, Callout::text("x"), TouchMode::Advance);
        }
        registry.commit();

        for id in 0u8..4 {
            let last = ids
                .iter()
                .zip(&rects)
                .filter(|(i, _)| **i == id)
                .map(|(_, r)| *r)
                .last();
            let got = registry.lookup(format!("s{id}").as_str()).map(|d| d.anchor);
            prop_assert_eq!(got, last);
        }
    }
}

// ── 4. Commit publishes every contribution ────────────────────────────────

proptest! {
    #[test]
    fn commit_publishes_all_steps((entries, _) in arb_distinct_with_permutation()) {
        let mut registry = AnchorRegistry::new();
        for (id, details) in &entries {
            registry.register(id.as_str(), details.anchor, details.callout.clone(), details.touch.clone());
        }
        registry.commit();
        for (id, details) in &entries {
            prop_assert_eq!(registry.lookup(id.as_str()), Some(details));
        }
    }
}
