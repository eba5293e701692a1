#![forbid(unsafe_code)]

//! Anchor registry: where every tour step currently sits on screen.
//!
//! Each highlightable element contributes one entry per layout pass. The
//! pass accumulates contributions in a pending [`RegistrySnapshot`];
//! [`AnchorRegistry::commit`] swaps it in as the snapshot the compositor
//! reads.
//!
//! # Invariants
//!
//! 1. Merging is total: a later contribution for the same step replaces the
//!    earlier one.
//! 2. Contributions for distinct steps commute, so a pass converges to the
//!    same snapshot regardless of the order elements report in.
//! 3. A step that did not report in the last committed pass has no anchor.
//!    Lookups miss; they never fail.
//!
//! # Example
//!
//! ```
//! use sherpa_core::Rect;
//! use sherpa_widgets::callout::Callout;
//! use sherpa_widgets::registry::AnchorRegistry;
//! use sherpa_widgets::touch::TouchMode;
//!
//! let mut registry = AnchorRegistry::new();
//! registry.register("search", Rect::new(16.0, 40.0, 200.0, 32.0), Callout::text("Search"), TouchMode::Advance);
//! registry.commit();
//!
//! assert_eq!(registry.lookup("search").map(|d| d.anchor.width), Some(200.0));
//! assert!(registry.lookup("profile").is_none());
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use sherpa_core::{Rect, StepId};

use crate::callout::Callout;
use crate::touch::TouchMode;

/// Everything the overlay needs to highlight one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDetails {
    /// Screen rectangle of the element, from the latest layout pass.
    pub anchor: Rect,
    pub callout: Callout,
    pub touch: TouchMode,
}

impl StepDetails {
    pub fn new(anchor: Rect, callout: Callout, touch: TouchMode) -> Self {
        Self {
            anchor,
            callout,
            touch,
        }
    }
}

/// Step id to details, as of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrySnapshot {
    entries: HashMap<StepId, StepDetails, ahash::RandomState>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from contributions in report order.
    pub fn from_contributions<I, S>(contributions: I) -> Self
    where
        I: IntoIterator<Item = (S, StepDetails)>,
        S: Into<StepId>,
    {
        let mut snapshot = Self::new();
        for (step, details) in contributions {
            snapshot.contribute(step, details);
        }
        snapshot
    }

    /// Record one element's contribution. Returns the entry it replaced.
    pub fn contribute(&mut self, step: impl Into<StepId>, details: StepDetails) -> Option<StepDetails> {
        let step = step.into();
        let replaced = self.entries.insert(step, details);
        #[cfg(feature = "tracing")]
        {
            if replaced.is_some() {
                tracing::trace!(message = "registry.overwrite");
            }
        }
        replaced
    }

    /// Fold `later` into `self`; entries in `later` win.
    pub fn merge(&mut self, later: RegistrySnapshot) {
        self.entries.extend(later.entries);
    }

    pub fn get<Q>(&self, step: &Q) -> Option<&StepDetails>
    where
        StepId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(step)
    }

    pub fn contains<Q>(&self, step: &Q) -> bool
    where
        StepId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(step)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&StepId, &StepDetails)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Double-buffered registry: a pass being collected and the last committed one.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    committed: RegistrySnapshot,
    pending: RegistrySnapshot,
    passes: u64,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an element's layout for the current pass.
    ///
    /// Returns `anchor` so callers can register inline while laying out.
    pub fn register(
        &mut self,
        step: impl Into<StepId>,
        anchor: Rect,
        callout: Callout,
        touch: TouchMode,
    ) -> Rect {
        self.pending
            .contribute(step, StepDetails::new(anchor, callout, touch));
        anchor
    }

    /// Finish the current pass and publish it.
    pub fn commit(&mut self) -> &RegistrySnapshot {
        self.committed = std::mem::take(&mut self.pending);
        self.passes += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "registry.commit",
            pass = self.passes,
            entries = self.committed.len()
        );
        &self.committed
    }

    /// Last committed snapshot.
    #[inline]
    pub fn snapshot(&self) -> &RegistrySnapshot {
        &self.committed
    }

    /// Contributions collected so far in the uncommitted pass.
    #[inline]
    pub fn pending(&self) -> &RegistrySnapshot {
        &self.pending
    }

    pub fn lookup<Q>(&self, step: &Q) -> Option<&StepDetails>
    where
        StepId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.committed.get(step)
    }

    /// Number of committed passes.
    #[inline]
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
