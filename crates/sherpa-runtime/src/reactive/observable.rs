#![forbid(unsafe_code)]

//! Shared tour state that publishes every change to its observers.
//!
//! [`Observable<T>`] keeps one value behind `Rc<RefCell<..>>` along with a
//! version counter and a list of weakly held observer callbacks. A `set`
//! that changes the value (by `PartialEq`) bumps the version and publishes
//! the new value to every live observer in registration order.
//!
//! # Delivery order
//!
//! Observers may write back into the observable from their callback, which
//! is how a host drives the tour from a notification. Such a nested `set`
//! takes effect immediately (readers see the new value and version at once)
//! but its notification is queued behind the one in flight. The outermost
//! `set` drains the queue oldest first, so every observer receives every
//! published value exactly once and in the order the changes happened.
//!
//! ```text
//! set(a) ─┬─ A(a) ── set(b) ⇒ queued
//!         ├─ B(a)
//!         ├─ A(b)
//!         └─ B(b)
//! ```
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: observers whose [`Subscription`] is never dropped
//!   stay registered. Dropped ones are pruned before each delivery.
//! - **Observer panic**: the queue and the draining flag are reset when the
//!   unwinding delivery leaves, so the observable stays usable afterwards.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::{debug, info_span};
use web_time::Instant;

type Listener<T> = Rc<dyn Fn(&T)>;

/// A value waiting to be published, tagged with the version it created.
struct Published<T> {
    value: T,
    version: u64,
}

struct Shared<T> {
    current: T,
    version: u64,
    listeners: Vec<Weak<dyn Fn(&T)>>,
    outbox: VecDeque<Published<T>>,
    draining: bool,
}

impl<T> Shared<T> {
    /// Live listeners in registration order; dead ones are dropped here.
    fn live_listeners(&mut self) -> Vec<Listener<T>> {
        let mut live = Vec::with_capacity(self.listeners.len());
        self.listeners.retain(|weak| match weak.upgrade() {
            Some(listener) => {
                live.push(listener);
                true
            }
            None => false,
        });
        live
    }
}

/// A shared, versioned value with ordered change notification.
///
/// Cloning an `Observable` yields another handle to the same value.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing `set`.
/// 2. `set(v)` where `v == current` neither bumps the version nor notifies.
/// 3. Each change reaches each observer once, in the order changes were made,
///    even when observers `set` from inside their callback.
/// 4. Within one change, observers run in registration order.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.current)
            .field("version", &shared.version)
            .field("subscriber_count", &shared.listeners.len())
            .field("queued", &shared.outbox.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                current: value,
                version: 0,
                listeners: Vec::new(),
                outbox: VecDeque::new(),
                draining: false,
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().current.clone()
    }

    /// Read the current value in place.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().current)
    }

    /// Replace the value. Returns `true` if it changed.
    ///
    /// Called from outside any callback, every observer has seen the change
    /// (and any changes they made in response) by the time this returns.
    /// Called from inside a callback, the change is applied now and published
    /// after the notification currently in flight.
    pub fn set(&self, value: T) -> bool {
        let start_draining = {
            let mut shared = self.shared.borrow_mut();
            if shared.current == value {
                return false;
            }
            shared.version += 1;
            let version = shared.version;
            shared.outbox.push_back(Published {
                value: value.clone(),
                version,
            });
            shared.current = value;
            !std::mem::replace(&mut shared.draining, true)
        };
        if start_draining {
            self.drain();
        }
        true
    }

    /// Register `callback` for future changes.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(callback);
        self.shared
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&listener));
        Subscription {
            _listener: Box::new(listener),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Registered observers, counting dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    /// Publish queued changes oldest first until none are left.
    fn drain(&self) {
        let _reset = DrainGuard(&self.shared);
        loop {
            // No borrow may be held while listeners run.
            let (next, listeners) = {
                let mut shared = self.shared.borrow_mut();
                let Some(next) = shared.outbox.pop_front() else {
                    break;
                };
                (next, shared.live_listeners())
            };
            if listeners.is_empty() {
                continue;
            }
            Self::publish(&next, &listeners);
        }
    }

    fn publish(change: &Published<T>, listeners: &[Listener<T>]) {
        let version = change.version;
        let subscribers = listeners.len() as u64;
        let started = Instant::now();
        let _span = info_span!("guide.notify", version, subscribers).entered();
        for listener in listeners {
            listener(&change.value);
        }
        debug!(
            message = "guide.notify.done",
            version,
            subscribers,
            duration_us = started.elapsed().as_micros() as u64
        );
    }
}

/// Clears the draining state when a drain ends, including by unwinding.
struct DrainGuard<'a, T>(&'a RefCell<Shared<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.0.try_borrow_mut() {
            shared.draining = false;
            shared.outbox.clear();
        }
    }
}

/// Keeps an observer registered while alive.
///
/// The observable only holds a `Weak` to the callback; dropping this guard
/// releases the last strong reference.
pub struct Subscription {
    _listener: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
