#![forbid(unsafe_code)]

//! Deferred `transition → active` promotion.
//!
//! Entering a step arms a one-shot timer. The timer is represented by a
//! [`PromotionTicket`]; firing a ticket only has an effect while it is still
//! the armed one. Re-arming or cancelling bumps the generation, so a
//! callback that was scheduled for an earlier step becomes a no-op instead
//! of promoting the wrong step.
//!
//! Time only moves when the host says so ([`PromotionTimer::elapse`]), which
//! keeps the sequencer deterministic under test.

use std::time::Duration;

/// Handle to one armed promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromotionTicket {
    generation: u64,
    step_index: usize,
    delay: Duration,
}

impl PromotionTicket {
    /// Monotonic arm counter this ticket was issued under.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Step the ticket promotes.
    #[inline]
    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    /// Delay the host should wait before firing.
    #[inline]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: PromotionTicket,
    remaining: Duration,
}

/// One-shot, supersedable timer for the sequencer's timed promotion.
#[derive(Debug, Default)]
pub struct PromotionTimer {
    generation: u64,
    pending: Option<Pending>,
}

impl PromotionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for `step_index`, superseding any pending ticket.
    pub fn arm(&mut self, step_index: usize, delay: Duration) -> PromotionTicket {
        self.generation += 1;
        let ticket = PromotionTicket {
            generation: self.generation,
            step_index,
            delay,
        };
        self.pending = Some(Pending {
            ticket,
            remaining: delay,
        });
        ticket
    }

    /// Drop the pending ticket, if any. Outstanding copies become stale.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
        }
    }

    /// The currently armed ticket.
    pub fn pending(&self) -> Option<PromotionTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Time left before the armed ticket is due.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    /// Whether `ticket` is the one currently armed.
    pub fn is_current(&self, ticket: &PromotionTicket) -> bool {
        self.pending.is_some_and(|p| p.ticket == *ticket)
    }

    /// Consume `ticket` if it is still armed. Returns `false` for stale tickets.
    pub fn take(&mut self, ticket: &PromotionTicket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Advance the clock. Returns the armed ticket once it is due; the
    /// ticket stays armed until [`PromotionTimer::take`] consumes it.
    pub fn elapse(&mut self, elapsed: Duration) -> Option<PromotionTicket> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        pending.remaining.is_zero().then_some(pending.ticket)
    }
}
