#![forbid(unsafe_code)]

//! Reactive state containers.
//!
//! [`Observable`] publishes every value change to its subscribers in the
//! order changes are made. There is no batch scope: each sequencer
//! transition reaches observers as its own notification.

pub mod observable;

pub use observable::{Observable, Subscription};
