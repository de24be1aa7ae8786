//! Reactive Primitives
//!
//! This module implements the reactive substrate the field model is built
//! on: signals, memos, and effects, plus the runtime that propagates
//! updates between them.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a container for mutable state. When a signal's value is read
//! within a tracking context (such as a memo or effect), the signal
//! automatically registers that context as a dependent. When the signal's
//! value changes, the runtime notifies all dependents.
//!
//! ## Memos
//!
//! A Memo is a derived value that caches its result. It re-evaluates only
//! when one of its dependencies changes, and only when it is actually read.
//!
//! ## Effects
//!
//! An Effect is a side-effecting computation that re-runs whenever its
//! dependencies change. Effects are how the field model reacts to value
//! writes: the dirty-tracking observer and the configuration-flag
//! observers are effects.
//!
//! # Propagation model
//!
//! Propagation is synchronous and single-pass. A signal write marks every
//! transitively dependent memo as maybe-dirty (breadth-first over the
//! dependency edges), then runs each affected effect exactly once. Memos
//! recompute lazily on their next read. Within one pass, every observer
//! computes from a single consistent snapshot of the written value.

mod context;
mod effect;
mod memo;
mod runtime;
mod signal;
mod subscriber;

pub use context::TrackingContext;
pub use effect::Effect;
pub use memo::{Memo, MemoState};
pub use runtime::{Reactive, Runtime, RuntimeHandle};
pub use signal::Signal;
pub use subscriber::SubscriberId;
