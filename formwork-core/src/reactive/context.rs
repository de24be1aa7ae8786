//! Tracking context.
//!
//! The tracking context records which computation is currently executing.
//! When a signal or memo is read while a context is active, the read is
//! attributed to that computation, which is how dependency edges are
//! discovered without explicit wiring.
//!
//! The context is a thread-local stack so that nested computations (a memo
//! read from inside an effect, for example) each track their own reads.

use std::cell::RefCell;

use super::SubscriberId;

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<SubscriberId>> = const { RefCell::new(Vec::new()) };
}

/// Guard for an active tracking frame.
///
/// Entering pushes the subscriber onto the thread-local stack; dropping the
/// guard pops it, so the stack stays balanced even if the computation
/// panics.
pub struct TrackingContext {
    subscriber_id: SubscriberId,
}

impl TrackingContext {
    /// Enter a tracking frame for the given subscriber.
    ///
    /// While the returned guard is alive, reactive reads on this thread are
    /// attributed to `subscriber_id`.
    pub fn enter(subscriber_id: SubscriberId) -> Self {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().push(subscriber_id));
        Self { subscriber_id }
    }

    /// The subscriber whose computation is currently running, if any.
    pub fn current() -> Option<SubscriberId> {
        CONTEXT_STACK.with(|stack| stack.borrow().last().copied())
    }
}

impl Drop for TrackingContext {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();
            debug_assert_eq!(
                popped,
                Some(self.subscriber_id),
                "tracking context stack out of balance"
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reports_current_subscriber() {
        let id = SubscriberId::new();

        assert!(TrackingContext::current().is_none());
        {
            let _ctx = TrackingContext::enter(id);
            assert_eq!(TrackingContext::current(), Some(id));
        }
        assert!(TrackingContext::current().is_none());
    }

    #[test]
    fn nested_contexts_restore_outer_frame() {
        let outer = SubscriberId::new();
        let inner = SubscriberId::new();

        let _outer_ctx = TrackingContext::enter(outer);
        {
            let _inner_ctx = TrackingContext::enter(inner);
            assert_eq!(TrackingContext::current(), Some(inner));
        }
        assert_eq!(TrackingContext::current(), Some(outer));
    }
}
