//! Selector subscriptions
//!
//! A subscription pairs a pure selector with a listener. On every
//! published state the selector recomputes the derived value; the
//! listener fires only when that value differs from the previous
//! computation. Consumers of unrelated state slices are never notified.

/// A registered subscriber entry: memoized projection plus listener,
/// erased into a single notify closure.
pub(crate) struct Subscriber<S> {
    pub(crate) id: u64,
    pub(crate) notify: Box<dyn FnMut(&S) + Send>,
}

/// Guard for a registered subscription.
///
/// Dropping the guard (or calling [`Subscription::cancel`]) removes the
/// subscriber from the store's registry. Outliving the store is fine; the
/// cancellation then has nothing left to do.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe the listener now instead of at drop time.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
