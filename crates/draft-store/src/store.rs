//! Store - holds the published state snapshot and runs the dispatch loop
//!
//! One store instance is one provider scope: it owns exactly one
//! reducer-driven state slot. Dispatch handles acquired from the store
//! hold weak references, so dropping the store discards the slot and
//! turns any outstanding handle into a logged no-op.

use crate::action::Action;
use crate::dispatcher::{AsyncDispatch, Dispatch};
use crate::reducer::reduce;
use crate::subscription::{Subscriber, Subscription};
use anyhow::Result;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Observability hook invoked once per successful dispatch.
pub type TransitionHook<S> = Box<dyn Fn(&Transition<S>) + Send + Sync>;

/// One successful state transition, passed to the observability hook.
///
/// Old and new snapshots are structurally independent for mutation
/// purposes; holding on to them past the hook invocation is safe.
#[derive(Debug, Clone)]
pub struct Transition<S> {
    /// Label of the action that produced the transition. Empty for
    /// anonymous actions.
    pub action_name: String,
    /// The snapshot that was current before the dispatch.
    pub old_state: Arc<S>,
    /// The snapshot published by the dispatch.
    pub new_state: Arc<S>,
}

/// Store construction options.
pub struct StoreConfig<S> {
    /// Hook invoked synchronously after every successful dispatch.
    pub on_state_change: Option<TransitionHook<S>>,
    /// When enabled, every transition is logged at debug level with the
    /// action label and the old/new state. Adjustable later via
    /// [`Store::set_debug`]; takes effect on the next dispatch.
    pub debug: bool,
}

impl<S> Default for StoreConfig<S> {
    fn default() -> Self {
        Self {
            on_state_change: None,
            debug: false,
        }
    }
}

pub(crate) struct StoreInner<S> {
    state: RwLock<Arc<S>>,
    subscribers: Mutex<Vec<Subscriber<S>>>,
    next_subscriber_id: AtomicU64,
    on_state_change: Option<TransitionHook<S>>,
    debug: AtomicBool,
}

/// State container over a caller-supplied state type.
///
/// The state is published as an `Arc<S>` snapshot and replaced wholesale
/// by every successful dispatch; no other code path edits it. Dispatch is
/// synchronous: the reducer run, the snapshot swap, the observability
/// hook and subscriber notification all happen inside the call.
///
/// Listeners and the hook run inside dispatch and must not dispatch
/// re-entrantly.
pub struct Store<S> {
    inner: Arc<StoreInner<S>>,
}

impl<S> Store<S>
where
    S: Clone + fmt::Debug + Send + Sync + 'static,
{
    /// Create a store with default configuration.
    pub fn new(initial_state: S) -> Self {
        Self::with_config(initial_state, StoreConfig::default())
    }

    /// Create a store with an observability hook and/or debug logging.
    pub fn with_config(initial_state: S, config: StoreConfig<S>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial_state)),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(0),
                on_state_change: config.on_state_change,
                debug: AtomicBool::new(config.debug),
            }),
        }
    }

    /// The current published snapshot.
    pub fn state(&self) -> Arc<S> {
        self.inner.state_snapshot()
    }

    /// Compute a derived value from the current snapshot.
    pub fn select<V>(&self, selector: impl Fn(&S) -> V) -> V {
        selector(&self.state())
    }

    /// Register a change-only subscription.
    ///
    /// The selector runs against every published state; the listener
    /// fires only when the derived value differs (`PartialEq`) from the
    /// previous computation. The initial derived value is memoized from
    /// the current snapshot at registration time, so the listener first
    /// fires on the first *change* after subscribing.
    pub fn subscribe<V, Sel, L>(&self, selector: Sel, mut listener: L) -> Subscription
    where
        V: PartialEq + Send + 'static,
        Sel: Fn(&S) -> V + Send + 'static,
        L: FnMut(&V) + Send + 'static,
    {
        let mut previous = selector(&self.state());
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);

        let notify = Box::new(move |state: &S| {
            let current = selector(state);
            if current != previous {
                previous = current;
                listener(&previous);
            }
        });

        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber { id, notify });

        let registry = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner
                    .subscribers
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|subscriber| subscriber.id != id);
            }
        })
    }

    /// Apply an action: run the reducer, publish the new snapshot, fire
    /// the observability hook, notify changed subscribers.
    ///
    /// On a mutator error the published state keeps its last good value
    /// and neither the hook nor any subscriber runs.
    pub fn dispatch(&self, action: Action<S>) -> Result<()> {
        self.inner.dispatch(action)
    }

    /// Acquire a dispatch capability bound to this store.
    pub fn dispatcher(&self) -> Dispatch<S> {
        Dispatch::new(Arc::downgrade(&self.inner))
    }

    /// Acquire an async-dispatch capability bound to this store.
    pub fn async_dispatcher(&self) -> AsyncDispatch<S> {
        AsyncDispatch::new(self.dispatcher())
    }

    /// Toggle per-transition debug logging. Takes effect on the next
    /// dispatch.
    pub fn set_debug(&self, enabled: bool) {
        self.inner.debug.store(enabled, Ordering::Relaxed);
    }

    /// Whether per-transition debug logging is enabled.
    pub fn debug(&self) -> bool {
        self.inner.debug.load(Ordering::Relaxed)
    }
}

impl<S> StoreInner<S>
where
    S: Clone + fmt::Debug + Send + Sync + 'static,
{
    pub(crate) fn state_snapshot(&self) -> Arc<S> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn dispatch(&self, action: Action<S>) -> Result<()> {
        let action_name = action.name().to_string();

        // The write lock is held across the reducer run so a dispatch is
        // atomic: no other dispatch can interleave inside it.
        let (old_state, new_state) = {
            let mut slot = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let old_state = Arc::clone(&slot);
            let new_state = reduce(&old_state, action)?;
            *slot = Arc::clone(&new_state);
            (old_state, new_state)
        };

        if self.debug.load(Ordering::Relaxed) {
            let display_name = if action_name.is_empty() {
                "(anonymous)"
            } else {
                action_name.as_str()
            };
            log::debug!("Action: {display_name}");
            log::debug!("Previous state (before dispatch action): {old_state:?}");
            log::debug!("Current state (after dispatch action): {new_state:?}");
        }

        if let Some(hook) = &self.on_state_change {
            hook(&Transition {
                action_name,
                old_state,
                new_state: Arc::clone(&new_state),
            });
        }

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for subscriber in subscribers.iter_mut() {
            (subscriber.notify)(&new_state);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq)]
    struct TestState {
        counter: i64,
        label: String,
    }

    fn test_store() -> Store<TestState> {
        Store::new(TestState {
            counter: 0,
            label: "idle".to_string(),
        })
    }

    fn increment() -> Action<TestState> {
        Action::new("increment", |s: &mut TestState| s.counter += 1)
    }

    fn set_label(label: &'static str) -> Action<TestState> {
        Action::new("set_label", move |s: &mut TestState| {
            s.label = label.to_string();
        })
    }

    #[test]
    fn dispatch_publishes_a_new_snapshot() {
        let store = test_store();
        let before = store.state();

        store.dispatch(increment()).unwrap();

        assert_eq!(before.counter, 0);
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn select_reads_the_current_snapshot() {
        let store = test_store();
        store.dispatch(increment()).unwrap();
        assert_eq!(store.select(|s| s.counter), 1);
    }

    #[test]
    fn subscribers_of_unrelated_slices_are_not_notified() {
        let store = test_store();

        let counter_calls = Arc::new(AtomicUsize::new(0));
        let label_calls = Arc::new(AtomicUsize::new(0));

        let _counter_sub = store.subscribe(|s: &TestState| s.counter, {
            let calls = Arc::clone(&counter_calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });
        let _label_sub = store.subscribe(|s: &TestState| s.label.clone(), {
            let calls = Arc::clone(&label_calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.dispatch(increment()).unwrap();

        assert_eq!(counter_calls.load(Ordering::SeqCst), 1);
        assert_eq!(label_calls.load(Ordering::SeqCst), 0);

        store.dispatch(set_label("busy")).unwrap();

        assert_eq!(counter_calls.load(Ordering::SeqCst), 1);
        assert_eq!(label_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_receives_the_new_derived_value() {
        let store = test_store();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = store.subscribe(|s: &TestState| s.counter, {
            let seen = Arc::clone(&seen);
            move |counter| seen.lock().unwrap().push(*counter)
        });

        store.dispatch(increment()).unwrap();
        store.dispatch(increment()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn noop_dispatch_does_not_notify() {
        let store = test_store();

        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe(|s: &TestState| s.counter, {
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        store
            .dispatch(Action::new("noop", |_: &mut TestState| {}))
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancelled_subscription_stops_notifications() {
        let store = test_store();

        let calls = Arc::new(AtomicUsize::new(0));
        let sub = store.subscribe(|s: &TestState| s.counter, {
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.dispatch(increment()).unwrap();
        sub.cancel();
        store.dispatch(increment()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let store = test_store();

        let calls = Arc::new(AtomicUsize::new(0));
        {
            let _sub = store.subscribe(|s: &TestState| s.counter, {
                let calls = Arc::clone(&calls);
                move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            });
            store.dispatch(increment()).unwrap();
        }
        store.dispatch(increment()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hook_fires_once_per_dispatch_with_the_transition() {
        let transitions = Arc::new(Mutex::new(Vec::new()));
        let store = Store::with_config(
            TestState {
                counter: 0,
                label: "idle".to_string(),
            },
            StoreConfig {
                on_state_change: Some(Box::new({
                    let transitions = Arc::clone(&transitions);
                    move |t: &Transition<TestState>| {
                        transitions.lock().unwrap().push((
                            t.action_name.clone(),
                            t.old_state.counter,
                            t.new_state.counter,
                        ));
                    }
                })),
                debug: false,
            },
        );

        store.dispatch(increment()).unwrap();
        store.dispatch(increment()).unwrap();

        assert_eq!(
            *transitions.lock().unwrap(),
            vec![("increment".to_string(), 0, 1), ("increment".to_string(), 1, 2)]
        );
    }

    #[test]
    fn failing_dispatch_keeps_state_and_skips_hook_and_subscribers() {
        let hook_calls = Arc::new(AtomicUsize::new(0));
        let store = Store::with_config(
            TestState {
                counter: 0,
                label: "idle".to_string(),
            },
            StoreConfig {
                on_state_change: Some(Box::new({
                    let calls = Arc::clone(&hook_calls);
                    move |_: &Transition<TestState>| {
                        calls.fetch_add(1, Ordering::SeqCst);
                    }
                })),
                debug: false,
            },
        );

        let sub_calls = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe(|s: &TestState| s.counter, {
            let calls = Arc::clone(&sub_calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let result = store.dispatch(Action::try_new("broken", |s: &mut TestState| {
            s.counter = 99;
            anyhow::bail!("boom")
        }));

        assert!(result.is_err());
        assert_eq!(store.state().counter, 0);
        assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
        assert_eq!(sub_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_toggle_is_per_store() {
        let store_a = test_store();
        let store_b = test_store();

        store_a.set_debug(true);

        assert!(store_a.debug());
        assert!(!store_b.debug());
    }
}
