//! # draft-store
//!
//! A small state container: one immutable application state per store,
//! updated through labelled actions that mutate a *draft* copy, with
//! selector-based subscriptions that only fire when the selected slice of
//! state actually changed.
//!
//! ## Design Principles
//!
//! - **One snapshot, replaced wholesale.** The store publishes the current
//!   state as an `Arc<S>`. Nothing ever edits a published snapshot in
//!   place; every dispatch produces a new snapshot via [`reduce`].
//! - **Drafts stay inside the reducer.** An [`Action`] receives `&mut S`
//!   for a clone of the current state. If the action fails, the draft is
//!   discarded and the published state is untouched.
//! - **Change-only notification.** A subscription pairs a selector with a
//!   listener; the listener runs only when the derived value differs from
//!   the previous computation. Consumers of unrelated slices are never
//!   woken.
//! - **Observable transitions.** An optional hook receives the action
//!   label plus the old and new snapshots once per successful dispatch,
//!   which is enough to log, diff, or record every transition.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use draft_store::{Action, Store};
//!
//! let store = Store::new(CounterState::default());
//!
//! let _sub = store.subscribe(|s: &CounterState| s.counter, |counter| {
//!     println!("counter is now {counter}");
//! });
//!
//! store.dispatch(Action::new("increment", |s: &mut CounterState| {
//!     s.counter += 1;
//! }))?;
//! ```
//!
//! Async coordinators ([`AsyncAction`]) receive a [`Dispatch`] handle and
//! interleave awaited side effects with synchronous dispatches. They are
//! executed through [`Store::async_dispatcher`] or, deterministically, via
//! [`test_utils::test_dispatch_async_actions`].

pub mod action;
pub mod dispatcher;
pub mod reducer;
pub mod store;
pub mod subscription;
pub mod test_utils;

// Re-export commonly used types
pub use action::{Action, AsyncAction};
pub use dispatcher::{AsyncDispatch, Dispatch};
pub use reducer::reduce;
pub use store::{Store, StoreConfig, Transition, TransitionHook};
pub use subscription::Subscription;
