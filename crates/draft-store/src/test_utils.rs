//! Deterministic test helpers
//!
//! Action logic is easiest to unit-test away from any UI wiring. These
//! helpers apply actions to a plain state value and hand back the final
//! state: no store setup, no subscribers, no interleaving.

use crate::action::{Action, AsyncAction};
use crate::reducer::reduce;
use crate::store::Store;
use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// Apply a sequence of actions to `state`, left to right, and return the
/// final state.
///
/// Pure left fold over [`reduce`]: dispatching `[a1, a2, a3]` is exactly
/// `reduce(reduce(reduce(s, a1), a2), a3)`.
pub fn test_dispatch_actions<S: Clone>(state: S, actions: Vec<Action<S>>) -> Result<S> {
    let mut current = Arc::new(state);
    for action in actions {
        current = reduce(&current, action)?;
    }
    Ok(Arc::try_unwrap(current).unwrap_or_else(|shared| (*shared).clone()))
}

/// Run a sequence of async coordinators against a private accumulator
/// store and return the final state.
///
/// Each coordinator is awaited to full completion, including all of its
/// internal dispatches, before the next one starts. Production dispatch
/// allows concurrent coordinators to interleave; this helper guarantees
/// they never do, so coordinator tests are deterministic.
pub async fn test_dispatch_async_actions<S>(state: S, actions: Vec<AsyncAction<S>>) -> Result<S>
where
    S: Clone + fmt::Debug + Send + Sync + 'static,
{
    let store = Store::new(state);
    let dispatch = store.dispatcher();

    for action in actions {
        action.run(dispatch.clone()).await?;
    }

    Ok((*store.state()).clone())
}
