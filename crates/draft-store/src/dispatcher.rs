//! Dispatch capabilities
//!
//! A [`Dispatch`] handle applies actions to the store it was acquired
//! from; an [`AsyncDispatch`] handle runs async coordinators against it.
//! Both hold weak references: once the owning store is dropped, a
//! dispatch becomes a logged no-op instead of a crash, which keeps test
//! harnesses and late-resuming coordinators simple.

use crate::action::{Action, AsyncAction};
use crate::store::StoreInner;
use anyhow::Result;
use std::fmt;
use std::sync::Weak;

/// Synchronous dispatch capability bound to one store.
///
/// Calling [`Dispatch::dispatch`] runs the reducer and notifies
/// subscribers before returning. The handle is cloneable and can be moved
/// into spawned tasks.
pub struct Dispatch<S> {
    inner: Weak<StoreInner<S>>,
}

impl<S> Dispatch<S> {
    pub(crate) fn new(inner: Weak<StoreInner<S>>) -> Self {
        Self { inner }
    }
}

impl<S> Clone for Dispatch<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S> Dispatch<S>
where
    S: Clone + fmt::Debug + Send + Sync + 'static,
{
    /// Apply one action via the owning store.
    ///
    /// When the store has been dropped the action is ignored and `Ok(())`
    /// is returned; the drop is logged so a stray handle is visible in
    /// the log file rather than silent.
    pub fn dispatch(&self, action: Action<S>) -> Result<()> {
        match self.inner.upgrade() {
            Some(store) => store.dispatch(action),
            None => {
                log::warn!(
                    "Dispatch: store is gone, ignoring action '{}'",
                    action.name()
                );
                Ok(())
            }
        }
    }
}

impl<S> fmt::Debug for Dispatch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Async-dispatch capability bound to one store.
///
/// Wraps a [`Dispatch`] and runs [`AsyncAction`] coordinators against it.
/// The store does not serialize concurrent coordinators: two running at
/// once interleave their individual dispatches in whatever order they are
/// issued, each dispatch individually atomic.
pub struct AsyncDispatch<S> {
    dispatch: Dispatch<S>,
}

impl<S> AsyncDispatch<S> {
    pub(crate) fn new(dispatch: Dispatch<S>) -> Self {
        Self { dispatch }
    }
}

impl<S> Clone for AsyncDispatch<S> {
    fn clone(&self) -> Self {
        Self {
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<S> AsyncDispatch<S>
where
    S: Clone + fmt::Debug + Send + Sync + 'static,
{
    /// Run one coordinator to completion.
    ///
    /// Resolves when the coordinator returns; an error from the
    /// coordinator propagates to the caller. Any state the coordinator
    /// dispatched before failing stays published (compensating for a
    /// failed side effect is the coordinator's job, by convention).
    pub async fn run(&self, action: AsyncAction<S>) -> Result<()> {
        let name = action.name().to_string();
        log::debug!("Async action started: {name}");

        let result = action.run(self.dispatch.clone()).await;
        match &result {
            Ok(()) => log::debug!("Async action finished: {name}"),
            Err(e) => log::debug!("Async action failed: {name}: {e:#}"),
        }
        result
    }
}

impl<S> fmt::Debug for AsyncDispatch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncDispatch")
            .field("dispatch", &self.dispatch)
            .finish()
    }
}
