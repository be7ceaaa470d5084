//! Action types
//!
//! An [`Action`] is a labelled mutation of a state draft. An
//! [`AsyncAction`] is a labelled coordinator that receives a dispatch
//! handle and issues zero or more actions over time, interleaved with
//! awaited side effects.
//!
//! Labels are explicit strings attached at construction time. They exist
//! for logging and for the observability hook; an empty label triggers an
//! advisory warning in the reducer but never blocks the mutation.

use crate::dispatcher::Dispatch;
use anyhow::Result;
use futures::future::BoxFuture;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;

/// A labelled, single-use mutation of a state draft.
///
/// The mutator runs against a draft clone of the current state inside
/// [`reduce`](crate::reducer::reduce); it never sees the published
/// snapshot itself.
pub struct Action<S> {
    name: Cow<'static, str>,
    mutate: Box<dyn FnOnce(&mut S) -> Result<()> + Send>,
}

impl<S> Action<S> {
    /// Create an action from an infallible mutator.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, mutate: F) -> Self
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        Self {
            name: name.into(),
            mutate: Box::new(move |draft| {
                mutate(draft);
                Ok(())
            }),
        }
    }

    /// Create an action from a fallible mutator.
    ///
    /// When the mutator returns an error, the dispatch call surfaces it
    /// and the published state keeps its last good value.
    pub fn try_new<F>(name: impl Into<Cow<'static, str>>, mutate: F) -> Self
    where
        F: FnOnce(&mut S) -> Result<()> + Send + 'static,
    {
        Self {
            name: name.into(),
            mutate: Box::new(mutate),
        }
    }

    /// Create an action without a label.
    ///
    /// Unlabelled actions work, but the reducer logs an advisory warning
    /// for them in debug builds. Prefer [`Action::new`] with a label.
    pub fn anonymous<F>(mutate: F) -> Self
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        Self::new("", mutate)
    }

    /// The action's label. Empty for anonymous actions.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the mutator to a draft. Consumes the action.
    pub(crate) fn apply(self, draft: &mut S) -> Result<()> {
        (self.mutate)(draft)
    }
}

impl<S> fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// A labelled asynchronous coordinator.
///
/// The coordinator receives a [`Dispatch`] handle and performs an ordered
/// sequence of awaited side effects (network calls, timers) interleaved
/// with synchronous dispatches. Each dispatched [`Action`] is individually
/// atomic; the store gives no atomicity guarantee across the whole
/// coordinator.
///
/// By convention a coordinator catches failures of its awaited side
/// effects and dispatches a compensating action (e.g. clearing a loading
/// flag) instead of leaving the state inconsistent. The store does not
/// enforce this.
pub struct AsyncAction<S> {
    name: Cow<'static, str>,
    coordinator: Box<dyn FnOnce(Dispatch<S>) -> BoxFuture<'static, Result<()>> + Send>,
}

impl<S> AsyncAction<S> {
    /// Create an async action from a coordinator closure.
    pub fn new<F, Fut>(name: impl Into<Cow<'static, str>>, coordinator: F) -> Self
    where
        F: FnOnce(Dispatch<S>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            coordinator: Box::new(move |dispatch| Box::pin(coordinator(dispatch))),
        }
    }

    /// The coordinator's label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the coordinator to completion against the given dispatch
    /// handle. Consumes the action.
    pub async fn run(self, dispatch: Dispatch<S>) -> Result<()> {
        (self.coordinator)(dispatch).await
    }
}

impl<S> fmt::Debug for AsyncAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncAction")
            .field("name", &self.name)
            .finish()
    }
}
