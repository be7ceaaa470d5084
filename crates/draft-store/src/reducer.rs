//! Draft-update reducer
//!
//! Pure function that produces a new state snapshot from the current one
//! plus an action. The action mutates a draft clone in place; the caller's
//! snapshot is never touched.

use crate::action::Action;
use anyhow::Result;
use std::sync::Arc;

/// Produce a new snapshot by applying `action` to a draft of `state`.
///
/// The draft is a clone of `*state`. State types that wrap large
/// substructures in `Arc` get structural sharing for free: the clone
/// copies only the spine, and untouched substructure stays shared with
/// the previous snapshot.
///
/// On error the draft is discarded, `state` keeps its value, and the
/// error propagates to the dispatch call site. There is no partial
/// application: the published snapshot and the draft are separate values
/// at all times.
pub fn reduce<S: Clone>(state: &Arc<S>, action: Action<S>) -> Result<Arc<S>> {
    // Advisory only; release builds stay quiet.
    if cfg!(debug_assertions) && action.name().is_empty() {
        log::warn!("Action name is missing. You should always give a name for the action.");
    }

    let mut draft = S::clone(state);
    action.apply(&mut draft)?;
    Ok(Arc::new(draft))
}
