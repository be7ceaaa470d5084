//! Counter application state

use serde::Serialize;

/// Application state
///
/// `Serialize` is derived so transitions can be rendered by the
/// state-diff logger hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterState {
    /// True until the default counter value has been fetched.
    pub is_initializing: bool,
    /// True while a delayed decrement is in flight.
    pub is_loading: bool,
    pub counter: i64,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            is_initializing: true,
            is_loading: false,
            counter: 0,
        }
    }
}
