//! Synchronous counter actions
//!
//! Each constructor returns a labelled action; the label matches the
//! constructor name so log lines point straight back here.

use crate::state::CounterState;
use draft_store::Action;

pub fn user_click_increment_button() -> Action<CounterState> {
    Action::new("user_click_increment_button", |s: &mut CounterState| {
        s.counter += 1;
    })
}

pub fn user_click_increment_button_with_number(amount: i64) -> Action<CounterState> {
    Action::new(
        "user_click_increment_button_with_number",
        move |s: &mut CounterState| {
            s.counter += amount;
        },
    )
}
