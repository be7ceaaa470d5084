//! Asynchronous counter actions
//!
//! Coordinators: each one interleaves a stub API call or timer with
//! ordinary dispatches. Failure of the awaited side effect is handled
//! locally by dispatching a compensating action, so the state never
//! keeps a stale loading flag.

use crate::api;
use crate::config::ApiConfig;
use crate::state::CounterState;
use draft_store::{Action, AsyncAction};
use std::time::Duration;

/// Fetch the default counter value and leave the initializing screen.
pub fn initialize_application(api: ApiConfig) -> AsyncAction<CounterState> {
    AsyncAction::new("initialize_application", move |dispatch| async move {
        match api::get_default_counter(&api).await {
            Ok(counter) => dispatch.dispatch(Action::new(
                "after_getting_default_counter_success",
                move |s: &mut CounterState| {
                    s.is_initializing = false;
                    s.counter = counter;
                },
            )),
            Err(e) => {
                log::warn!("Failed to fetch the default counter: {e:#}");
                dispatch.dispatch(Action::new(
                    "after_getting_default_counter_failure",
                    |s: &mut CounterState| {
                        s.is_initializing = false;
                    },
                ))
            }
        }
    })
}

/// Decrement by one after a plain 500ms timer.
pub fn user_click_delay_decrement_button() -> AsyncAction<CounterState> {
    AsyncAction::new("user_click_delay_decrement_button", |dispatch| async move {
        dispatch.dispatch(Action::new(
            "before_decreasing_counter",
            |s: &mut CounterState| {
                s.is_loading = true;
            },
        ))?;

        tokio::time::sleep(Duration::from_millis(500)).await;

        dispatch.dispatch(Action::new(
            "after_decreasing_counter_success",
            |s: &mut CounterState| {
                s.counter -= 1;
                s.is_loading = false;
            },
        ))
    })
}

/// Decrement by `amount` after telling the stub API about it.
pub fn user_click_delay_decrement_button_with_number(
    amount: i64,
    api: ApiConfig,
) -> AsyncAction<CounterState> {
    AsyncAction::new(
        "user_click_delay_decrement_button_with_number",
        move |dispatch| async move {
            dispatch.dispatch(Action::new(
                "before_decreasing_counter",
                |s: &mut CounterState| {
                    s.is_loading = true;
                },
            ))?;

            match api::decrease_counter(&api, Some(amount)).await {
                Ok(()) => dispatch.dispatch(Action::new(
                    "after_decreasing_counter_success",
                    move |s: &mut CounterState| {
                        s.counter -= amount;
                        s.is_loading = false;
                    },
                )),
                Err(e) => {
                    log::warn!("Decrease counter call failed: {e:#}");
                    dispatch.dispatch(Action::new(
                        "after_decreasing_counter_failure",
                        |s: &mut CounterState| {
                            s.is_loading = false;
                        },
                    ))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{user_click_increment_button, user_click_increment_button_with_number};
    use draft_store::test_utils::{test_dispatch_actions, test_dispatch_async_actions};
    use pretty_assertions::assert_eq;

    fn instant_api() -> ApiConfig {
        ApiConfig {
            default_counter_latency_ms: 0,
            decrease_latency_ms: 0,
            simulate_failure: false,
        }
    }

    fn failing_api() -> ApiConfig {
        ApiConfig {
            simulate_failure: true,
            ..instant_api()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_fetches_the_default_counter() {
        let state = test_dispatch_async_actions(
            CounterState::default(),
            vec![initialize_application(ApiConfig::default())],
        )
        .await
        .unwrap();

        assert_eq!(
            state,
            CounterState {
                is_initializing: false,
                is_loading: false,
                counter: api::DEFAULT_COUNTER,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_failure_only_clears_the_initializing_flag() {
        let state =
            test_dispatch_async_actions(CounterState::default(), vec![initialize_application(failing_api())])
                .await
                .unwrap();

        assert_eq!(
            state,
            CounterState {
                is_initializing: false,
                is_loading: false,
                counter: 0,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn counter_scenario_ends_at_minus_one() {
        // {counter: 0} -> +1 -> +2 -> delayed -1 -> delayed -3 -> {counter: -1}
        let state = test_dispatch_actions(
            CounterState {
                is_initializing: false,
                ..CounterState::default()
            },
            vec![
                user_click_increment_button(),
                user_click_increment_button_with_number(2),
            ],
        )
        .unwrap();
        assert_eq!(state.counter, 3);

        let state = test_dispatch_async_actions(
            state,
            vec![
                user_click_delay_decrement_button(),
                user_click_delay_decrement_button_with_number(3, ApiConfig::default()),
            ],
        )
        .await
        .unwrap();

        assert_eq!(state.counter, -1);
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_decrement_compensates_the_loading_flag() {
        let initial = CounterState {
            is_initializing: false,
            is_loading: false,
            counter: 3,
        };

        let state = test_dispatch_async_actions(
            initial,
            vec![user_click_delay_decrement_button_with_number(3, failing_api())],
        )
        .await
        .unwrap();

        assert!(!state.is_loading);
        assert_eq!(state.counter, 3);
    }
}
