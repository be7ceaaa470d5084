//! Stubbed network API
//!
//! Stands in for a real backend: each call just sleeps for its configured
//! latency. The store treats these as opaque asynchronous operations that
//! may succeed or fail; `simulate_failure` exercises the failure paths.

use crate::config::ApiConfig;
use anyhow::{bail, Result};
use std::time::Duration;
use tokio::time::sleep;

/// Counter value the "server" hands out to fresh clients.
pub const DEFAULT_COUNTER: i64 = 10;

/// Fetch the default counter value. ~1000ms.
pub async fn get_default_counter(config: &ApiConfig) -> Result<i64> {
    sleep(Duration::from_millis(config.default_counter_latency_ms)).await;
    if config.simulate_failure {
        bail!("simulated network failure");
    }
    Ok(DEFAULT_COUNTER)
}

/// Tell the "server" the counter decreased. ~500ms, no return value.
pub async fn decrease_counter(config: &ApiConfig, _amount: Option<i64>) -> Result<()> {
    sleep(Duration::from_millis(config.decrease_latency_ms)).await;
    if config.simulate_failure {
        bail!("simulated network failure");
    }
    Ok(())
}
