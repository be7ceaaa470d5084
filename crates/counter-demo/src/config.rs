//! Demo configuration
//!
//! Configuration loaded from counter-demo.toml in the working directory.

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "counter-demo.toml";

/// Demo configuration loaded from counter-demo.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DemoConfig {
    /// Event poll timeout for the render loop, in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Enable per-transition debug logging in the store
    #[serde(default)]
    pub debug_store: bool,

    /// Stub API behavior
    #[serde(default)]
    pub api: ApiConfig,
}

/// Stub API behavior
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Latency of the "fetch default counter" call, in milliseconds
    #[serde(default = "default_counter_latency_ms")]
    pub default_counter_latency_ms: u64,

    /// Latency of the "decrease counter" call, in milliseconds
    #[serde(default = "default_decrease_latency_ms")]
    pub decrease_latency_ms: u64,

    /// Make every API call fail, for exercising the compensation paths
    #[serde(default)]
    pub simulate_failure: bool,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_counter_latency_ms() -> u64 {
    1000
}

fn default_decrease_latency_ms() -> u64 {
    500
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            debug_store: false,
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_counter_latency_ms: default_counter_latency_ms(),
            decrease_latency_ms: default_decrease_latency_ms(),
            simulate_failure: false,
        }
    }
}

impl DemoConfig {
    /// Load config from the working directory, or use defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse {CONFIG_FILE}: {e}, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
