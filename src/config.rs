//! # Configuration
//!
//! Runtime knobs, read from the environment by [`ShopConfig::from_env`].
//!
//! | variable | default |
//! |----------|---------|
//! | `SHOP_SESSION_TTL_MINUTES` | 1440 (24 hours) |
//! | `SHOP_LOW_STOCK_THRESHOLD` | 5 |
//! | `SHOP_SIMULATED_LATENCY` | false |
//! | `SHOP_STORE_BUFFER` | 64 |

use anyhow::Context;
use chrono::Duration;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Lifetime of a session from login.
    pub session_ttl: Duration,
    /// Products with stock strictly below this count as low stock.
    pub low_stock_threshold: u32,
    /// Sleep before each operation the way a remote API would respond.
    pub simulated_latency: bool,
    /// Capacity of the store actor's request channel.
    pub store_buffer: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::hours(24),
            low_stock_threshold: 5,
            simulated_latency: false,
            store_buffer: 64,
        }
    }
}

impl ShopConfig {
    /// Defaults overridden by any `SHOP_*` variables that are set.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(minutes) = read_var::<i64>("SHOP_SESSION_TTL_MINUTES")? {
            anyhow::ensure!(minutes > 0, "SHOP_SESSION_TTL_MINUTES must be positive");
            config.session_ttl = Duration::minutes(minutes);
        }
        if let Some(threshold) = read_var("SHOP_LOW_STOCK_THRESHOLD")? {
            config.low_stock_threshold = threshold;
        }
        if let Some(latency) = read_var("SHOP_SIMULATED_LATENCY")? {
            config.simulated_latency = latency;
        }
        if let Some(buffer) = read_var::<usize>("SHOP_STORE_BUFFER")? {
            anyhow::ensure!(buffer > 0, "SHOP_STORE_BUFFER must be positive");
            config.store_buffer = buffer;
        }

        Ok(config)
    }
}

fn read_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("cannot read {name}")),
    }
}
