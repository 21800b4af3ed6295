//! Rendered chart cache.
//!
//! `ChartCache` is the store the chart pipeline reads before fetching and
//! writes after a successful render. A missing or expired key is a plain
//! miss, not an error.

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryCache;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ChartCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` for `ttl`. Last writer wins.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
