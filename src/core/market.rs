//! Provider abstractions for the external data sources

use anyhow::Result;
use async_trait::async_trait;

/// A source for one macro series (real yield, FX rate).
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetches the series, oldest observation first.
    async fn fetch_series(&self) -> Result<Vec<f64>>;
}

/// A keyed source serving multiple named series (oil, volatility).
#[async_trait]
pub trait RiskDataProvider: Send + Sync {
    async fn fetch_series(&self, series_id: &str) -> Result<Vec<f64>>;
}
