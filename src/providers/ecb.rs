use crate::core::market::SeriesProvider;
use crate::providers::util::{clean_observations, coerce_f64};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// ECB Data Portal key for the daily USD-per-EUR reference rate.
const SERIES_KEY: &str = "0:0:0:0:0";
const DATA_PATH: &str = "/api/data/EXR/D.USD.EUR.SP00.A";

/// ECB SDW provider for the EUR/USD rate.
///
/// The upstream series quotes USD per EUR; every observation is inverted to
/// the EUR-per-USD rate the scoring model expects. This assumes the quoting
/// convention never changes upstream; nothing here would catch a flip.
pub struct EcbProvider {
    base_url: String,
}

impl EcbProvider {
    pub fn new(base_url: &str) -> Self {
        EcbProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EcbResponse {
    #[serde(rename = "dataSets", default)]
    data_sets: Vec<EcbDataSet>,
}

#[derive(Debug, Deserialize)]
struct EcbDataSet {
    #[serde(default)]
    series: HashMap<String, EcbSeries>,
}

#[derive(Debug, Deserialize)]
struct EcbSeries {
    #[serde(default)]
    observations: HashMap<String, Vec<serde_json::Value>>,
}

fn extract_rates(observations: HashMap<String, Vec<serde_json::Value>>) -> Vec<f64> {
    // Observation keys are stringified indices; "10" sorts before "2"
    // lexically, so order by the parsed index.
    let mut indexed: Vec<(usize, f64)> = observations
        .into_iter()
        .filter_map(|(index, entry)| {
            let index = index.parse::<usize>().ok()?;
            let value = entry.first().and_then(coerce_f64)?;
            Some((index, value))
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    // USD per EUR -> EUR per USD. Zero and negative quotes do not survive
    // the inversion.
    clean_observations(
        indexed
            .into_iter()
            .map(|(_, value)| 1.0 / value)
            .filter(|rate| *rate > 0.0)
            .collect(),
    )
}

#[async_trait]
impl SeriesProvider for EcbProvider {
    async fn fetch_series(&self) -> Result<Vec<f64>> {
        let url = format!(
            "{}{}?lastNObservations=30&format=JSON&delimiter=,&decimal=.",
            self.base_url, DATA_PATH
        );
        debug!("Requesting EURUSD data from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("goldradar/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .context("Failed to send EURUSD request")?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for EURUSD", response.status()));
        }

        let mut payload: EcbResponse = response
            .json()
            .await
            .context("Failed to parse ECB response")?;

        let series = payload
            .data_sets
            .first_mut()
            .and_then(|set| set.series.remove(SERIES_KEY))
            .ok_or_else(|| anyhow!("No EURUSD series found in ECB response"))?;

        Ok(extract_rates(series.observations))
    }
}
