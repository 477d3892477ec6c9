use crate::core::market::SeriesProvider;
use crate::providers::util::{clean_observations, coerce_f64};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

const QUERY: &str = "fields=record_date,security_desc,real_yield\
&filter=security_desc:eq:10%20Year&sort=record_date&format=json&page[size]=30";

/// U.S. Treasury FiscalData provider for the daily 10-year real yield.
///
/// The dataset has moved between API versions; candidate paths are tried in
/// order and the first success with a data payload wins.
pub struct FiscalDataProvider {
    base_url: String,
}

impl FiscalDataProvider {
    pub fn new(base_url: &str) -> Self {
        FiscalDataProvider {
            base_url: base_url.to_string(),
        }
    }

    fn candidate_urls(&self) -> [String; 2] {
        [
            format!(
                "{}/v2/accounting/od/real_yield_curve_rates?{}",
                self.base_url, QUERY
            ),
            format!(
                "{}/v1/accounting/od/real_yield_curve?{}",
                self.base_url, QUERY
            ),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct FiscalDataResponse {
    data: Option<Vec<RealYieldRow>>,
}

#[derive(Debug, Deserialize)]
struct RealYieldRow {
    #[serde(default)]
    record_date: Option<String>,
    #[serde(default)]
    real_yield: Option<serde_json::Value>,
}

fn extract_yields(rows: Vec<RealYieldRow>) -> Vec<f64> {
    let mut dated: Vec<(NaiveDate, f64)> = rows
        .into_iter()
        .filter_map(|row| {
            let date = row
                .record_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;
            let value = row.real_yield.as_ref().and_then(coerce_f64)?;
            Some((date, value))
        })
        .collect();

    // Oldest first; the API sorts by record_date already, a stable sort
    // keeps same-day rows in their served order.
    dated.sort_by_key(|(date, _)| *date);
    clean_observations(dated.into_iter().map(|(_, value)| value).collect())
}

#[async_trait]
impl SeriesProvider for FiscalDataProvider {
    async fn fetch_series(&self) -> Result<Vec<f64>> {
        let client = reqwest::Client::builder()
            .user_agent("goldradar/1.0")
            .build()?;

        for url in self.candidate_urls() {
            debug!("Requesting real yield data from {}", url);
            let response = match client.get(&url).send().await {
                Ok(response) => response,
                Err(e) => {
                    debug!("Real yield request failed: {e}. Trying next endpoint");
                    continue;
                }
            };
            if !response.status().is_success() {
                debug!(
                    "Real yield endpoint returned {}. Trying next endpoint",
                    response.status()
                );
                continue;
            }

            let payload: FiscalDataResponse = response
                .json()
                .await
                .context("Failed to parse FiscalData response")?;
            if let Some(rows) = payload.data {
                return Ok(extract_yields(rows));
            }
            debug!("Real yield response has no data payload. Trying next endpoint");
        }

        Err(anyhow!("No real yield endpoint returned data"))
    }
}
