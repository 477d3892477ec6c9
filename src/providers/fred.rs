use crate::core::market::RiskDataProvider;
use crate::core::series::HISTORY_CAP;
use crate::providers::util::clean_observations;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// FRED series id for the WTI spot price.
pub const WTI_SERIES: &str = "DCOILWTICO";
/// FRED series id for the VIX daily close.
pub const VIX_SERIES: &str = "VIXCLS";

/// FRED provider for the key-gated risk proxies (WTI, VIX).
pub struct FredProvider {
    base_url: String,
    api_key: String,
}

impl FredProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        FredProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FredResponse {
    observations: Vec<FredObservation>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    // "." marks an observation with no reading (market holiday)
    #[serde(default)]
    value: String,
}

#[async_trait]
impl RiskDataProvider for FredProvider {
    async fn fetch_series(&self, series_id: &str) -> Result<Vec<f64>> {
        let url = format!(
            "{}/fred/series/observations?series_id={}&api_key={}&file_type=json&sort_order=asc&observation_start=2000-01-01",
            self.base_url, series_id, self.api_key
        );
        debug!("Requesting FRED observations for {}", series_id);

        let client = reqwest::Client::builder()
            .user_agent("goldradar/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send FRED request for {series_id}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for FRED series {}",
                response.status(),
                series_id
            ));
        }

        let payload: FredResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse FRED response for {series_id}"))?;

        let start = payload.observations.len().saturating_sub(HISTORY_CAP);
        Ok(clean_observations(
            payload.observations[start..]
                .iter()
                .filter_map(|obs| obs.value.trim().parse::<f64>().ok())
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OBSERVATIONS_PATH: &str = "/fred/series/observations";

    async fn mount_series(server: &MockServer, series_id: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(OBSERVATIONS_PATH))
            .and(query_param("series_id", series_id))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    fn body_with_values(values: &[&str]) -> String {
        let observations: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| format!(r#"{{"date": "2024-01-{:02}", "value": "{v}"}}"#, i + 1))
            .collect();
        format!(r#"{{"observations": [{}]}}"#, observations.join(","))
    }

    #[tokio::test]
    async fn test_successful_fetch() {
        let server = MockServer::start().await;
        mount_series(
            &server,
            WTI_SERIES,
            200,
            &body_with_values(&["75.23", "76.10"]),
        )
        .await;

        let provider = FredProvider::new(&server.uri(), "test-key");
        let series = provider.fetch_series(WTI_SERIES).await.unwrap();
        assert_eq!(series, vec![75.23, 76.10]);
    }

    #[tokio::test]
    async fn test_missing_value_markers_are_dropped() {
        let server = MockServer::start().await;
        mount_series(
            &server,
            VIX_SERIES,
            200,
            &body_with_values(&["14.2", ".", "15.1"]),
        )
        .await;

        let provider = FredProvider::new(&server.uri(), "test-key");
        let series = provider.fetch_series(VIX_SERIES).await.unwrap();
        assert_eq!(series, vec![14.2, 15.1]);
    }

    #[tokio::test]
    async fn test_only_most_recent_observations_kept() {
        let values: Vec<String> = (0..40).map(|i| format!("{}.0", i)).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let server = MockServer::start().await;
        mount_series(&server, WTI_SERIES, 200, &body_with_values(&refs)).await;

        let provider = FredProvider::new(&server.uri(), "test-key");
        let series = provider.fetch_series(WTI_SERIES).await.unwrap();
        assert_eq!(series.len(), HISTORY_CAP);
        assert_eq!(series[0], 10.0);
        assert_eq!(*series.last().unwrap(), 39.0);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let server = MockServer::start().await;
        mount_series(&server, WTI_SERIES, 400, "bad_request").await;

        let provider = FredProvider::new(&server.uri(), "bad-key");
        let result = provider.fetch_series(WTI_SERIES).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("HTTP error: 400 Bad Request for FRED series {WTI_SERIES}")
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start().await;
        mount_series(&server, VIX_SERIES, 200, r#"{"obs": []}"#).await;

        let provider = FredProvider::new(&server.uri(), "test-key");
        let result = provider.fetch_series(VIX_SERIES).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse FRED response for VIXCLS")
        );
    }
}
