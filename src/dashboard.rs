//! Boot sequence: configuration to scored series
//!
//! LIVE mode fans out one task per enabled source and joins them all; a
//! failed or disabled source contributes an empty series, never an error.
//! DEMO mode populates the same repository from the synthetic generator.

use crate::config::{AppConfig, EcbMode, Mode, RiskMode, TreasuryMode};
use crate::core::market::{RiskDataProvider, SeriesProvider};
use crate::core::score::{self, ScoreResult};
use crate::core::series::{SeriesKind, SeriesSet};
use crate::demo;
use crate::providers::fred::{VIX_SERIES, WTI_SERIES};
use tracing::{debug, warn};

async fn fetch_or_empty(
    kind: SeriesKind,
    enabled: bool,
    provider: &dyn SeriesProvider,
) -> Vec<f64> {
    if !enabled {
        debug!("{kind} source is disabled");
        return Vec::new();
    }
    match provider.fetch_series().await {
        Ok(values) => values,
        Err(e) => {
            warn!("Fetching {kind} failed: {e:#}");
            Vec::new()
        }
    }
}

fn absorb(kind: SeriesKind, result: anyhow::Result<Vec<f64>>) -> Vec<f64> {
    match result {
        Ok(values) => values,
        Err(e) => {
            warn!("Fetching {kind} failed: {e:#}");
            Vec::new()
        }
    }
}

/// Fetches the two risk series. Each sub-fetch is isolated; one failing
/// keeps whatever the other returned.
async fn fetch_risk(provider: &dyn RiskDataProvider) -> (Vec<f64>, Vec<f64>) {
    let (wti, vix) = futures::join!(
        provider.fetch_series(WTI_SERIES),
        provider.fetch_series(VIX_SERIES)
    );
    (
        absorb(SeriesKind::Wti, wti),
        absorb(SeriesKind::Vix, vix),
    )
}

/// Runs one refresh cycle and returns the populated repository with its
/// score. Starts from an empty repository, so nothing stale survives.
pub async fn boot(
    config: &AppConfig,
    real_yield_provider: &dyn SeriesProvider,
    fx_provider: &dyn SeriesProvider,
    risk_provider: &dyn RiskDataProvider,
) -> (SeriesSet, ScoreResult) {
    let mut series = SeriesSet::new();

    match config.mode {
        Mode::Demo => {
            debug!("Populating demo series");
            series = demo::generate();
        }
        Mode::Live => {
            let risk_enabled = config.risk_mode == RiskMode::Fred && !config.fred_key.is_empty();
            let (real10y, eurusd, (wti, vix)) = futures::join!(
                fetch_or_empty(
                    SeriesKind::RealYield10y,
                    config.tsy_mode == TreasuryMode::FiscalData,
                    real_yield_provider,
                ),
                fetch_or_empty(
                    SeriesKind::EurUsd,
                    config.ecb_mode == EcbMode::Daily,
                    fx_provider,
                ),
                async {
                    if risk_enabled {
                        fetch_risk(risk_provider).await
                    } else {
                        debug!("Risk sources are disabled or no FRED key is configured");
                        (Vec::new(), Vec::new())
                    }
                },
            );
            series.replace(SeriesKind::RealYield10y, real10y);
            series.replace(SeriesKind::EurUsd, eurusd);
            series.replace(SeriesKind::Wti, wti);
            series.replace(SeriesKind::Vix, vix);
        }
    }

    let score = score::compute(&series);
    (series, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score::Lean;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct StaticProvider(Option<Vec<f64>>);

    #[async_trait]
    impl SeriesProvider for StaticProvider {
        async fn fetch_series(&self) -> anyhow::Result<Vec<f64>> {
            self.0.clone().ok_or_else(|| anyhow!("source down"))
        }
    }

    struct StaticRiskProvider {
        wti: Option<Vec<f64>>,
        vix: Option<Vec<f64>>,
    }

    #[async_trait]
    impl RiskDataProvider for StaticRiskProvider {
        async fn fetch_series(&self, series_id: &str) -> anyhow::Result<Vec<f64>> {
            let values = match series_id {
                WTI_SERIES => &self.wti,
                _ => &self.vix,
            };
            values.clone().ok_or_else(|| anyhow!("source down"))
        }
    }

    fn live_config() -> AppConfig {
        AppConfig {
            mode: Mode::Live,
            fred_key: "test-key".to_string(),
            risk_mode: RiskMode::Fred,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_demo_mode_populates_all_series_without_providers() {
        let config = AppConfig::default();
        let down = StaticProvider(None);
        let risk_down = StaticRiskProvider {
            wti: None,
            vix: None,
        };

        let (series, score) = boot(&config, &down, &down, &risk_down).await;
        for kind in SeriesKind::ALL {
            assert_eq!(series.values(kind).len(), 30);
        }
        assert_eq!(score.notes.len(), 4);
    }

    #[tokio::test]
    async fn test_live_mode_with_all_sources_up() {
        let config = live_config();
        let real = StaticProvider(Some(vec![1.0]));
        let fx = StaticProvider(Some(vec![1.075]));
        let risk = StaticRiskProvider {
            wti: Some(vec![85.0]),
            vix: Some(vec![23.5]),
        };

        let (series, score) = boot(&config, &real, &fx, &risk).await;
        assert_eq!(series.last(SeriesKind::RealYield10y), Some(1.0));
        assert_eq!(series.last(SeriesKind::EurUsd), Some(1.075));
        assert_eq!(series.last(SeriesKind::Wti), Some(85.0));
        assert_eq!(series.last(SeriesKind::Vix), Some(23.5));
        assert_eq!(score.score, 50);
    }

    #[tokio::test]
    async fn test_live_mode_total_failure_degrades_to_neutral() {
        let config = live_config();
        let down = StaticProvider(None);
        let risk_down = StaticRiskProvider {
            wti: None,
            vix: None,
        };

        let (series, score) = boot(&config, &down, &down, &risk_down).await;
        for kind in SeriesKind::ALL {
            assert!(series.values(kind).is_empty());
        }
        assert_eq!(score.score, 50);
        assert_eq!(score.lean, Lean::Neutral);
        assert_eq!(score.notes.len(), 4);
        assert!(
            score
                .notes
                .iter()
                .all(|n| n.contains("no live data") || n.contains("disabled"))
        );
    }

    #[tokio::test]
    async fn test_one_risk_series_failing_keeps_the_other() {
        let config = live_config();
        let down = StaticProvider(None);
        let risk = StaticRiskProvider {
            wti: None,
            vix: Some(vec![22.0]),
        };

        let (series, _) = boot(&config, &down, &down, &risk).await;
        assert!(series.values(SeriesKind::Wti).is_empty());
        assert_eq!(series.last(SeriesKind::Vix), Some(22.0));
    }

    #[tokio::test]
    async fn test_risk_sources_skipped_without_key() {
        let mut config = live_config();
        config.fred_key = String::new();
        let real = StaticProvider(Some(vec![1.5]));
        let fx = StaticProvider(Some(vec![1.08]));
        // Would panic the test if called; gating must prevent that.
        struct PanickingRisk;
        #[async_trait]
        impl RiskDataProvider for PanickingRisk {
            async fn fetch_series(&self, _series_id: &str) -> anyhow::Result<Vec<f64>> {
                panic!("risk provider must not be invoked without a key");
            }
        }

        let (series, _) = boot(&config, &real, &fx, &PanickingRisk).await;
        assert!(series.values(SeriesKind::Wti).is_empty());
        assert!(series.values(SeriesKind::Vix).is_empty());
        assert_eq!(series.last(SeriesKind::RealYield10y), Some(1.5));
    }

    #[tokio::test]
    async fn test_disabled_sources_stay_empty() {
        let mut config = live_config();
        config.tsy_mode = TreasuryMode::None;
        config.ecb_mode = EcbMode::None;
        let real = StaticProvider(Some(vec![1.5]));
        let fx = StaticProvider(Some(vec![1.08]));
        let risk = StaticRiskProvider {
            wti: Some(vec![85.0]),
            vix: Some(vec![23.5]),
        };

        let (series, _) = boot(&config, &real, &fx, &risk).await;
        assert!(series.values(SeriesKind::RealYield10y).is_empty());
        assert!(series.values(SeriesKind::EurUsd).is_empty());
        assert_eq!(series.last(SeriesKind::Wti), Some(85.0));
    }
}
