//! Synthetic series for demo mode
//!
//! Demo mode never touches the network. Each series is a fixed base plus a
//! small per-step drift and a bounded periodic perturbation, so the
//! dashboard always shows a gently trending, non-degenerate chart.

use crate::core::series::{HISTORY_CAP, SeriesKind, SeriesSet};

fn make_series(base: f64, drift: f64) -> Vec<f64> {
    (0..HISTORY_CAP)
        .map(|i| {
            let i = i as f64;
            let noise = ((i / 3.0).sin() + (i / 5.0).cos()) * 0.02;
            let value = base + i * drift + noise;
            (value * 1000.0).round() / 1000.0
        })
        .collect()
}

/// Generates plausible sample data for all four series.
pub fn generate() -> SeriesSet {
    let mut set = SeriesSet::new();
    set.replace(SeriesKind::RealYield10y, make_series(1.6, -0.005));
    set.replace(SeriesKind::EurUsd, make_series(1.05, 0.0005));
    set.replace(SeriesKind::Wti, make_series(78.0, 0.05));
    set.replace(SeriesKind::Vix, make_series(14.0, 0.02));
    set
}
