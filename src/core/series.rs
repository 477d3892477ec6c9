//! Series repository and core types

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Most recent observations kept per series.
pub const HISTORY_CAP: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    RealYield10y,
    EurUsd,
    Wti,
    Vix,
}

impl SeriesKind {
    /// All series in display order. Explanation lines and dashboard rows
    /// follow this order.
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::RealYield10y,
        SeriesKind::EurUsd,
        SeriesKind::Wti,
        SeriesKind::Vix,
    ];

    /// Formats an observation with the unit conventions of the series.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            SeriesKind::RealYield10y => format!("{value:.2}%"),
            SeriesKind::EurUsd => format!("{value:.4}"),
            SeriesKind::Wti => format!("${value:.2}"),
            SeriesKind::Vix => format!("{value:.2}"),
        }
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SeriesKind::RealYield10y => "Real yield 10Y",
                SeriesKind::EurUsd => "EURUSD",
                SeriesKind::Wti => "WTI",
                SeriesKind::Vix => "VIX",
            }
        )
    }
}

impl FromStr for SeriesKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "real-yield" | "real10y" => Ok(SeriesKind::RealYield10y),
            "fx" | "eurusd" => Ok(SeriesKind::EurUsd),
            "oil" | "wti" => Ok(SeriesKind::Wti),
            "vix" => Ok(SeriesKind::Vix),
            _ => Err(anyhow::anyhow!("Unknown series: {}", s)),
        }
    }
}

/// In-memory holder of the four observation sequences, oldest first.
///
/// Sequences are wholesale-replaced on every refresh and contain only
/// finite numbers; `replace` enforces both.
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    real10y: Vec<f64>,
    eurusd: Vec<f64>,
    wti: Vec<f64>,
    vix: Vec<f64>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a series with `values`, dropping non-finite entries and
    /// keeping the most recent [`HISTORY_CAP`] observations.
    pub fn replace(&mut self, kind: SeriesKind, values: Vec<f64>) {
        let mut clean: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if clean.len() > HISTORY_CAP {
            clean.drain(..clean.len() - HISTORY_CAP);
        }
        *self.slot_mut(kind) = clean;
    }

    pub fn values(&self, kind: SeriesKind) -> &[f64] {
        match kind {
            SeriesKind::RealYield10y => &self.real10y,
            SeriesKind::EurUsd => &self.eurusd,
            SeriesKind::Wti => &self.wti,
            SeriesKind::Vix => &self.vix,
        }
    }

    pub fn last(&self, kind: SeriesKind) -> Option<f64> {
        self.values(kind).last().copied()
    }

    pub fn clear(&mut self) {
        for kind in SeriesKind::ALL {
            self.slot_mut(kind).clear();
        }
    }

    fn slot_mut(&mut self, kind: SeriesKind) -> &mut Vec<f64> {
        match kind {
            SeriesKind::RealYield10y => &mut self.real10y,
            SeriesKind::EurUsd => &mut self.eurusd,
            SeriesKind::Wti => &mut self.wti,
            SeriesKind::Vix => &mut self.vix,
        }
    }
}
