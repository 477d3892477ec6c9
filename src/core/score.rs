//! Gold lean scoring
//!
//! A transparent heuristic over the latest observation of each series:
//! every factor normalizes into [0, 1], contributes a weighted delta around
//! the neutral score of 50, and produces one explanation line. Factors
//! without data contribute nothing and explain their absence instead.

use crate::core::series::{SeriesKind, SeriesSet};

/// Score thresholds shared by the label and the bar color.
pub const LEAN_FAVOR_MIN: u8 = 65;
pub const LEAN_AVOID_MAX: u8 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Avoid,
    Neutral,
    Favor,
}

impl Lean {
    pub fn from_score(score: u8) -> Self {
        if score < LEAN_AVOID_MAX {
            Lean::Avoid
        } else if score < LEAN_FAVOR_MIN {
            Lean::Neutral
        } else {
            Lean::Favor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lean::Avoid => "Rather not",
            Lean::Neutral => "Neutral",
            Lean::Favor => "Rather yes",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: u8,
    pub lean: Lean,
    pub notes: Vec<String>,
}

struct Factor {
    kind: SeriesKind,
    lo: f64,
    hi: f64,
    inverted: bool,
    weight: f64,
    missing_note: &'static str,
}

// Normalization ranges reflect rough recent history per factor; the real
// yield is inverted (lower real rates favor gold).
const FACTORS: [Factor; 4] = [
    Factor {
        kind: SeriesKind::RealYield10y,
        lo: -1.0,
        hi: 3.0,
        inverted: true,
        weight: 0.40,
        missing_note: "no live data",
    },
    Factor {
        kind: SeriesKind::EurUsd,
        lo: 0.95,
        hi: 1.20,
        inverted: false,
        weight: 0.25,
        missing_note: "no live data",
    },
    Factor {
        kind: SeriesKind::Wti,
        lo: 60.0,
        hi: 110.0,
        inverted: false,
        weight: 0.15,
        missing_note: "disabled (FRED key required)",
    },
    Factor {
        kind: SeriesKind::Vix,
        lo: 12.0,
        hi: 35.0,
        inverted: false,
        weight: 0.20,
        missing_note: "disabled (FRED key required)",
    },
];

fn normalize(x: f64, lo: f64, hi: f64) -> f64 {
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Computes the score from the latest value of each series.
///
/// Missing factors simply contribute zero; weights are not renormalized, so
/// the achievable range narrows when data is partial.
pub fn compute(series: &SeriesSet) -> ScoreResult {
    let mut score = 50.0;
    let mut notes = Vec::with_capacity(FACTORS.len());

    for factor in &FACTORS {
        match series.last(factor.kind) {
            Some(value) => {
                let mut favor = normalize(value, factor.lo, factor.hi);
                if factor.inverted {
                    favor = 1.0 - favor;
                }
                score += (favor - 0.5) * 80.0 * factor.weight;
                notes.push(format!(
                    "{}: {} ({:.0}% gold-favorable)",
                    factor.kind,
                    factor.kind.format_value(value),
                    favor * 100.0
                ));
            }
            None => notes.push(format!("{}: {}", factor.kind, factor.missing_note)),
        }
    }

    let score = score.clamp(0.0, 100.0).round() as u8;
    ScoreResult {
        score,
        lean: Lean::from_score(score),
        notes,
    }
}
