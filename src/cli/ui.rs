use crate::core::score::{LEAN_AVOID_MAX, LEAN_FAVOR_MIN};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPARK_TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SCORE_BAR_WIDTH: usize = 25;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "–".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("–")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Renders a series as a one-line unicode trend chart, min/max-normalized
/// over the full drawable range. Empty input renders nothing; a flat series
/// renders a mid-level row.
pub fn sparkline(data: &[f64]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    data.iter()
        .map(|v| {
            let t = if span == 0.0 { 0.5 } else { (v - min) / span };
            SPARK_TICKS[(t * (SPARK_TICKS.len() - 1) as f64).round() as usize]
        })
        .collect()
}

/// Renders the score as a proportional bar colored by the lean thresholds.
pub fn score_bar(score: u8) -> String {
    let filled = (usize::from(score) * SCORE_BAR_WIDTH).div_ceil(100);
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SCORE_BAR_WIDTH - filled)
    );
    let styled = if score < LEAN_AVOID_MAX {
        style(bar).red()
    } else if score < LEAN_FAVOR_MIN {
        style(bar).yellow()
    } else {
        style(bar).green()
    };
    styled.to_string()
}

/// Creates a styled spinner for the live fetch phase.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
