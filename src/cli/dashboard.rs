use super::ui;
use crate::config::Mode;
use crate::core::score::ScoreResult;
use crate::core::series::{SeriesKind, SeriesSet};
use comfy_table::Cell;

/// Renders the full dashboard: mode header, one row per series with its
/// trend chart, and the score block. Pure projection of the inputs.
pub fn render(mode: Mode, series: &SeriesSet, score: &ScoreResult) -> String {
    let mut output = format!(
        "{} {}\n\n",
        ui::style_text("GoldRadar", ui::StyleType::Title),
        ui::style_text(&format!("[{mode}]"), ui::StyleType::Label)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Series"),
        ui::header_cell("Last"),
        ui::header_cell("Trend"),
    ]);
    for kind in SeriesKind::ALL {
        table.add_row(vec![
            Cell::new(kind.to_string()),
            ui::format_optional_cell(series.last(kind), |v| kind.format_value(v)),
            Cell::new(ui::sparkline(series.values(kind))),
        ]);
    }
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\n{} {} ({})\n{}\n",
        ui::style_text("Gold lean:", ui::StyleType::Label),
        score.score,
        score.lean.as_str(),
        ui::score_bar(score.score)
    ));
    for note in &score.notes {
        output.push_str(&format!("  • {note}\n"));
    }
    output.push_str(&ui::style_text(
        "Heuristic reading only, not investment advice.",
        ui::StyleType::Subtle,
    ));

    output
}
