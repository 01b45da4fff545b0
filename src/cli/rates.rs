use super::ui;
use crate::core::{Language, RateSnapshot};
use comfy_table::Cell;

/// Renders every stored rate as a table, with the refresh time below it.
pub fn display_rates(snapshot: &RateSnapshot, language: Language) -> String {
    let labels = ui::labels(language);
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell(labels.code),
        ui::header_cell(labels.currency),
        ui::header_cell(labels.rate),
    ]);

    for entry in snapshot.entries() {
        let rate = if entry.rate > 0.0 {
            ui::number_cell(format!("{:.4}", entry.rate))
        } else {
            ui::na_cell()
        };
        table.add_row(vec![
            Cell::new(entry.code.flag()),
            Cell::new(entry.code),
            Cell::new(entry.code.display_name(language)),
            rate,
        ]);
    }

    let footer = match snapshot.fetched_at() {
        Some(at) => format!(
            "{}: {}",
            labels.last_updated,
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => labels.never_updated.to_string(),
    };

    format!(
        "{}\n\n{}\n{}",
        ui::style_text(labels.title, ui::StyleType::Title),
        table,
        ui::style_text(&footer, ui::StyleType::Subtle)
    )
}
