use crate::core::Language;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Static strings shown to the user, one set per language.
pub struct Labels {
    pub title: &'static str,
    pub currency: &'static str,
    pub code: &'static str,
    pub rate: &'static str,
    pub last_updated: &'static str,
    pub never_updated: &'static str,
    pub rates_unavailable: &'static str,
    pub fetching: &'static str,
    pub watching: &'static str,
}

const ENGLISH: Labels = Labels {
    title: "Exchange rates",
    currency: "Currency",
    code: "Code",
    rate: "Rate (1 USD)",
    last_updated: "Last updated",
    never_updated: "Rates have not been fetched yet",
    rates_unavailable: "Exchange rates are unavailable. Check your connection and try again.",
    fetching: "Fetching exchange rates...",
    watching: "Watching for rate updates, press Ctrl-C to stop",
};

const PORTUGUESE: Labels = Labels {
    title: "Cotações",
    currency: "Moeda",
    code: "Código",
    rate: "Cotação (1 USD)",
    last_updated: "Última atualização",
    never_updated: "As cotações ainda não foram obtidas",
    rates_unavailable: "Cotações indisponíveis. Verifique sua conexão e tente novamente.",
    fetching: "Obtendo cotações...",
    watching: "Acompanhando as cotações, pressione Ctrl-C para sair",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::English => &ENGLISH,
        Language::Portuguese => &PORTUGUESE,
    }
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

/// Right aligned numeric cell.
pub fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Creates a cell for "N/A" values.
pub fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Spinner shown while waiting on the network.
pub fn new_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_differ_per_language() {
        let en = labels(Language::English);
        let pt = labels(Language::Portuguese);
        assert_ne!(en.rates_unavailable, pt.rates_unavailable);
        assert_eq!(pt.currency, "Moeda");
    }
}
