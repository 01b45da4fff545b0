use super::ui;
use crate::core::converter::Conversion;
use crate::core::{ConversionError, Converter, CurrencyCode, Language};

/// Formats the outcome of a conversion for the terminal.
pub fn display_conversion(
    converter: &Converter,
    amount: f64,
    source: CurrencyCode,
    target: CurrencyCode,
    language: Language,
) -> Result<String, ConversionError> {
    let Conversion { rate, result, .. } = converter.conversion(amount, source, target)?;

    Ok(format!(
        "{} {amount:.2} {source} = {} {}\n{}",
        source.flag(),
        target.flag(),
        ui::style_text(&format!("{result:.2} {target}"), ui::StyleType::TotalValue),
        ui::style_text(
            &format!(
                "1 {source} = {rate:.4} {target} ({})",
                target.display_name(language)
            ),
            ui::StyleType::Subtle
        )
    ))
}

/// Localized message for a failed conversion.
pub fn display_error(error: &ConversionError, language: Language) -> String {
    let labels = ui::labels(language);
    match error {
        ConversionError::RatesUnavailable { code } => format!(
            "{} ({code})",
            ui::style_text(labels.rates_unavailable, ui::StyleType::Error)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RateStore;
    use crate::store::tests::{MockRateSource, quote};
    use std::sync::Arc;

    fn converter() -> Converter {
        let store = Arc::new(RateStore::new(Arc::new(MockRateSource::new(vec![]))));
        store.publish(&quote(&[(CurrencyCode::Brl, 5.0)]));
        Converter::new(store)
    }

    #[test]
    fn test_display_conversion() {
        let output = display_conversion(
            &converter(),
            100.0,
            CurrencyCode::Brl,
            CurrencyCode::Usd,
            Language::English,
        )
        .unwrap();
        assert!(output.contains("100.00 BRL"));
        assert!(output.contains("20.00 USD"));
        assert!(output.contains("1 BRL = 0.2000 USD (US Dollar)"));
    }

    #[test]
    fn test_display_unavailable_error() {
        let error = display_conversion(
            &converter(),
            1.0,
            CurrencyCode::Gbp,
            CurrencyCode::Usd,
            Language::Portuguese,
        )
        .unwrap_err();
        let message = display_error(&error, Language::Portuguese);
        assert!(message.contains("Cotações indisponíveis"));
        assert!(message.contains("(GBP)"));
    }
}
