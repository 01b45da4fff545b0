//! Currency conversion over the stored rates

use crate::core::currency::CurrencyCode;
use crate::core::rate::RateSnapshot;
use crate::store::RateStore;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Exchange rate for {code} is not available yet")]
    RatesUnavailable { code: CurrencyCode },
}

/// Rate that turns an amount of `source` into `target`, from a single snapshot.
pub fn cross_rate(
    snapshot: &RateSnapshot,
    source: CurrencyCode,
    target: CurrencyCode,
) -> Result<f64, ConversionError> {
    let source_rate = snapshot.rate(source);
    if source_rate == 0.0 {
        return Err(ConversionError::RatesUnavailable { code: source });
    }
    let target_rate = snapshot.rate(target);
    if target_rate == 0.0 {
        return Err(ConversionError::RatesUnavailable { code: target });
    }
    Ok(target_rate / source_rate)
}

pub fn convert_with(
    snapshot: &RateSnapshot,
    amount: f64,
    source: CurrencyCode,
    target: CurrencyCode,
) -> Result<f64, ConversionError> {
    // Rates are checked even for same-currency requests so an unknown rate is
    // always reported the same way.
    let rate = cross_rate(snapshot, source, target)?;
    if source == target {
        return Ok(amount);
    }
    Ok(amount * rate)
}

/// A finished conversion together with the cross-rate it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: f64,
    pub result: f64,
}

/// Converts amounts using whatever rates the store currently holds.
#[derive(Clone)]
pub struct Converter {
    store: Arc<RateStore>,
}

impl Converter {
    pub fn new(store: Arc<RateStore>) -> Self {
        Self { store }
    }

    pub fn convert(
        &self,
        amount: f64,
        source: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<f64, ConversionError> {
        convert_with(&self.store.snapshot(), amount, source, target)
    }

    pub fn cross_rate(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<f64, ConversionError> {
        cross_rate(&self.store.snapshot(), source, target)
    }

    /// Converts and reports the rate, both taken from the same snapshot.
    pub fn conversion(
        &self,
        amount: f64,
        source: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Conversion, ConversionError> {
        let snapshot = self.store.snapshot();
        Ok(Conversion {
            amount,
            source,
            target,
            rate: cross_rate(&snapshot, source, target)?,
            result: convert_with(&snapshot, amount, source, target)?,
        })
    }
}
