//! Exchange rate abstractions and core types

use crate::core::currency::CurrencyCode;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One unit of the base currency equals `rate` units of `code`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateEntry {
    pub code: CurrencyCode,
    pub rate: f64,
}

/// A complete set of rates, published and read as a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    entries: [RateEntry; 5],
    fetched_at: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    /// Base currency at 1.0, every other rate unknown.
    pub fn initial() -> Self {
        let entries = CurrencyCode::ALL.map(|code| RateEntry {
            code,
            rate: if code.is_base() { 1.0 } else { 0.0 },
        });
        Self {
            entries,
            fetched_at: None,
        }
    }

    /// Returns the stored rate for `code`; 0 means it was never fetched.
    pub fn rate(&self, code: CurrencyCode) -> f64 {
        self.entries[code.index()].rate
    }

    pub fn entries(&self) -> &[RateEntry; 5] {
        &self.entries
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Builds the next snapshot from `quote`. Codes the quote has no usable
    /// value for keep their current rate. The base currency stays at 1.0.
    pub fn merged_with(&self, quote: &RateQuote, now: DateTime<Utc>) -> (Self, MergeOutcome) {
        let mut next = self.clone();
        let mut outcome = MergeOutcome::default();

        for entry in next.entries.iter_mut() {
            if entry.code.is_base() {
                continue;
            }
            match quote.rate(entry.code) {
                Some(rate) => {
                    entry.rate = rate;
                    outcome.updated.push(entry.code);
                }
                None => outcome.missed.push(entry.code),
            }
        }

        if !outcome.updated.is_empty() {
            next.fetched_at = Some(now);
        }
        (next, outcome)
    }
}

impl Default for RateSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// Which codes a merge touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub updated: Vec<CurrencyCode>,
    pub missed: Vec<CurrencyCode>,
}

/// Rates extracted from one response. A code without a usable value is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateQuote {
    pub rates: HashMap<CurrencyCode, f64>,
    pub date: Option<String>,
}

impl RateQuote {
    /// Records `rate` for `code` if it is a usable rate, returns whether it was kept.
    pub fn insert(&mut self, code: CurrencyCode, rate: f64) -> bool {
        if rate.is_finite() && rate > 0.0 {
            self.rates.insert(code, rate);
            true
        } else {
            false
        }
    }

    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(&code).copied()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A remote service quoting every code in `codes` against `base`.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(
        &self,
        base: CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuote, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let snapshot = RateSnapshot::initial();
        for code in CurrencyCode::ALL {
            let expected = if code.is_base() { 1.0 } else { 0.0 };
            assert_eq!(snapshot.rate(code), expected);
        }
        assert!(snapshot.fetched_at().is_none());
    }

    #[test]
    fn test_merge_keeps_missing_codes() {
        let now = Utc::now();
        let mut quote = RateQuote::default();
        quote.insert(CurrencyCode::Brl, 5.0);
        quote.insert(CurrencyCode::Eur, 0.9);
        let (first, _) = RateSnapshot::initial().merged_with(&quote, now);

        let mut partial = RateQuote::default();
        partial.insert(CurrencyCode::Brl, 5.5);
        let (second, outcome) = first.merged_with(&partial, now);

        assert_eq!(second.rate(CurrencyCode::Brl), 5.5);
        assert_eq!(second.rate(CurrencyCode::Eur), 0.9);
        assert_eq!(second.rate(CurrencyCode::Gbp), 0.0);
        assert_eq!(outcome.updated, vec![CurrencyCode::Brl]);
        assert_eq!(
            outcome.missed,
            vec![CurrencyCode::Gbp, CurrencyCode::Eur, CurrencyCode::Cad]
        );
    }

    #[test]
    fn test_merge_pins_base_rate() {
        let mut quote = RateQuote::default();
        quote.insert(CurrencyCode::Usd, 2.0);
        let (snapshot, outcome) = RateSnapshot::initial().merged_with(&quote, Utc::now());

        assert_eq!(snapshot.rate(CurrencyCode::Usd), 1.0);
        assert!(outcome.updated.is_empty());
        assert!(snapshot.fetched_at().is_none());
    }

    #[test]
    fn test_quote_rejects_unusable_rates() {
        let mut quote = RateQuote::default();
        assert!(!quote.insert(CurrencyCode::Brl, 0.0));
        assert!(!quote.insert(CurrencyCode::Gbp, -1.0));
        assert!(!quote.insert(CurrencyCode::Eur, f64::NAN));
        assert!(quote.insert(CurrencyCode::Cad, 1.37));
        assert_eq!(quote.rates.len(), 1);
    }
}
