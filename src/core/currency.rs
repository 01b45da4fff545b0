//! Supported currencies and their display labels

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The closed set of currencies the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CurrencyCode {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "BRL")]
    Brl,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "CAD")]
    Cad,
}

impl CurrencyCode {
    /// All rates are stored relative to this currency.
    pub const BASE: CurrencyCode = CurrencyCode::Usd;

    /// Every supported code, in storage order.
    pub const ALL: [CurrencyCode; 5] = [
        CurrencyCode::Usd,
        CurrencyCode::Brl,
        CurrencyCode::Gbp,
        CurrencyCode::Eur,
        CurrencyCode::Cad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Brl => "BRL",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Cad => "CAD",
        }
    }

    /// Position of this code inside a snapshot.
    pub(crate) fn index(&self) -> usize {
        match self {
            CurrencyCode::Usd => 0,
            CurrencyCode::Brl => 1,
            CurrencyCode::Gbp => 2,
            CurrencyCode::Eur => 3,
            CurrencyCode::Cad => 4,
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        match (self, language) {
            (CurrencyCode::Usd, Language::English) => "US Dollar",
            (CurrencyCode::Usd, Language::Portuguese) => "Dólar americano",
            (CurrencyCode::Brl, Language::English) => "Brazilian Real",
            (CurrencyCode::Brl, Language::Portuguese) => "Real brasileiro",
            (CurrencyCode::Gbp, Language::English) => "British Pound",
            (CurrencyCode::Gbp, Language::Portuguese) => "Libra esterlina",
            (CurrencyCode::Eur, _) => "Euro",
            (CurrencyCode::Cad, Language::English) => "Canadian Dollar",
            (CurrencyCode::Cad, Language::Portuguese) => "Dólar canadense",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "🇺🇸",
            CurrencyCode::Brl => "🇧🇷",
            CurrencyCode::Gbp => "🇬🇧",
            CurrencyCode::Eur => "🇪🇺",
            CurrencyCode::Cad => "🇨🇦",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "BRL" => Ok(CurrencyCode::Brl),
            "GBP" => Ok(CurrencyCode::Gbp),
            "EUR" => Ok(CurrencyCode::Eur),
            "CAD" => Ok(CurrencyCode::Cad),
            _ => Err(anyhow!(
                "Unsupported currency: {s}. Expected one of USD, BRL, GBP, EUR, CAD"
            )),
        }
    }
}

/// Language used for human readable labels. Has no effect on rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "pt")]
    Portuguese,
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::English),
            "pt" => Ok(Language::Portuguese),
            _ => Err(anyhow!("Unsupported language: {s}. Expected en or pt")),
        }
    }
}
