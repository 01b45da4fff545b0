//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod currency;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use converter::{ConversionError, Converter};
pub use currency::{CurrencyCode, Language};
pub use rate::{FetchError, RateEntry, RateQuote, RateSnapshot, RateSource};
