use crate::core::rate::{FetchError, RateQuote, RateSource};
use crate::core::CurrencyCode;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Rate source backed by the Frankfurter API (`/latest?from=..&to=..`).
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("xconv/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    base: Option<String>,
    date: Option<String>,
    // Raw values so one bad entry does not reject the whole response.
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

fn extract_quote(response: LatestRatesResponse, codes: &[CurrencyCode]) -> RateQuote {
    let mut quote = RateQuote {
        date: response.date,
        ..RateQuote::default()
    };

    for code in codes {
        match response.rates.get(code.as_str()).and_then(|v| v.as_f64()) {
            Some(rate) => {
                if !quote.insert(*code, rate) {
                    debug!(%code, rate, "Ignoring unusable rate");
                }
            }
            None => debug!(%code, "Rate missing from response"),
        }
    }
    quote
}

#[async_trait]
impl RateSource for FrankfurterProvider {
    #[instrument(name = "FrankfurterFetch", skip_all, fields(base = %base))]
    async fn fetch_rates(
        &self,
        base: CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuote, FetchError> {
        let to = codes
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/latest?from={}&to={}", self.base_url, base, to);
        debug!("Requesting rates from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)?;

        if let Some(reported) = data.base.as_deref().filter(|b| *b != base.as_str()) {
            debug!(%reported, "Response base differs from requested base");
        }

        Ok(extract_quote(data, codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "USD,BRL,GBP,EUR,CAD"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(server: &MockServer) -> FrankfurterProvider {
        FrankfurterProvider::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "amount": 1.0,
            "base": "USD",
            "date": "2026-10-16",
            "rates": {"BRL": 5.4321, "CAD": 1.3712, "EUR": 0.9187, "GBP": 0.7912}
        }"#;
        let server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let quote = provider(&server)
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await
            .unwrap();

        assert_eq!(quote.date.as_deref(), Some("2026-10-16"));
        assert_eq!(quote.rate(CurrencyCode::Brl), Some(5.4321));
        assert_eq!(quote.rate(CurrencyCode::Cad), Some(1.3712));
        assert_eq!(quote.rate(CurrencyCode::Eur), Some(0.9187));
        assert_eq!(quote.rate(CurrencyCode::Gbp), Some(0.7912));
        assert_eq!(quote.rate(CurrencyCode::Usd), None);
    }

    #[tokio::test]
    async fn test_malformed_value_is_a_per_code_miss() {
        let mock_response = r#"{
            "base": "USD",
            "rates": {"BRL": "five", "EUR": 0.92, "GBP": null}
        }"#;
        let server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let quote = provider(&server)
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await
            .unwrap();

        assert_eq!(quote.rates.len(), 1);
        assert_eq!(quote.rate(CurrencyCode::Eur), Some(0.92));
        assert!(quote.date.is_none());
    }

    #[tokio::test]
    async fn test_missing_rates_object() {
        let server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"message": "not found"}"#),
        )
        .await;

        let quote = provider(&server)
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await
            .unwrap();
        assert!(quote.rates.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let server = create_mock_server(ResponseTemplate::new(500)).await;

        let result = provider(&server)
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .await;

        let result = provider(&server)
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = create_mock_server(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"rates": {}}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .await;
        let provider = FrankfurterProvider::new(&server.uri(), Duration::from_millis(200)).unwrap();

        let result = provider
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
