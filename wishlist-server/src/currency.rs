//! Currency conversion via an external exchange-rate API
//!
//! Prices are entered in USD. Non-USD items are converted with the latest
//! USD-based rates, fetched fresh for every conversion (no caching, no
//! retry). A missing rate fails the conversion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Currency prices are entered in.
pub const BASE_CURRENCY: &str = "USD";

/// Conversion error type
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("exchange rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("conversion rate for {0} not found")]
    RateUnavailable(String),

    #[error("no exchange rate API key configured")]
    MissingApiKey,
}

/// Source of USD-based exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates keyed by currency code (1 USD = rate units).
    async fn latest_usd_rates(&self) -> Result<HashMap<String, f64>, CurrencyError>;
}

/// Response body of `GET /v6/{key}/latest/USD`
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

/// Client for exchangerate-api.com
pub struct ExchangeRateClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://v6.exchangerate-api.com";

    pub fn new(api_key: Option<String>) -> Result<Self, CurrencyError> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (self-hosted mirror, tests).
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Result<Self, CurrencyError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        })
    }
}

#[async_trait]
impl RateProvider for ExchangeRateClient {
    async fn latest_usd_rates(&self) -> Result<HashMap<String, f64>, CurrencyError> {
        let api_key = self.api_key.as_deref().ok_or(CurrencyError::MissingApiKey)?;
        let url = format!("{}/v6/{}/latest/{}", self.base_url, api_key, BASE_CURRENCY);

        tracing::debug!(base = BASE_CURRENCY, "Fetching latest exchange rates");
        let body: LatestRatesResponse = self.http.get(&url).send().await?.json().await?;

        Ok(body.conversion_rates)
    }
}

/// Fixed rate table, for offline runs and tests.
#[derive(Debug, Default)]
pub struct FixedRates {
    rates: HashMap<String, f64>,
    lookups: AtomicUsize,
}

impl FixedRates {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: rates.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// How many times rates were requested.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RateProvider for FixedRates {
    async fn latest_usd_rates(&self) -> Result<HashMap<String, f64>, CurrencyError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.rates.clone())
    }
}

/// Result of converting a USD amount
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub converted_price: f64,
    /// Empty when no conversion took place.
    pub exchange_info: String,
}

/// Convert a USD `amount` into `target`.
///
/// `submitted` is the price text as entered; the conversion note quotes it
/// verbatim. USD passes through untouched without contacting the rate
/// provider.
pub async fn convert(
    rates: &dyn RateProvider,
    amount: f64,
    submitted: &str,
    target: &str,
) -> Result<Conversion, CurrencyError> {
    if target == BASE_CURRENCY {
        return Ok(Conversion {
            converted_price: amount,
            exchange_info: String::new(),
        });
    }

    let rate = rates
        .latest_usd_rates()
        .await?
        .get(target)
        .copied()
        .ok_or_else(|| CurrencyError::RateUnavailable(target.to_owned()))?;

    let converted_price = amount * rate;
    Ok(Conversion {
        converted_price,
        exchange_info: format!(
            "${} {} converted to {:.2} {}",
            submitted, BASE_CURRENCY, converted_price, target
        ),
    })
}
