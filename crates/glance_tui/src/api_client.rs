//! HTTP record source for the financial data provider.

use std::time::Duration;

use glance_core::error::FetchError;
use glance_core::source::RecordSource;
use glance_core::types::IncomeStatement;
use serde::Deserialize;

use crate::config::GlanceConfig;
use crate::error::{GlanceError, Result};

/// Income-statement client for the provider's v3 REST API
pub struct FmpClient {
    base_url: String,
    ticker: String,
    period: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Error object the provider returns instead of a list (e.g. for a bad key)
#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(rename = "Error Message")]
    message: String,
}

impl FmpClient {
    /// Create a new client
    pub fn new(
        base_url: impl Into<String>,
        ticker: impl Into<String>,
        period: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GlanceError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ticker: ticker.into(),
            period: period.into(),
            api_key,
            client,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &GlanceConfig) -> Result<Self> {
        if config.api_key.is_none() {
            tracing::warn!("No API key configured; the provider will reject requests");
        }

        Self::new(
            config.base_url.clone(),
            config.ticker.clone(),
            config.period.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Income-statement endpoint for the configured ticker and period
    pub fn statement_url(&self) -> String {
        format!(
            "{}/api/v3/income-statement/{}?period={}&apikey={}",
            self.base_url,
            self.ticker,
            self.period,
            self.api_key.as_deref().unwrap_or_default()
        )
    }

    /// Endpoint with the key masked, for logs
    fn redacted_url(&self) -> String {
        format!(
            "{}/api/v3/income-statement/{}?period={}&apikey=***",
            self.base_url, self.ticker, self.period
        )
    }
}

/// Decode a provider response body into records.
fn decode_body(body: &str) -> std::result::Result<Vec<IncomeStatement>, FetchError> {
    match serde_json::from_str::<Vec<IncomeStatement>>(body) {
        Ok(records) => Ok(records),
        Err(err) => match serde_json::from_str::<ProviderError>(body) {
            Ok(provider) => Err(FetchError::decode(provider.message)),
            Err(_) => Err(err.into()),
        },
    }
}

#[async_trait::async_trait]
impl RecordSource for FmpClient {
    async fn fetch(&self) -> std::result::Result<Vec<IncomeStatement>, FetchError> {
        tracing::info!("GET {}", self.redacted_url());

        let response = self
            .client
            .get(self.statement_url())
            .send()
            .await
            .map_err(|e| FetchError::transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(e.without_url().to_string()))?;

        let records = decode_body(&body)?;
        tracing::info!("Fetched {} statements for {}", records.len(), self.ticker);
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.ticker, self.period)
    }
}
