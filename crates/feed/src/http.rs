use crate::price::extract_price;
use reqwest::Client;
use ticker_config::SourceConfig;
use ticker_core::{FetchError, Result, Sample, SampleSource, TickerError};
use tracing::debug;

/// Polls a JSON endpoint and reads the price from one top-level field.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client:            Client,
    url:               String,
    field:             String,
    decimal_separator: char,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TickerError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url:               config.url.clone(),
            field:             config.field.clone(),
            decimal_separator: config.decimal_separator,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SampleSource for HttpSource {
    async fn fetch(&mut self) -> Result<Sample, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Payload(e.to_string()))?;

        let price = extract_price(&body, &self.field, self.decimal_separator)?;
        debug!(url = %self.url, price, "fetched price");
        Ok(price)
    }
}
