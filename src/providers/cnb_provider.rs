use crate::core::config::ProviderConfig;
use crate::core::{FeedResponse, RatesProvider};
use crate::feed::parse_daily_text;
use crate::providers::util::with_retry;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Failures reaching the upstream feed. The parser never sees these.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request to CNB failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CNB response HTTP {0}")]
    HttpStatus(u16),

    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
}

pub struct CnbProvider {
    daily_url: String,
    retries: usize,
    client: reqwest::Client,
}

impl CnbProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cnb-daily/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CnbProvider {
            daily_url: config.daily_url.clone(),
            retries: config.retries,
            client,
        })
    }

    pub fn daily_url(&self) -> &str {
        &self.daily_url
    }

    /// Downloads the raw feed text, rejecting non-2xx statuses and content
    /// types other than `text/plain` or `text/html`.
    pub async fn fetch_text(&self) -> Result<String, GatewayError> {
        debug!("Requesting CNB daily feed from {}", self.daily_url);
        let response = with_retry(
            || async { self.client.get(&self.daily_url).send().await },
            self.retries,
            500,
        )
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("text/plain") && !content_type.contains("text/html") {
            return Err(GatewayError::UnexpectedContentType(content_type));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RatesProvider for CnbProvider {
    #[instrument(skip(self), fields(url = %self.daily_url))]
    async fn fetch_daily(&self) -> Result<FeedResponse> {
        let text = self
            .fetch_text()
            .await
            .context("Failed to fetch CNB daily feed")?;
        let parsed = parse_daily_text(&text);
        debug!(
            "Parsed CNB feed dated '{}' with {} rates",
            parsed.date,
            parsed.rates.len()
        );
        Ok(parsed)
    }
}
