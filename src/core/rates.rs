//! Exchange rate types and the provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One currency quotation from the daily fixing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub country: String,
    pub currency: String,
    /// Quotation unit the rate is expressed per (usually 1 or 100).
    pub amount: f64,
    pub currency_code: String,
    /// Price in CZK of `amount` units of the quoted currency.
    pub rate: f64,
}

/// Parsed daily feed as served to clients.
///
/// An empty `date` always comes with an empty `rates` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub date: String,
    pub rates: Vec<RateRecord>,
}

impl FeedResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    pub fn find(&self, currency_code: &str) -> Option<&RateRecord> {
        self.rates
            .iter()
            .find(|r| r.currency_code.eq_ignore_ascii_case(currency_code))
    }
}

#[async_trait]
pub trait RatesProvider: Send + Sync {
    async fn fetch_daily(&self) -> Result<FeedResponse>;
}
