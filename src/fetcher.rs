use log::{debug, warn};

use crate::{
    config::PriceConfig, error::FetchError, price_scraper::scrape_price, requests::RequestClient,
};

/// Runs one request-parse-compute cycle per call.
pub struct PriceFetcher {
    config: PriceConfig,
    request_client: RequestClient,
}

impl PriceFetcher {
    pub fn new(config: PriceConfig) -> anyhow::Result<Self> {
        let request_client = RequestClient::new(config.request_timeout)?;
        Ok(Self {
            config,
            request_client,
        })
    }

    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    /// Current total price in €/kWh, or `None` if this cycle produced nothing.
    ///
    /// Every failure is logged with its kind and swallowed, so the caller
    /// should keep whatever value it already had.
    pub async fn fetch(&self) -> Option<f64> {
        match self.fetch_price().await {
            Ok(total) => Some(total),
            Err(e) => {
                warn!("{} error while fetching price from {}: {e}", e.kind(), self.config.price_url);
                None
            }
        }
    }

    pub async fn fetch_price(&self) -> Result<f64, FetchError> {
        let html = self
            .request_client
            .fetch_url_body(&self.config.price_url)
            .await?;
        let price = scrape_price(&html, &self.config.locator)?;
        let total = self.config.surcharges.apply(price);
        if !total.is_finite() || total < 0.0 {
            return Err(FetchError::InvalidPrice { value: total });
        }
        debug!("scraped price {price}, total with surcharges {total}");
        Ok(total)
    }
}
