use std::time::Duration;

use log::debug;
use reqwest::{Client, ClientBuilder, Response};

use crate::error::FetchError;

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_url_response(&self, url: &str) -> Result<Response, FetchError> {
        let response = self.client.get(url).send().await?;
        debug!("GET {url} -> {}", response.status());
        // A non-2xx page is treated the same as an unreachable one.
        Ok(response.error_for_status()?)
    }

    pub async fn fetch_url_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }
}
