use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::ScrapingConfig;
use crate::error::{Result, ScrapeError};

#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

pub struct WebHtmlFetcher {
    client: reqwest::Client,
}

impl WebHtmlFetcher {
    pub fn new(config: &ScrapingConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HtmlFetcher for WebHtmlFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::retrieval(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::retrieval(url, format!("HTTP status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::retrieval(url, e))
    }
}
