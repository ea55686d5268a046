use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use tracing::warn;

use crate::schema::BlockSelection;
use crate::utils::DateFormat;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub base_url: String,
    pub season: u16,
    pub default_team_id: i64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            // The site serves a reduced page to non-browser clients.
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3".to_string(),
            request_timeout_secs: 30,
            base_url: "https://www.transfermarkt.pt".to_string(),
            season: 2023,
            default_team_id: 1237,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExtractionConfig {
    pub date_format: DateFormat,
    pub block_selection: BlockSelection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScraperConfig {
    pub server: ServerConfig,
    pub scraping: ScrapingConfig,
    pub extraction: ExtractionConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(Some(port)) = env::var("SERVER_PORT").map_or(Ok(None), |p| p.parse::<u16>().map(Some)) {
            config.server.port = port;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Ok(Some(timeout)) = env::var("SCRAPER_TIMEOUT_SECS").map_or(Ok(None), |t| t.parse::<u64>().map(Some)) {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Ok(base_url) = env::var("SCRAPER_BASE_URL") {
            config.scraping.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(Some(season)) = env::var("SCRAPER_SEASON").map_or(Ok(None), |s| s.parse::<u16>().map(Some)) {
            config.scraping.season = season;
        }
        if let Ok(Some(team_id)) = env::var("DEFAULT_TEAM_ID").map_or(Ok(None), |t| t.parse::<i64>().map(Some)) {
            config.scraping.default_team_id = team_id;
        }
        if let Ok(raw) = env::var("DATE_FORMAT") {
            match raw.parse::<DateFormat>() {
                Ok(date_format) => config.extraction.date_format = date_format,
                Err(e) => warn!("Ignoring DATE_FORMAT={:?}: {}", raw, e),
            }
        }
        if let Ok(raw) = env::var("FIXTURE_BLOCK") {
            match raw.parse::<BlockSelection>() {
                Ok(block_selection) => config.extraction.block_selection = block_selection,
                Err(e) => warn!("Ignoring FIXTURE_BLOCK={:?}: {}", raw, e),
            }
        }

        config
    }
}
