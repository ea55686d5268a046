use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    config::ScraperConfig,
    error::Result,
    fetcher::HtmlFetcher,
    fixture_scraper::{schedule_url, FixtureParser},
    schema::ExtractionSchema,
    standings_scraper::{require_link, StandingsParser},
    types::{CalendarData, ResponseRecord},
};

/// Builds a team's calendar: the schedule page first, then the league table
/// it links to.
pub struct CalendarScraper {
    fetcher: Arc<dyn HtmlFetcher>,
    fixture_parser: FixtureParser,
    standings_parser: StandingsParser,
    base_url: String,
    season: u16,
}

impl CalendarScraper {
    pub fn new(config: &ScraperConfig, fetcher: Arc<dyn HtmlFetcher>) -> Result<Self> {
        let schema = ExtractionSchema::default()
            .with_block_selection(config.extraction.block_selection);
        Self::with_schema(config, &schema, fetcher)
    }

    pub fn with_schema(
        config: &ScraperConfig,
        schema: &ExtractionSchema,
        fetcher: Arc<dyn HtmlFetcher>,
    ) -> Result<Self> {
        debug!("Using extraction schema {}", schema.version);
        Ok(Self {
            fetcher,
            fixture_parser: FixtureParser::new(&schema.fixtures, config.extraction.date_format)?,
            standings_parser: StandingsParser::new(&schema.standings)?,
            base_url: config.scraping.base_url.clone(),
            season: config.scraping.season,
        })
    }

    pub async fn scrape(&self, team_id: i64) -> Result<CalendarData> {
        let url = schedule_url(&self.base_url, team_id, self.season);
        info!("Fetching schedule for team {}: {}", team_id, url);
        let html = self.fetcher.fetch_html(&url).await?;
        let page = self.fixture_parser.parse(&html, &self.base_url)?;

        // No games means there is no table worth looking up
        if page.fixtures.is_empty() {
            info!("No fixtures found for team {}", team_id);
            return Ok(CalendarData::default());
        }

        let link = require_link(page.competition_link.as_deref())?;
        info!("Fetching standings for team {}: {}", team_id, link);
        let html = self.fetcher.fetch_html(link).await?;
        let standings = self.standings_parser.parse(&html)?;

        info!(
            "Team {}: {} fixtures, {} standings rows",
            team_id,
            page.fixtures.len(),
            standings.len()
        );

        Ok(CalendarData {
            fixtures: page.fixtures,
            standings,
        })
    }

    pub async fn respond(&self, team_id: i64) -> ResponseRecord {
        match self.scrape(team_id).await {
            Ok(data) => ResponseRecord::success(data),
            Err(e) => {
                warn!("Calendar for team {} failed ({}): {}", team_id, e.kind(), e);
                ResponseRecord::failure(e.to_string())
            }
        }
    }
}
