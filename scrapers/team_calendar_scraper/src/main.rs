use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use team_calendar_scraper::{
    calendar::CalendarScraper,
    config::ScraperConfig,
    fetcher::WebHtmlFetcher,
    fixture_scraper::FixtureParser,
    schema::ExtractionSchema,
    standings_scraper::StandingsParser,
    types::{CalendarData, ResponseRecord},
    web,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve,
    /// Fetch one team's calendar and print it as JSON
    Fetch {
        /// Team identifier on the site (defaults to DEFAULT_TEAM_ID)
        #[arg(short, long)]
        id: Option<i64>,
    },
    /// Run the extraction against saved pages
    ParseFile {
        /// Saved schedule page
        #[arg(short, long)]
        schedule: PathBuf,
        /// Saved standings page
        #[arg(long)]
        standings: Option<PathBuf>,
    },
}

fn parse_files(config: &ScraperConfig, schedule: &Path, standings: Option<&Path>) -> Result<ResponseRecord> {
    let schema = ExtractionSchema::default().with_block_selection(config.extraction.block_selection);
    let fixture_parser = FixtureParser::new(&schema.fixtures, config.extraction.date_format)?;

    info!("Processing schedule page: {:?}", schedule);
    let page = fixture_parser.parse(&fs::read_to_string(schedule)?, &config.scraping.base_url)?;
    info!("Competition link: {:?}", page.competition_link);

    let standings = match standings {
        Some(path) => {
            info!("Processing standings page: {:?}", path);
            StandingsParser::new(&schema.standings)?.parse(&fs::read_to_string(path)?)?
        }
        None => Vec::new(),
    };

    Ok(ResponseRecord::success(CalendarData {
        fixtures: page.fixtures,
        standings,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ScraperConfig::from_env();

    match cli.command {
        Commands::Serve => {
            web::serve(&config).await?;
        }
        Commands::Fetch { id } => {
            let fetcher = Arc::new(WebHtmlFetcher::new(&config.scraping)?);
            let scraper = CalendarScraper::new(&config, fetcher)?;
            let response = scraper
                .respond(id.unwrap_or(config.scraping.default_team_id))
                .await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::ParseFile { schedule, standings } => {
            let response = parse_files(&config, &schedule, standings.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
