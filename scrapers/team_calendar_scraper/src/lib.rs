pub mod calendar;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod fixture_scraper;
pub mod schema;
pub mod standings_scraper;
pub mod types;
pub mod utils;
pub mod web;
