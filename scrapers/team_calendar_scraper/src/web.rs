use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    calendar::CalendarScraper,
    config::ScraperConfig,
    fetcher::{HtmlFetcher, WebHtmlFetcher},
    types::ResponseRecord,
};

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<CalendarScraper>,
    pub default_team_id: i64,
}

impl AppState {
    pub fn new(config: &ScraperConfig, fetcher: Arc<dyn HtmlFetcher>) -> anyhow::Result<Self> {
        Ok(Self {
            scraper: Arc::new(CalendarScraper::new(config, fetcher)?),
            default_team_id: config.scraping.default_team_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub id: Option<i64>,
}

#[axum::debug_handler]
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8" />
    <title>Calendario das Equipas</title>
</head>
<body>
    <h1>Calendario das Equipas</h1>
    <p>Fixtures and league table for a team, as JSON:</p>
    <p><a href="/transfermarkt?id={id}"><code>GET /transfermarkt?id={id}</code></a></p>
</body>
</html>"#,
        id = state.default_team_id
    ))
}

// Failures are reported in the body; consumers expect 200 either way
#[axum::debug_handler]
pub async fn calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> impl IntoResponse {
    let team_id = query.id.unwrap_or(state.default_team_id);
    let response: ResponseRecord = state.scraper.respond(team_id).await;
    Json(response)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/transfermarkt", get(calendar_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &ScraperConfig) -> anyhow::Result<()> {
    let fetcher = Arc::new(WebHtmlFetcher::new(&config.scraping)?);
    let state = AppState::new(config, fetcher)?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Calendar service listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
