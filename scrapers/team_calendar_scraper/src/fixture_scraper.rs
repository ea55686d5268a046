use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::{
    error::{Result, ScrapeError},
    schema::{selector, BlockSelection, FixtureSchema},
    types::FixtureRecord,
    utils::{absolute_url, element_text, row_cells, DateFormat},
};

pub fn schedule_url(base_url: &str, team_id: i64, season: u16) -> String {
    format!(
        "{}/-/spielplan/verein/{}/saison_id/{}/plus/1",
        base_url.trim_end_matches('/'),
        team_id,
        season
    )
}

/// What the schedule page yields: the standings link and the games found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixturePage {
    pub competition_link: Option<String>,
    pub fixtures: Vec<FixtureRecord>,
}

pub struct FixtureParser {
    schema: FixtureSchema,
    date_format: DateFormat,
    link_selector: Selector,
    block_selector: Selector,
    table_selector: Selector,
    row_selector: Selector,
    anchor_selector: Selector,
    score_selector: Selector,
}

impl FixtureParser {
    pub fn new(schema: &FixtureSchema, date_format: DateFormat) -> Result<Self> {
        Ok(Self {
            schema: schema.clone(),
            date_format,
            link_selector: selector(&schema.competition_link)?,
            block_selector: selector(&schema.block)?,
            table_selector: selector(&schema.table)?,
            row_selector: selector(&schema.row)?,
            anchor_selector: selector("a")?,
            score_selector: selector(&schema.score)?,
        })
    }

    pub fn parse(&self, html: &str, base_url: &str) -> Result<FixturePage> {
        let document = Html::parse_document(html);

        let href = document
            .select(&self.link_selector)
            .next()
            .and_then(|a| a.value().attr("href"));
        let Some(href) = href else {
            // Off-season pages have no competition block at all
            info!("No competition link on schedule page");
            return Ok(FixturePage::default());
        };

        let competition_link = absolute_url(base_url, &self.schema.rewrite_link(href));
        debug!("Competition link: {} -> {}", href, competition_link);

        let mut fixtures = Vec::new();
        for table in self.schedule_tables(&document) {
            for row in table.select(&self.row_selector) {
                if let Some(fixture) = self.parse_row(&row)? {
                    fixtures.push(fixture);
                }
            }
        }
        debug!("Extracted {} fixtures", fixtures.len());

        Ok(FixturePage {
            competition_link: Some(competition_link),
            fixtures,
        })
    }

    fn schedule_tables<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let mut tables = document
            .select(&self.block_selector)
            .filter_map(|block| block.select(&self.table_selector).next());

        match self.schema.block_selection {
            BlockSelection::MinRows(min_rows) => tables
                .filter(|table| table.select(&self.row_selector).count() >= min_rows)
                .collect(),
            BlockSelection::Nth(n) => n
                .checked_sub(1)
                .and_then(|index| tables.nth(index))
                .into_iter()
                .collect(),
        }
    }

    /// Returns `None` for rows without a matchday link (section separators).
    pub fn parse_row(&self, row: &ElementRef) -> Result<Option<FixtureRecord>> {
        let cells = row_cells(row, &["td"]);

        let matchday = cell(&cells, self.schema.matchday_cell)
            .and_then(|c| c.select(&self.anchor_selector).next());
        let Some(matchday) = matchday else {
            return Ok(None);
        };

        let raw_date = element_text(required_cell(&cells, self.schema.date_cell)?);
        let date = self.date_format.normalize(&raw_date)?;
        let time = element_text(required_cell(&cells, self.schema.time_cell)?);
        let home_team = self.team_name(required_cell(&cells, self.schema.home_team_cell)?);
        let away_team = self.team_name(required_cell(&cells, self.schema.away_team_cell)?);

        let score = cell(&cells, self.schema.result_cell)
            .and_then(|c| c.select(&self.score_selector).next())
            .map(|s| element_text(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.schema.score_placeholder.clone());

        Ok(Some(FixtureRecord {
            matchday: element_text(&matchday),
            date,
            time,
            home_team,
            score,
            away_team,
        }))
    }

    // The team cell also carries the table position, so prefer the link text
    fn team_name(&self, cell: &ElementRef) -> String {
        cell.select(&self.anchor_selector)
            .next()
            .map(|a| element_text(&a))
            .unwrap_or_else(|| element_text(cell))
    }
}

fn cell<'a, 'b>(cells: &'b [ElementRef<'a>], position: usize) -> Option<&'b ElementRef<'a>> {
    position.checked_sub(1).and_then(|index| cells.get(index))
}

fn required_cell<'a, 'b>(cells: &'b [ElementRef<'a>], position: usize) -> Result<&'b ElementRef<'a>> {
    cell(cells, position).ok_or_else(|| {
        ScrapeError::Structure(format!(
            "Fixture row has {} cells, expected column {}",
            cells.len(),
            position
        ))
    })
}
