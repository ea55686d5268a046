//! Where each field lives on the upstream pages.
//!
//! Layout changes on the site should only require editing the values here,
//! not the parsers.

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, ScrapeError};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Schema(format!("{}: {:?}", css, e)))
}

/// How to pick the schedule table among the page's content boxes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockSelection {
    /// Every box whose table has at least this many body rows.
    MinRows(usize),
    /// The n-th (1-based) box that contains a table.
    Nth(usize),
}

impl Default for BlockSelection {
    fn default() -> Self {
        Self::MinRows(15)
    }
}

impl FromStr for BlockSelection {
    type Err = ScrapeError;

    /// Accepts `min-rows:<n>` or `nth:<n>`.
    fn from_str(s: &str) -> Result<Self> {
        let (policy, value) = s
            .split_once(':')
            .ok_or_else(|| ScrapeError::Schema(format!("Invalid block selection: {}", s)))?;
        let value = value
            .trim()
            .parse::<usize>()
            .map_err(|_| ScrapeError::Schema(format!("Invalid block selection: {}", s)))?;

        match policy.trim() {
            "min-rows" | "min_rows" => Ok(Self::MinRows(value)),
            "nth" if value > 0 => Ok(Self::Nth(value)),
            _ => Err(ScrapeError::Schema(format!("Invalid block selection: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureSchema {
    pub competition_link: String,
    pub link_from: String,
    pub link_to: String,
    pub block: String,
    pub table: String,
    pub row: String,
    pub block_selection: BlockSelection,
    // 1-based `td` positions within a row
    pub matchday_cell: usize,
    pub date_cell: usize,
    pub time_cell: usize,
    pub home_team_cell: usize,
    pub away_team_cell: usize,
    pub result_cell: usize,
    pub score: String,
    pub score_placeholder: String,
}

impl Default for FixtureSchema {
    fn default() -> Self {
        Self {
            competition_link: r#"a[href*="/startseite/wettbewerb/"]"#.to_string(),
            link_from: "/startseite/wettbewerb/".to_string(),
            link_to: "/tabelle/wettbewerb/".to_string(),
            block: "div.box".to_string(),
            table: "table".to_string(),
            row: "tbody tr".to_string(),
            block_selection: BlockSelection::default(),
            matchday_cell: 1,
            date_cell: 2,
            time_cell: 3,
            home_team_cell: 5,
            away_team_cell: 7,
            result_cell: 11,
            score: "span".to_string(),
            score_placeholder: "-".to_string(),
        }
    }
}

impl FixtureSchema {
    pub fn rewrite_link(&self, href: &str) -> String {
        href.replace(&self.link_from, &self.link_to)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsSchema {
    pub container: String,
    pub row: String,
    pub cell_names: Vec<String>,
    pub header_rows: usize,
    /// 0-based columns removed before the positions below apply.
    pub dropped_columns: Vec<usize>,
    pub position: usize,
    pub spacer: usize,
    pub team_name: usize,
    pub games_played: usize,
    pub draws: usize,
    pub points: usize,
}

impl Default for StandingsSchema {
    fn default() -> Self {
        Self {
            container: "div#yw1.grid-view".to_string(),
            row: "tr".to_string(),
            cell_names: vec!["td".to_string(), "th".to_string()],
            header_rows: 1,
            // wins, losses, goals, goal difference
            dropped_columns: vec![4, 6, 7, 8],
            position: 0,
            spacer: 1,
            team_name: 2,
            games_played: 3,
            draws: 4,
            points: 5,
        }
    }
}

impl StandingsSchema {
    pub fn widest_column(&self) -> usize {
        [
            self.position,
            self.spacer,
            self.team_name,
            self.games_played,
            self.draws,
            self.points,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionSchema {
    pub version: String,
    pub fixtures: FixtureSchema,
    pub standings: StandingsSchema,
}

impl Default for ExtractionSchema {
    fn default() -> Self {
        Self {
            version: "transfermarkt-2023".to_string(),
            fixtures: FixtureSchema::default(),
            standings: StandingsSchema::default(),
        }
    }
}

impl ExtractionSchema {
    pub fn with_block_selection(mut self, block_selection: BlockSelection) -> Self {
        self.fixtures.block_selection = block_selection;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let schema = ExtractionSchema::default();
        for css in [
            &schema.fixtures.competition_link,
            &schema.fixtures.block,
            &schema.fixtures.table,
            &schema.fixtures.row,
            &schema.fixtures.score,
            &schema.standings.container,
            &schema.standings.row,
        ] {
            assert!(selector(css).is_ok(), "{} should compile", css);
        }
    }

    #[test]
    fn test_invalid_selector() {
        let err = selector("div[").unwrap_err();
        assert_eq!(err.kind(), "schema");
    }

    #[test]
    fn test_rewrite_link() {
        let schema = FixtureSchema::default();
        assert_eq!(
            schema.rewrite_link("/liga-portugal/startseite/wettbewerb/PO1/saison_id/2023"),
            "/liga-portugal/tabelle/wettbewerb/PO1/saison_id/2023"
        );
    }

    #[test]
    fn test_block_selection_from_str() {
        assert_eq!("min-rows:15".parse::<BlockSelection>().unwrap(), BlockSelection::MinRows(15));
        assert_eq!("nth:6".parse::<BlockSelection>().unwrap(), BlockSelection::Nth(6));
        assert!("nth:0".parse::<BlockSelection>().is_err());
        assert!("sixth".parse::<BlockSelection>().is_err());
    }

    #[test]
    fn test_widest_column() {
        assert_eq!(StandingsSchema::default().widest_column(), 5);
    }
}
