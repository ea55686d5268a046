use scraper::{Html, Selector};
use tracing::debug;

use crate::{
    error::{Result, ScrapeError},
    schema::{selector, StandingsSchema},
    types::StandingsRecord,
    utils::{element_text, row_cells},
};

/// The standings page can only be located through the schedule page.
pub fn require_link(link: Option<&str>) -> Result<&str> {
    match link.map(str::trim) {
        Some(link) if !link.is_empty() => Ok(link),
        _ => Err(ScrapeError::MissingLink),
    }
}

pub struct StandingsParser {
    schema: StandingsSchema,
    container_selector: Selector,
    row_selector: Selector,
}

impl StandingsParser {
    pub fn new(schema: &StandingsSchema) -> Result<Self> {
        Ok(Self {
            schema: schema.clone(),
            container_selector: selector(&schema.container)?,
            row_selector: selector(&schema.row)?,
        })
    }

    pub fn parse(&self, html: &str) -> Result<Vec<StandingsRecord>> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.container_selector)
            .next()
            .ok_or_else(|| {
                ScrapeError::Structure(format!(
                    "Standings container {} not found",
                    self.schema.container
                ))
            })?;

        let cell_names: Vec<&str> = self.schema.cell_names.iter().map(String::as_str).collect();
        let mut standings = Vec::new();

        for row in container.select(&self.row_selector).skip(self.schema.header_rows) {
            let columns: Vec<String> = row_cells(&row, &cell_names)
                .iter()
                .enumerate()
                .filter(|(index, _)| !self.schema.dropped_columns.contains(index))
                .map(|(_, cell)| element_text(cell))
                .collect();

            standings.push(self.to_record(&columns)?);
        }
        debug!("Extracted {} standings rows", standings.len());

        Ok(standings)
    }

    fn to_record(&self, columns: &[String]) -> Result<StandingsRecord> {
        if columns.len() <= self.schema.widest_column() {
            return Err(ScrapeError::Structure(format!(
                "Standings row has {} usable columns, expected at least {}",
                columns.len(),
                self.schema.widest_column() + 1
            )));
        }

        Ok(StandingsRecord {
            position: columns[self.schema.position].clone(),
            team_name: columns[self.schema.team_name].clone(),
            games_played: columns[self.schema.games_played].clone(),
            draws: columns[self.schema.draws].clone(),
            points: columns[self.schema.points].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "<tr><th>#</th><th>Clube</th><th>Clube</th><th>J.</th><th>V</th><th>E</th><th>D</th><th>Golos</th><th>+/-</th><th>Pts.</th></tr>";

    fn team_row(position: u32, name: &str, games: u32, wins: u32, draws: u32, losses: u32, points: u32) -> String {
        format!(
            r#"<tr><td class="rechts">{position}</td><td><a href="/c"><img src="logo.png"></a></td><td><a href="/c">{name}</a></td><td>{games}</td><td>{wins}</td><td>{draws}</td><td>{losses}</td><td>50:20</td><td>30</td><td>{points}</td></tr>"#
        )
    }

    fn standings_page(rows: &[String]) -> String {
        format!(
            r#"<html><body><div id="yw1" class="grid-view"><table class="items"><thead>{}</thead><tbody>{}</tbody></table></div></body></html>"#,
            HEADER,
            rows.concat()
        )
    }

    fn parser() -> StandingsParser {
        StandingsParser::new(&StandingsSchema::default()).unwrap()
    }

    #[test]
    fn test_parse_standings() {
        let html = standings_page(&[
            team_row(1, "Sporting CP", 34, 29, 3, 2, 90),
            team_row(2, "SL Benfica", 34, 25, 5, 4, 80),
            team_row(3, "FC Porto", 34, 22, 6, 6, 72),
        ]);
        let standings = parser().parse(&html).unwrap();

        assert_eq!(standings.len(), 3);
        assert_eq!(
            standings[0],
            StandingsRecord {
                position: "1".to_string(),
                team_name: "Sporting CP".to_string(),
                games_played: "34".to_string(),
                draws: "3".to_string(),
                points: "90".to_string(),
            }
        );
        assert_eq!(
            standings.iter().map(|s| s.team_name.as_str()).collect::<Vec<_>>(),
            vec!["Sporting CP", "SL Benfica", "FC Porto"]
        );
        assert_eq!(standings[2].draws, "6");
        assert_eq!(standings[2].points, "72");
    }

    #[test]
    fn test_header_only() {
        let standings = parser().parse(&standings_page(&[])).unwrap();
        assert!(standings.is_empty());
    }

    #[test]
    fn test_missing_container() {
        let err = parser().parse("<html><body><div id=\"yw2\"></div></body></html>").unwrap_err();
        assert_eq!(err.kind(), "structure");
    }

    #[test]
    fn test_short_row() {
        let html = standings_page(&["<tr><td>1</td><td></td><td>Sporting CP</td></tr>".to_string()]);
        let err = parser().parse(&html).unwrap_err();
        assert_eq!(err.kind(), "structure");
    }

    #[test]
    fn test_require_link() {
        assert_eq!(require_link(Some("https://x/tabelle")).unwrap(), "https://x/tabelle");
        assert!(matches!(require_link(None), Err(ScrapeError::MissingLink)));
        assert!(matches!(require_link(Some("  ")), Err(ScrapeError::MissingLink)));
    }
}
