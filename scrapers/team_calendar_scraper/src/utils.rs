use chrono::{Datelike, NaiveDate, Weekday};
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Portuguese weekday abbreviations as published on the .pt site.
pub const WEEKDAY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("seg", "Mon"),
    ("ter", "Tue"),
    ("qua", "Wed"),
    ("qui", "Thu"),
    ("sex", "Fri"),
    ("sáb", "Sat"),
    ("sab", "Sat"),
    ("dom", "Sun"),
];

/// Indexed by zero-based month.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `Sat 25/11/2023` -> `25 Nov. 23`
    #[default]
    Localized,
    /// `Sat 25/11/2023` -> `2023-11-25`
    Iso,
}

impl FromStr for DateFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "localized" | "localised" => Ok(Self::Localized),
            "iso" => Ok(Self::Iso),
            other => Err(ScrapeError::Schema(format!("Unknown date format: {}", other))),
        }
    }
}

impl DateFormat {
    pub fn normalize(&self, raw: &str) -> Result<String> {
        match self {
            Self::Localized => normalize_localized_date(raw),
            Self::Iso => normalize_iso_date(raw),
        }
    }
}

pub fn canonical_weekday(token: &str) -> &str {
    let lowered = token.trim_end_matches('.').to_lowercase();
    WEEKDAY_ABBREVIATIONS
        .iter()
        .find(|(local, _)| *local == lowered)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(token)
}

fn split_weekday(raw: &str) -> Result<(&str, &str)> {
    raw.trim()
        .split_once(char::is_whitespace)
        .map(|(day, rest)| (day, rest.trim()))
        .ok_or_else(|| ScrapeError::Parse(format!("Invalid date format: {}", raw)))
}

pub fn normalize_localized_date(raw: &str) -> Result<String> {
    let (day, rest) = split_weekday(raw)?;
    let weekday = canonical_weekday(day)
        .parse::<Weekday>()
        .map_err(|_| ScrapeError::Parse(format!("Invalid weekday in date {}", raw)))?;
    let date = NaiveDate::parse_from_str(rest, "%d/%m/%Y")
        .map_err(|e| ScrapeError::Parse(format!("Invalid date {}: {}", raw, e)))?;
    // The published weekday is informational; the numeric date wins
    if date.weekday() != weekday {
        debug!("Weekday {} does not match {}, keeping the date", day, date);
    }

    Ok(format!(
        "{:02} {}. {}",
        date.day(),
        MONTH_ABBREVIATIONS[date.month0() as usize],
        date.format("%y")
    ))
}

pub fn normalize_iso_date(raw: &str) -> Result<String> {
    let (_, rest) = split_weekday(raw)?;
    let date = NaiveDate::parse_from_str(rest, "%d/%m/%Y")
        .map_err(|e| ScrapeError::Parse(format!("Invalid date {}: {}", raw, e)))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Joins a site-relative href onto the base URL; absolute hrefs are kept.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with("//") {
        let scheme = base_url.split_once("://").map_or("https", |(scheme, _)| scheme);
        format!("{}:{}", scheme, href)
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Direct `td`/`th` children of a row; nested tables are not descended into.
pub fn row_cells<'a>(row: &ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| names.contains(&el.value().name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_localized_date() {
        assert_eq!(normalize_localized_date("Sat 25/11/2023").unwrap(), "25 Nov. 23");
        assert_eq!(normalize_localized_date("sáb 12/08/2023").unwrap(), "12 Ago. 23");
        assert_eq!(normalize_localized_date("Dom 04/02/2024").unwrap(), "04 Fev. 24");
    }

    #[test]
    fn test_portuguese_weekday_parses() {
        assert_eq!(canonical_weekday("seg"), "Mon");
        assert!(normalize_localized_date("seg 27/11/2023").is_ok());
    }

    #[test]
    fn test_localized_date_ignores_wrong_weekday() {
        assert_eq!(normalize_localized_date("sex 25/11/2023").unwrap(), "25 Nov. 23");
        assert_eq!(normalize_localized_date("Saturday 25/11/2023").unwrap(), "25 Nov. 23");
    }

    #[test]
    fn test_localized_date_rejects_unknown_weekday() {
        let err = normalize_localized_date("xyz 25/11/2023").unwrap_err();
        assert_eq!(err.kind(), "parse");
        assert!(normalize_localized_date("sáb 31/02/2023").is_err());
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(normalize_iso_date("Sat 25/11/2023").unwrap(), "2023-11-25");
        assert_eq!(normalize_iso_date("qua 03/01/2024").unwrap(), "2024-01-03");
        assert!(normalize_iso_date("25/11/2023").is_err());
        assert!(normalize_iso_date("Sat 2023-11-25").is_err());
    }

    #[test]
    fn test_date_format_from_str() {
        assert_eq!("iso".parse::<DateFormat>().unwrap(), DateFormat::Iso);
        assert_eq!("Localized".parse::<DateFormat>().unwrap(), DateFormat::Localized);
        assert!("rfc".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://www.transfermarkt.pt", "/liga/tabelle/wettbewerb/PO1"),
            "https://www.transfermarkt.pt/liga/tabelle/wettbewerb/PO1"
        );
        assert_eq!(
            absolute_url("https://www.transfermarkt.pt/", "https://example.org/x"),
            "https://example.org/x"
        );
        assert_eq!(
            absolute_url("https://www.transfermarkt.pt", "//www.transfermarkt.pt/liga/tabelle/wettbewerb/PO1"),
            "https://www.transfermarkt.pt/liga/tabelle/wettbewerb/PO1"
        );
        assert_eq!(
            absolute_url("http://127.0.0.1:1234", "//cdn.example.org/x"),
            "http://cdn.example.org/x"
        );
    }

    #[test]
    fn test_row_cells_skips_nested_tables() {
        let html = Html::parse_fragment(
            "<table><tr><td>1</td><td><table><tr><td>inner</td></tr></table></td><th>3</th></tr></table>",
        );
        let row = html.select(&Selector::parse("tr").unwrap()).next().unwrap();
        let cells = row_cells(&row, &["td", "th"]);
        assert_eq!(cells.len(), 3);
        assert_eq!(element_text(&cells[2]), "3");
    }
}
