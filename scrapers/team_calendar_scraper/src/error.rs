// Every failure while building one calendar response ends up in one of these
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to retrieve {url}: {reason}")]
    Retrieval { url: String, reason: String },
    #[error("Unexpected page structure: {0}")]
    Structure(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No competition link found on the schedule page")]
    MissingLink,
    #[error("Invalid extraction schema: {0}")]
    Schema(String),
}

impl ScrapeError {
    pub fn retrieval(url: &str, reason: impl ToString) -> Self {
        Self::Retrieval {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Retrieval { .. } => "retrieval",
            Self::Structure(_) => "structure",
            Self::Parse(_) => "parse",
            Self::MissingLink => "missing_link",
            Self::Schema(_) => "schema",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
