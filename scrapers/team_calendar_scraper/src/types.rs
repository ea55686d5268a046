use serde::{Deserialize, Serialize};

/// One game row from a team's schedule page, in page order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureRecord {
    #[serde(rename = "Jornada")]
    pub matchday: String,
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Hora")]
    pub time: String,
    #[serde(rename = "Equipa_da_casa")]
    pub home_team: String,
    /// Score as published, or `"-"` when the game has not been played.
    #[serde(rename = "Resultado")]
    pub score: String,
    #[serde(rename = "Equipa_visitante")]
    pub away_team: String,
}

/// One row of the league table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsRecord {
    #[serde(rename = "Posição")]
    pub position: String,
    #[serde(rename = "Nome")]
    pub team_name: String,
    #[serde(rename = "Jogos")]
    pub games_played: String,
    #[serde(rename = "Empates")]
    pub draws: String,
    #[serde(rename = "Pontos")]
    pub points: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarData {
    pub fixtures: Vec<FixtureRecord>,
    pub standings: Vec<StandingsRecord>,
}

/// Body of every `/transfermarkt` answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseRecord {
    pub success: bool,
    pub fixture_data: Vec<FixtureRecord>,
    pub competition_data: Vec<StandingsRecord>,
    pub error_message: Option<String>,
}

impl ResponseRecord {
    pub fn success(data: CalendarData) -> Self {
        Self {
            success: true,
            fixture_data: data.fixtures,
            competition_data: data.standings,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            fixture_data: Vec::new(),
            competition_data: Vec::new(),
            error_message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_field_names() {
        let response = ResponseRecord::success(CalendarData {
            fixtures: vec![FixtureRecord {
                matchday: "1".to_string(),
                date: "12 Ago. 23".to_string(),
                time: "20:30".to_string(),
                home_team: "Sporting CP".to_string(),
                score: "-".to_string(),
                away_team: "Vizela".to_string(),
            }],
            standings: vec![StandingsRecord {
                position: "1".to_string(),
                team_name: "Sporting CP".to_string(),
                games_played: "34".to_string(),
                draws: "3".to_string(),
                points: "90".to_string(),
            }],
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "fixture_data": [{
                    "Jornada": "1",
                    "Data": "12 Ago. 23",
                    "Hora": "20:30",
                    "Equipa_da_casa": "Sporting CP",
                    "Resultado": "-",
                    "Equipa_visitante": "Vizela"
                }],
                "competition_data": [{
                    "Posição": "1",
                    "Nome": "Sporting CP",
                    "Jogos": "34",
                    "Empates": "3",
                    "Pontos": "90"
                }],
                "error_message": null
            })
        );
    }

    #[test]
    fn test_failure_is_empty() {
        let response = ResponseRecord::failure("boom");
        assert!(!response.success);
        assert!(response.fixture_data.is_empty());
        assert!(response.competition_data.is_empty());
        assert_eq!(response.error_message.as_deref(), Some("boom"));
    }
}
