//! Serde models for the three upstream JSON shapes
//!
//! Only the fields the bot actually consumes are modelled; everything else
//! in the upstream payloads is ignored. Optional fields default so that a
//! sparse or drifting payload deserializes instead of failing.

use serde::{Deserialize, Serialize};

/// A string that the API wraps in a localization object, e.g.
/// `{"default": "New Jersey"}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalizedString {
    #[serde(default)]
    pub default: String,
}

// ---------------------------------------------------------------------------
// Schedule endpoints (league-wide by date, club by season)
// ---------------------------------------------------------------------------

/// One lightweight game summary inside a schedule response. This is the raw
/// shape held by the schedule window; it is resolved into a full
/// [`Game`](super::Game) on demand.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "gameDate", default)]
    pub game_date: String,
    #[serde(rename = "gameState", default)]
    pub game_state: String,
    #[serde(rename = "gameScheduleState", default)]
    pub game_schedule_state: String,
    #[serde(rename = "awayTeam", default)]
    pub away_team: EntryTeam,
    #[serde(rename = "homeTeam", default)]
    pub home_team: EntryTeam,
}

/// Participant stub inside a schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntryTeam {
    #[serde(default)]
    pub id: i64,
}

/// League-wide schedule response: a week's games bucketed by day.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueScheduleResponse {
    #[serde(rename = "gameWeek", default)]
    pub game_week: Vec<GameWeekDay>,
}

/// One day bucket inside the league-wide schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct GameWeekDay {
    #[serde(default)]
    pub games: Vec<ScheduleEntry>,
}

/// Club season schedule response.
#[derive(Debug, Clone, Deserialize)]
pub struct ClubScheduleResponse {
    #[serde(default)]
    pub games: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Gamecenter landing endpoint
// ---------------------------------------------------------------------------

/// The gamecenter landing payload for one game. Source of truth for every
/// derived fact on [`Game`](super::Game).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameLanding {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub season: Option<i64>,
    #[serde(rename = "gameType", default)]
    pub game_type: Option<i64>,
    #[serde(rename = "gameState", default)]
    pub game_state: Option<String>,
    #[serde(rename = "gameScheduleState", default)]
    pub game_schedule_state: Option<String>,
    #[serde(rename = "startTimeUTC", default)]
    pub start_time_utc: Option<String>,
    #[serde(default)]
    pub venue: Option<LocalizedString>,
    #[serde(rename = "awayTeam", default)]
    pub away_team: LandingTeam,
    #[serde(rename = "homeTeam", default)]
    pub home_team: LandingTeam,
    #[serde(default)]
    pub summary: Option<LandingSummary>,
}

/// Participant block inside a landing payload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LandingTeam {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(rename = "placeName", default)]
    pub place_name: Option<LocalizedString>,
    // Older payloads use "name", newer ones "commonName"
    #[serde(rename = "name", alias = "commonName", default)]
    pub name: Option<LocalizedString>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub record: Option<String>,
}

/// Summary block; only the season-series counter is consumed (playoff
/// record strings).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LandingSummary {
    #[serde(rename = "seasonSeriesWins", default)]
    pub season_series_wins: Option<SeasonSeriesWins>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeasonSeriesWins {
    #[serde(rename = "awayTeamWins", default)]
    pub away_team_wins: i64,
    #[serde(rename = "homeTeamWins", default)]
    pub home_team_wins: i64,
}

// ---------------------------------------------------------------------------
// Franchise directory endpoint
// ---------------------------------------------------------------------------

/// Directory response: franchises, each with its historical team records.
#[derive(Debug, Clone, Deserialize)]
pub struct FranchiseResponse {
    #[serde(default)]
    pub data: Vec<Franchise>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Franchise {
    #[serde(default)]
    pub teams: Vec<DirectoryTeam>,
}

/// One team record inside the franchise directory. Unlike the landing
/// payload, names here are plain strings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DirectoryTeam {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "triCode", default)]
    pub tri_code: Option<String>,
    #[serde(rename = "placeName", default)]
    pub place_name: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub division: Option<NamedRecord>,
    #[serde(default)]
    pub conference: Option<NamedRecord>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NamedRecord {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_entry_defaults() {
        let json = r#"{"id": 2024020001}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, 2024020001);
        assert!(entry.game_date.is_empty());
        assert!(entry.game_state.is_empty());
        assert!(entry.game_schedule_state.is_empty());
        assert_eq!(entry.away_team.id, 0);
        assert_eq!(entry.home_team.id, 0);
    }

    #[test]
    fn test_schedule_entry_full_shape() {
        let json = r#"{
            "id": 2024020500,
            "gameDate": "2024-12-01",
            "gameState": "FUT",
            "gameScheduleState": "OK",
            "awayTeam": {"id": 1, "abbrev": "NJD"},
            "homeTeam": {"id": 3}
        }"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.game_date, "2024-12-01");
        assert_eq!(entry.game_state, "FUT");
        assert_eq!(entry.game_schedule_state, "OK");
        assert_eq!(entry.away_team.id, 1);
        assert_eq!(entry.home_team.id, 3);
    }

    #[test]
    fn test_landing_accepts_common_name_alias() {
        let json = r#"{
            "id": 2024020001,
            "awayTeam": {
                "id": 1,
                "placeName": {"default": "New Jersey"},
                "commonName": {"default": "Devils"}
            },
            "homeTeam": {"id": 3}
        }"#;
        let landing: GameLanding = serde_json::from_str(json).unwrap();

        assert_eq!(
            landing.away_team.name.as_ref().map(|n| n.default.as_str()),
            Some("Devils")
        );
    }

    #[test]
    fn test_landing_empty_object_deserializes() {
        let landing: GameLanding = serde_json::from_str("{}").unwrap();

        assert_eq!(landing.id, 0);
        assert!(landing.season.is_none());
        assert!(landing.start_time_utc.is_none());
        assert_eq!(landing.away_team.score, 0);
        assert!(landing.summary.is_none());
    }

    #[test]
    fn test_league_schedule_week_buckets() {
        let json = r#"{
            "gameWeek": [
                {"games": [{"id": 1}, {"id": 2}]},
                {"games": [{"id": 3}]}
            ]
        }"#;
        let response: LeagueScheduleResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.game_week.len(), 2);
        assert_eq!(response.game_week[0].games.len(), 2);
    }

    #[test]
    fn test_directory_team_plain_string_names() {
        let json = r#"{
            "data": [
                {"teams": [
                    {"id": 1, "triCode": "NJD", "placeName": "New Jersey",
                     "fullName": "New Jersey Devils",
                     "division": {"name": "Metropolitan"},
                     "conference": {"name": "Eastern"}}
                ]}
            ]
        }"#;
        let response: FranchiseResponse = serde_json::from_str(json).unwrap();

        let team = &response.data[0].teams[0];
        assert_eq!(team.place_name.as_deref(), Some("New Jersey"));
        assert_eq!(team.full_name.as_deref(), Some("New Jersey Devils"));
        assert_eq!(
            team.division.as_ref().and_then(|d| d.name.as_deref()),
            Some("Metropolitan")
        );
    }
}
