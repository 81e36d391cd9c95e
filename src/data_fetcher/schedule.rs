//! Schedule Window: a date- or team-scoped collection of game summaries
//!
//! Seeded with an anchor date, populated by an explicit fetch, and queried
//! for specific games. Entries stay in the raw upstream shape until a
//! lookup resolves them into full [`Game`] descriptors.

use chrono::{Datelike, NaiveDate, Utc};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::data_fetcher::client::fetch;
use crate::data_fetcher::game::{Game, GameState, ScheduleState};
use crate::data_fetcher::models::{ClubScheduleResponse, LeagueScheduleResponse, ScheduleEntry};
use crate::data_fetcher::urls::{build_club_schedule_url, build_league_schedule_url};
use crate::error::AppError;

const ANCHOR_DATE_FORMAT: &str = "%Y-%m-%d";

/// A season's identifier is the concatenation of its starting and ending
/// calendar years. The season rolls over in August: months 8-12 belong to
/// the season starting that year, months 1-7 to the one ending that year.
pub fn season_for(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() > 7 {
        format!("{}{}", year, year + 1)
    } else {
        format!("{}{}", year - 1, year)
    }
}

/// Date-anchored window of lightweight game summaries for one season.
#[derive(Debug, Clone)]
pub struct Schedule {
    date: NaiveDate,
    season: String,
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates a window anchored at `date` (`YYYY-MM-DD`), or at today in
    /// UTC when `None`. Entries start empty; callers populate them with one
    /// of the fetch operations.
    pub fn new(date: Option<&str>) -> Result<Schedule, AppError> {
        let date = match date {
            Some(s) => parse_anchor_date(s)?,
            None => Utc::now().date_naive(),
        };
        Ok(Schedule {
            date,
            season: season_for(date),
            entries: Vec::new(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    /// The raw, unresolved summaries currently held by the window.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Moves the anchor date and recomputes the season. Entries are kept
    /// as-is; callers must refetch for the new date to take effect.
    pub fn set_date(&mut self, date: &str) -> Result<(), AppError> {
        self.date = parse_anchor_date(date)?;
        self.season = season_for(self.date);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_entries(date: &str, entries: Vec<ScheduleEntry>) -> Schedule {
        let date = parse_anchor_date(date).unwrap();
        Schedule {
            date,
            season: season_for(date),
            entries,
        }
    }

    /// Populates entries from the league-wide schedule for the anchor
    /// date's week, taking the first day bucket of the response. A fetch
    /// failure is logged and leaves the current entries untouched.
    pub async fn fetch_league_wide(&mut self, client: &Client, config: &Config) {
        let date = self.date.format(ANCHOR_DATE_FORMAT).to_string();
        let url = build_league_schedule_url(&config.api_domain, &date);
        match fetch::<LeagueScheduleResponse>(client, &url).await {
            Ok(response) => match response.game_week.into_iter().next() {
                Some(day) => {
                    info!("Fetched {} league games for {date}", day.games.len());
                    self.entries = day.games;
                }
                None => {
                    warn!("League schedule for {date} contained no week buckets");
                }
            },
            Err(e) => {
                warn!("Failed to fetch full schedule: {e}");
            }
        }
    }

    /// Populates entries from one club's season schedule, scoped by the
    /// window's current season. Same failure policy as
    /// [`Schedule::fetch_league_wide`].
    pub async fn fetch_for_team(&mut self, client: &Client, config: &Config, tri_code: &str) {
        let url = build_club_schedule_url(&config.api_domain, tri_code, &self.season);
        match fetch::<ClubScheduleResponse>(client, &url).await {
            Ok(response) => {
                info!(
                    "Fetched {} games for {tri_code} in season {}",
                    response.games.len(),
                    self.season
                );
                self.entries = response.games;
            }
            Err(e) => {
                warn!("Failed to fetch team schedule: {e}");
            }
        }
    }

    /// Resolves the first `limit` entries (or all of them) into full game
    /// descriptors, one gamecenter fetch each, preserving entry order.
    pub async fn resolve_all(
        &self,
        client: &Client,
        config: &Config,
        limit: Option<usize>,
    ) -> Vec<Game> {
        let take = limit.unwrap_or(self.entries.len());
        let mut games = Vec::with_capacity(take.min(self.entries.len()));
        for entry in self.entries.iter().take(take) {
            games.push(Game::fetch(client, config, entry.id).await);
        }
        games
    }

    /// First entry played on the anchor date, resolved. `None` is the
    /// normal no-game-today answer, not an error.
    pub async fn find_by_date(&self, client: &Client, config: &Config) -> Option<Game> {
        let date = self.date.format(ANCHOR_DATE_FORMAT).to_string();
        let entry = self.entries.iter().find(|e| e.game_date == date)?;
        Some(Game::fetch(client, config, entry.id).await)
    }

    /// First entry in which `team_id` participates, resolved.
    pub async fn find_by_team(
        &self,
        client: &Client,
        config: &Config,
        team_id: i64,
    ) -> Option<Game> {
        let entry = self.entries.iter().find(|e| involves(e, team_id))?;
        Some(Game::fetch(client, config, entry.id).await)
    }

    /// Entry with a matching game id, resolved.
    pub async fn find_by_id(&self, client: &Client, config: &Config, game_id: i64) -> Option<Game> {
        let entry = self.entries.iter().find(|e| e.id == game_id)?;
        Some(Game::fetch(client, config, entry.id).await)
    }

    /// First entry that is still upcoming: classified as scheduled to play
    /// and administratively on track (not postponed, cancelled, etc.).
    ///
    /// Entries are scanned in upstream order, so this is the earliest
    /// qualifying game only because the provider returns entries
    /// date-ordered; that ordering is not enforced here.
    pub fn next_upcoming_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| is_upcoming(e))
    }

    /// [`Schedule::next_upcoming_entry`] resolved into a full descriptor.
    pub async fn next_upcoming(&self, client: &Client, config: &Config) -> Option<Game> {
        let entry = self.next_upcoming_entry()?;
        Some(Game::fetch(client, config, entry.id).await)
    }

    /// Next upcoming game in which `team_id` participates.
    pub async fn next_upcoming_against(
        &self,
        client: &Client,
        config: &Config,
        team_id: i64,
    ) -> Option<Game> {
        let entry = self
            .entries
            .iter()
            .find(|e| involves(e, team_id) && is_upcoming(e))?;
        Some(Game::fetch(client, config, entry.id).await)
    }
}

fn involves(entry: &ScheduleEntry, team_id: i64) -> bool {
    entry.away_team.id == team_id || entry.home_team.id == team_id
}

fn is_upcoming(entry: &ScheduleEntry) -> bool {
    GameState::from_upstream(&entry.game_state) == GameState::Scheduled
        && ScheduleState::from_upstream(&entry.game_schedule_state) == ScheduleState::Scheduled
}

fn parse_anchor_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, ANCHOR_DATE_FORMAT).map_err(|e| {
        AppError::datetime_parse_error(format!("Invalid schedule date '{date}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::EntryTeam;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn entry(id: i64, state: &str, schedule_state: &str, away: i64, home: i64) -> ScheduleEntry {
        ScheduleEntry {
            id,
            game_date: "2024-12-01".to_string(),
            game_state: state.to_string(),
            game_schedule_state: schedule_state.to_string(),
            away_team: EntryTeam { id: away },
            home_team: EntryTeam { id: home },
        }
    }

    #[test]
    fn test_season_rolls_over_in_august() {
        // Months 1-7 belong to the season ending that year
        for month in 1..=7 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(season_for(date), "20232024", "month {month}");
        }
        // Months 8-12 belong to the season starting that year
        for month in 8..=12 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(season_for(date), "20242025", "month {month}");
        }
    }

    #[test]
    fn test_season_examples_from_docs() {
        assert_eq!(
            season_for(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
            "20232024"
        );
        assert_eq!(
            season_for(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()),
            "20242025"
        );
    }

    #[test]
    fn test_new_rejects_malformed_date() {
        assert!(Schedule::new(Some("2024-13-99")).is_err());
        assert!(Schedule::new(Some("next tuesday")).is_err());
    }

    #[test]
    fn test_new_defaults_to_today() {
        let schedule = Schedule::new(None).unwrap();
        assert_eq!(schedule.date(), Utc::now().date_naive());
        assert!(schedule.entries().is_empty());
    }

    #[test]
    fn test_set_date_recomputes_season_but_keeps_entries() {
        let mut schedule =
            Schedule::with_entries("2024-10-01", vec![entry(1, "FUT", "OK", 1, 3)]);
        assert_eq!(schedule.season(), "20242025");

        schedule.set_date("2024-03-15").unwrap();
        assert_eq!(schedule.season(), "20232024");
        // Entries survive a date move; callers must refetch explicitly
        assert_eq!(schedule.entries().len(), 1);
    }

    #[test]
    fn test_next_upcoming_skips_final_and_postponed() {
        let schedule = Schedule::with_entries(
            "2024-12-01",
            vec![
                entry(1, "FINAL", "OK", 1, 3),
                entry(2, "FUT", "OK", 4, 5),
                entry(3, "FUT", "PPD", 6, 7),
            ],
        );

        let upcoming = schedule.next_upcoming_entry().unwrap();
        assert_eq!(upcoming.id, 2);
    }

    #[test]
    fn test_next_upcoming_none_when_nothing_qualifies() {
        let schedule = Schedule::with_entries(
            "2024-12-01",
            vec![
                entry(1, "FINAL", "OK", 1, 3),
                entry(2, "FUT", "CNCL", 4, 5),
            ],
        );
        assert!(schedule.next_upcoming_entry().is_none());
    }

    #[test]
    fn test_upcoming_predicate_accepts_pre_state() {
        let schedule =
            Schedule::with_entries("2024-12-01", vec![entry(9, "PRE", "OK", 1, 3)]);
        assert_eq!(schedule.next_upcoming_entry().unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_fetch_league_wide_takes_first_week_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule/2024-12-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "gameWeek": [
                    {"games": [{"id": 10}, {"id": 11}]},
                    {"games": [{"id": 12}]}
                ]
            })))
            .mount(&server)
            .await;

        let client = crate::data_fetcher::create_http_client(5).unwrap();
        let config = Config {
            api_domain: server.uri(),
            ..Config::default()
        };

        let mut schedule = Schedule::new(Some("2024-12-01")).unwrap();
        schedule.fetch_league_wide(&client, &config).await;

        let ids: Vec<i64> = schedule.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_fetch_for_team_uses_window_season() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/club-schedule-season/njd/20242025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "games": [{"id": 20, "gameState": "FUT", "gameScheduleState": "OK"}]
            })))
            .mount(&server)
            .await;

        let client = crate::data_fetcher::create_http_client(5).unwrap();
        let config = Config {
            api_domain: server.uri(),
            ..Config::default()
        };

        let mut schedule = Schedule::new(Some("2024-12-01")).unwrap();
        schedule.fetch_for_team(&client, &config, "njd").await;

        assert_eq!(schedule.entries().len(), 1);
        assert_eq!(schedule.entries()[0].id, 20);
    }

    #[tokio::test]
    async fn test_fetch_failure_retains_prior_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::data_fetcher::create_http_client(5).unwrap();
        let config = Config {
            api_domain: server.uri(),
            ..Config::default()
        };

        let mut schedule =
            Schedule::with_entries("2024-12-01", vec![entry(1, "FUT", "OK", 1, 3)]);
        schedule.fetch_for_team(&client, &config, "njd").await;

        // Failed refetch leaves the previous window intact
        assert_eq!(schedule.entries().len(), 1);
        assert_eq!(schedule.entries()[0].id, 1);
    }

    #[tokio::test]
    async fn test_find_by_team_and_by_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamecenter/2/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 2, "gameState": "FUT", "gameScheduleState": "OK"
            })))
            .mount(&server)
            .await;

        let client = crate::data_fetcher::create_http_client(5).unwrap();
        let config = Config {
            api_domain: server.uri(),
            ..Config::default()
        };

        let schedule = Schedule::with_entries(
            "2024-12-01",
            vec![entry(1, "FINAL", "OK", 8, 9), entry(2, "FUT", "OK", 4, 5)],
        );

        let by_team = schedule.find_by_team(&client, &config, 5).await.unwrap();
        assert_eq!(by_team.game_id(), 2);

        // First entry matches the anchor date; its landing fetch 404s, so it
        // resolves to an empty descriptor that still carries the right id
        let by_date = schedule.find_by_date(&client, &config).await.unwrap();
        assert_eq!(by_date.game_id(), 1);

        let missing = schedule.find_by_team(&client, &config, 77).await;
        assert!(missing.is_none());

        let against = schedule
            .next_upcoming_against(&client, &config, 4)
            .await
            .unwrap();
        assert_eq!(against.game_id(), 2);
    }
}
