//! Game Descriptor: typed facts derived from one gamecenter landing payload
//!
//! Holds the raw landing record and computes everything else on access, so
//! a successful [`Game::refresh`] atomically swaps every derived fact at
//! once. State classification goes through closed-vocabulary mappings with
//! an explicit Unknown fallback; unmapped upstream values never error.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use std::fmt;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::{START_TIME_UTC_FORMAT, UNKNOWN, UTAH_FULL_NAME, UTAH_TEAM_ID};
use crate::data_fetcher::client::fetch;
use crate::data_fetcher::models::{GameLanding, LandingTeam};
use crate::data_fetcher::team::Team;
use crate::data_fetcher::urls::build_gamecenter_url;

/// Live/final play state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Live,
    Final,
    Scheduled,
    Unknown,
}

impl GameState {
    /// Total mapping from the upstream `gameState` vocabulary. Anything
    /// outside the known set resolves to `Unknown`.
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "LIVE" | "CRIT" => GameState::Live,
            "FINAL" | "OFF" | "OVER" => GameState::Final,
            "FUT" | "PRE" => GameState::Scheduled,
            _ => GameState::Unknown,
        }
    }
}

/// Administrative schedule state, distinct from play state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Scheduled,
    ToBeDetermined,
    Postponed,
    Suspended,
    Cancelled,
    Unknown,
}

impl ScheduleState {
    /// Total mapping from the upstream `gameScheduleState` vocabulary.
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "OK" => ScheduleState::Scheduled,
            "TBD" => ScheduleState::ToBeDetermined,
            "PPD" => ScheduleState::Postponed,
            "SUSP" => ScheduleState::Suspended,
            "CNCL" => ScheduleState::Cancelled,
            _ => ScheduleState::Unknown,
        }
    }
}

/// Kind of game; decides how record strings are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Preseason,
    RegularSeason,
    Playoffs,
    Unknown,
}

impl GameType {
    /// Total mapping from the upstream numeric `gameType`.
    pub fn from_upstream(value: i64) -> Self {
        match value {
            1 => GameType::Preseason,
            2 => GameType::RegularSeason,
            3 => GameType::Playoffs,
            _ => GameType::Unknown,
        }
    }
}

/// Facts about one game, derived lazily from the stored landing payload.
///
/// Two games compare equal iff their game ids are equal; the payload is
/// ignored for equality.
#[derive(Debug, Clone)]
pub struct Game {
    game_id: i64,
    landing: Option<GameLanding>,
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.game_id == other.game_id
    }
}

impl Eq for Game {}

impl std::hash::Hash for Game {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.game_id.hash(state);
    }
}

impl Game {
    /// Fetches the gamecenter landing for `game_id`. A transport or parse
    /// failure is logged and swallowed; the descriptor then starts empty and
    /// every accessor degrades to its default.
    pub async fn fetch(client: &Client, config: &Config, game_id: i64) -> Game {
        let mut game = Game {
            game_id,
            landing: None,
        };
        game.refresh(client, config).await;
        game
    }

    /// Builds a descriptor from an already-parsed landing payload. Used by
    /// [`Game::fetch`] internally and by tests.
    pub fn from_landing(game_id: i64, landing: GameLanding) -> Game {
        Game {
            game_id,
            landing: Some(landing),
        }
    }

    /// Re-fetches the landing payload in place. On success the whole record
    /// is replaced at once; on failure the prior record is retained
    /// unchanged, so readers never observe a partial update.
    ///
    /// Returns whether fresh data replaced the stored record, so callers
    /// can tell a refreshed descriptor from one serving stale facts.
    pub async fn refresh(&mut self, client: &Client, config: &Config) -> bool {
        let url = build_gamecenter_url(&config.api_domain, self.game_id);
        match fetch::<GameLanding>(client, &url).await {
            Ok(landing) => {
                debug!("Fetched landing for game {}", self.game_id);
                self.landing = Some(landing);
                true
            }
            Err(e) => {
                warn!("Failed to fetch game data for {}: {e}", self.game_id);
                false
            }
        }
    }

    pub fn game_id(&self) -> i64 {
        self.game_id
    }

    /// Season identifier as the concatenated year form, e.g. "20242025".
    pub fn season(&self) -> String {
        self.landing
            .as_ref()
            .and_then(|l| l.season)
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn game_type(&self) -> GameType {
        GameType::from_upstream(self.landing.as_ref().and_then(|l| l.game_type).unwrap_or(0))
    }

    pub fn game_state(&self) -> GameState {
        GameState::from_upstream(
            self.landing
                .as_ref()
                .and_then(|l| l.game_state.as_deref())
                .unwrap_or(""),
        )
    }

    pub fn schedule_state(&self) -> ScheduleState {
        ScheduleState::from_upstream(
            self.landing
                .as_ref()
                .and_then(|l| l.game_schedule_state.as_deref())
                .unwrap_or(""),
        )
    }

    pub fn venue(&self) -> &str {
        self.landing
            .as_ref()
            .and_then(|l| l.venue.as_ref())
            .map(|v| v.default.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn away_team_id(&self) -> i64 {
        self.landing.as_ref().map(|l| l.away_team.id).unwrap_or(0)
    }

    pub fn home_team_id(&self) -> i64 {
        self.landing.as_ref().map(|l| l.home_team.id).unwrap_or(0)
    }

    pub fn away_team_abbr(&self) -> &str {
        self.away_side()
            .and_then(|t| t.abbrev.as_deref())
            .unwrap_or("UNK")
    }

    pub fn home_team_abbr(&self) -> &str {
        self.home_side()
            .and_then(|t| t.abbrev.as_deref())
            .unwrap_or("UNK")
    }

    fn away_side(&self) -> Option<&LandingTeam> {
        self.landing.as_ref().map(|l| &l.away_team)
    }

    fn home_side(&self) -> Option<&LandingTeam> {
        self.landing.as_ref().map(|l| &l.home_team)
    }

    /// Away participant's full display name: place name + team name.
    /// Franchise 59 gets a fixed override because the upstream naming
    /// fields are wrong for it.
    pub fn away_team_full_name(&self) -> String {
        if self.away_team_id() == UTAH_TEAM_ID {
            return UTAH_FULL_NAME.to_string();
        }
        full_name_of(self.away_side())
    }

    pub fn home_team_full_name(&self) -> String {
        if self.home_team_id() == UTAH_TEAM_ID {
            return UTAH_FULL_NAME.to_string();
        }
        full_name_of(self.home_side())
    }

    pub fn away_score(&self) -> i64 {
        self.landing.as_ref().map(|l| l.away_team.score).unwrap_or(0)
    }

    pub fn home_score(&self) -> i64 {
        self.landing.as_ref().map(|l| l.home_team.score).unwrap_or(0)
    }

    /// Away side's record string. Regular season passes the upstream record
    /// through; playoffs derive "wins-losses" from the season-series
    /// counter; any other game type yields the "0-0-0" placeholder.
    pub fn away_team_record(&self) -> String {
        match self.game_type() {
            GameType::RegularSeason => self
                .landing
                .as_ref()
                .and_then(|l| l.away_team.record.clone())
                .unwrap_or_default(),
            GameType::Playoffs => {
                let (away, home) = self.season_series_wins();
                format!("{away}-{home}")
            }
            _ => "0-0-0".to_string(),
        }
    }

    /// Home side's record string; the playoff form mirrors the away one.
    pub fn home_team_record(&self) -> String {
        match self.game_type() {
            GameType::RegularSeason => self
                .landing
                .as_ref()
                .and_then(|l| l.home_team.record.clone())
                .unwrap_or_default(),
            GameType::Playoffs => {
                let (away, home) = self.season_series_wins();
                format!("{home}-{away}")
            }
            _ => "0-0-0".to_string(),
        }
    }

    fn season_series_wins(&self) -> (i64, i64) {
        self.landing
            .as_ref()
            .and_then(|l| l.summary.as_ref())
            .and_then(|s| s.season_series_wins.as_ref())
            .map(|w| (w.away_team_wins, w.home_team_wins))
            .unwrap_or((0, 0))
    }

    /// Scheduled start instant, parsed from the fixed-format UTC timestamp.
    /// Source of truth for every time derivation; `None` when the field is
    /// absent or malformed.
    pub fn start_time_utc(&self) -> Option<DateTime<Utc>> {
        self.landing
            .as_ref()
            .and_then(|l| l.start_time_utc.as_deref())
            .and_then(|s| NaiveDateTime::parse_from_str(s, START_TIME_UTC_FORMAT).ok())
            .map(|naive| naive.and_utc())
    }

    /// Start time projected into `timezone` and rendered with `format`.
    /// Empty string when the start time is unavailable.
    pub fn game_time(&self, format: &str, timezone: Tz) -> String {
        self.start_time_utc()
            .map(|t| t.with_timezone(&timezone).format(format).to_string())
            .unwrap_or_default()
    }

    /// Instant `minutes_before_start` minutes ahead of puck drop, in UTC.
    pub fn pregame_time_utc(&self, minutes_before_start: i64) -> Option<DateTime<Utc>> {
        self.start_time_utc()
            .map(|t| t - Duration::minutes(minutes_before_start))
    }

    /// Pregame instant projected into `timezone` and rendered with `format`.
    pub fn pregame_time(&self, format: &str, timezone: Tz, minutes_before_start: i64) -> String {
        self.pregame_time_utc(minutes_before_start)
            .map(|t| t.with_timezone(&timezone).format(format).to_string())
            .unwrap_or_default()
    }

    /// Whether the game starts on the current local calendar date.
    pub fn is_today(&self) -> bool {
        self.is_on_local_date(Local::now().date_naive())
    }

    /// Deterministic helper behind [`Game::is_today`]: compares the start
    /// time, projected to the system timezone, against a given date.
    pub fn is_on_local_date(&self, date: NaiveDate) -> bool {
        self.start_time_utc()
            .map(|t| t.with_timezone(&Local).date_naive() == date)
            .unwrap_or(false)
    }

    pub fn is_postponed(&self) -> bool {
        self.schedule_state() == ScheduleState::Postponed
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule_state() == ScheduleState::Scheduled
    }

    pub fn is_live(&self) -> bool {
        self.game_state() == GameState::Live
    }

    pub fn is_final(&self) -> bool {
        self.game_state() == GameState::Final
    }

    pub fn is_playoffs(&self) -> bool {
        self.game_type() == GameType::Playoffs
    }

    pub fn is_regular_season(&self) -> bool {
        self.game_type() == GameType::RegularSeason
    }

    pub fn is_preseason(&self) -> bool {
        self.game_type() == GameType::Preseason
    }

    /// Resolves the away participant into a full [`Team`] descriptor.
    /// Costs one directory fetch.
    pub async fn away_team(&self, client: &Client, config: &Config) -> Team {
        Team::fetch(client, config, self.away_team_id()).await
    }

    /// Resolves the home participant into a full [`Team`] descriptor.
    pub async fn home_team(&self, client: &Client, config: &Config) -> Team {
        Team::fetch(client, config, self.home_team_id()).await
    }
}

fn full_name_of(team: Option<&LandingTeam>) -> String {
    let place = team
        .and_then(|t| t.place_name.as_ref())
        .map(|p| p.default.as_str())
        .unwrap_or(UNKNOWN);
    let name = team
        .and_then(|t| t.name.as_ref())
        .map(|n| n.default.as_str())
        .unwrap_or(UNKNOWN);
    format!("{place} {name}")
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} - {}",
            self.away_team_full_name(),
            self.home_team_full_name(),
            self.game_time("%Y-%m-%d %I:%M %p", chrono_tz::US::Eastern)
        )
    }
}
