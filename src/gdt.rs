//! Announcement Decision: when and whether to post the game day thread
//!
//! Every decision cycle re-derives eligibility from scratch and re-scans
//! the newest subreddit posts for a duplicate; the subreddit itself is the
//! only source of truth for "already posted". No failure here crosses the
//! boundary: each one is logged and turns the cycle into a no-op.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::gdt::THREAD_BODY;
use crate::data_fetcher::{Game, Schedule};
use crate::reddit::RedditClient;

/// Builds the thread title: both participants' full names and the kickoff
/// time on a 12-hour clock in the display timezone, e.g.
/// `GDT: New Jersey Devils at New York Rangers - 07:00 PM EST`.
pub fn build_title(game: &Game, timezone: Tz) -> String {
    format!(
        "GDT: {} at {} - {}",
        game.away_team_full_name(),
        game.home_team_full_name(),
        game.game_time("%I:%M %p %Z", timezone)
    )
}

/// A game is eligible once it is inside the lead-time window: the start
/// time minus `lead_time` must already have passed. A game with no known
/// start time is never eligible.
pub fn is_eligible(game: &Game, now: DateTime<Utc>, lead_time: Duration) -> bool {
    match game.start_time_utc() {
        Some(start) => now >= start - lead_time,
        None => false,
    }
}

/// Scans existing titles for one that already contains both participants'
/// full display names. Plain substring containment, matching what the
/// thread titles are built from.
pub fn find_duplicate<'a>(titles: &'a [String], away: &str, home: &str) -> Option<&'a str> {
    titles
        .iter()
        .find(|title| title.contains(away) && title.contains(home))
        .map(|s| s.as_str())
}

/// Posts the game day thread for `game` unless one already exists.
///
/// Reads the newest posts in the configured subreddit first; if the
/// duplicate scan cannot run (listing failed), posting is skipped for this
/// cycle rather than risking a double thread. At most one write happens.
pub async fn post_game_day_thread(
    reddit: &RedditClient,
    config: &Config,
    game: &Game,
    dry_run: bool,
) {
    let away = game.away_team_full_name();
    let home = game.home_team_full_name();
    let title = build_title(game, config.display_tz());

    let titles = match reddit
        .recent_titles(&config.subreddit, config.recent_thread_limit)
        .await
    {
        Ok(titles) => titles,
        Err(e) => {
            warn!("Could not list existing threads, skipping post this cycle: {e}");
            return;
        }
    };

    if let Some(existing) = find_duplicate(&titles, &away, &home) {
        info!("Game thread already exists: {existing}");
        return;
    }

    if dry_run {
        info!("Dry run: would post \"{title}\"");
        return;
    }

    match reddit
        .submit_self_post(&config.subreddit, &title, THREAD_BODY)
        .await
    {
        Ok(()) => info!("Posted thread: {title}"),
        Err(e) => warn!("Failed to submit thread: {e}"),
    }
}

/// One full decision cycle: fetch the followed team's schedule, find the
/// next upcoming game, check the lead-time window, then deduplicate and
/// post. Runs to completion and never errors; the polling loop just calls
/// it again next tick.
pub async fn run_cycle(
    client: &Client,
    config: &Config,
    reddit: &RedditClient,
    date: Option<&str>,
    dry_run: bool,
) {
    let mut schedule = match Schedule::new(date) {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!("Invalid schedule date: {e}");
            return;
        }
    };
    schedule
        .fetch_for_team(client, config, &config.team_tri_code)
        .await;

    let Some(game) = schedule.next_upcoming(client, config).await else {
        info!("No upcoming game found");
        return;
    };

    let now = Utc::now();
    if !is_eligible(&game, now, Duration::minutes(config.lead_time_minutes)) {
        info!(
            "Next game not yet in the {}-minute window: {game}",
            config.lead_time_minutes
        );
        return;
    }

    post_game_day_thread(reddit, config, &game, dry_run).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{GameLanding, LandingTeam, LocalizedString};

    fn localized(s: &str) -> Option<LocalizedString> {
        Some(LocalizedString {
            default: s.to_string(),
        })
    }

    fn game_starting_at(start: &str) -> Game {
        Game::from_landing(
            1,
            GameLanding {
                id: 1,
                game_state: Some("FUT".to_string()),
                game_schedule_state: Some("OK".to_string()),
                start_time_utc: Some(start.to_string()),
                away_team: LandingTeam {
                    id: 1,
                    place_name: localized("New Jersey"),
                    name: localized("Devils"),
                    ..LandingTeam::default()
                },
                home_team: LandingTeam {
                    id: 3,
                    place_name: localized("New York"),
                    name: localized("Rangers"),
                    ..LandingTeam::default()
                },
                ..GameLanding::default()
            },
        )
    }

    #[test]
    fn test_title_template() {
        let game = game_starting_at("2024-12-01T00:00:00Z");
        let title = build_title(&game, chrono_tz::US::Eastern);
        // Midnight UTC on Dec 1 is 7 PM EST on Nov 30
        assert_eq!(
            title,
            "GDT: New Jersey Devils at New York Rangers - 07:00 PM EST"
        );
    }

    #[test]
    fn test_eligibility_window_boundaries() {
        let game = game_starting_at("2024-12-01T00:00:00Z");
        let lead = Duration::minutes(30);
        let start = game.start_time_utc().unwrap();

        // Too early: 31 minutes out
        assert!(!is_eligible(&game, start - Duration::minutes(31), lead));
        // Exactly at the window edge
        assert!(is_eligible(&game, start - Duration::minutes(30), lead));
        // Inside the window and after puck drop
        assert!(is_eligible(&game, start - Duration::minutes(5), lead));
        assert!(is_eligible(&game, start + Duration::minutes(5), lead));
        // Zero lead time means only at/after the start itself
        assert!(!is_eligible(&game, start - Duration::minutes(1), Duration::zero()));
        assert!(is_eligible(&game, start, Duration::zero()));
    }

    #[test]
    fn test_unknown_start_time_is_never_eligible() {
        let game = Game::from_landing(1, GameLanding::default());
        assert!(!is_eligible(&game, Utc::now(), Duration::minutes(30)));
    }

    #[test]
    fn test_duplicate_requires_both_names() {
        let titles = vec![
            "Postgame thread: big win".to_string(),
            "GDT: New Jersey Devils at New York Rangers - 07:00 PM EST".to_string(),
        ];

        assert!(
            find_duplicate(&titles, "New Jersey Devils", "New York Rangers").is_some()
        );
        // One name alone is not a duplicate
        assert!(
            find_duplicate(&titles, "New Jersey Devils", "Boston Bruins").is_none()
        );
        assert!(find_duplicate(&[], "A", "B").is_none());
    }
}
