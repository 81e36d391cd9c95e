//! URL building utilities for the upstream API endpoints

use crate::constants::FRANCHISE_INCLUDES;

/// Builds the league-wide schedule URL for a calendar date.
/// The response covers a week's worth of games bucketed by day.
///
/// # Example
/// ```
/// use nhl_gdt::data_fetcher::urls::build_league_schedule_url;
///
/// let url = build_league_schedule_url("https://api.example.com/v1", "2024-10-01");
/// assert_eq!(url, "https://api.example.com/v1/schedule/2024-10-01");
/// ```
pub fn build_league_schedule_url(api_domain: &str, date: &str) -> String {
    format!("{api_domain}/schedule/{date}")
}

/// Builds the full-season schedule URL for one club.
///
/// # Example
/// ```
/// use nhl_gdt::data_fetcher::urls::build_club_schedule_url;
///
/// let url = build_club_schedule_url("https://api.example.com/v1", "njd", "20242025");
/// assert_eq!(url, "https://api.example.com/v1/club-schedule-season/njd/20242025");
/// ```
pub fn build_club_schedule_url(api_domain: &str, tri_code: &str, season: &str) -> String {
    format!("{api_domain}/club-schedule-season/{tri_code}/{season}")
}

/// Builds the gamecenter landing URL for a single game.
///
/// # Example
/// ```
/// use nhl_gdt::data_fetcher::urls::build_gamecenter_url;
///
/// let url = build_gamecenter_url("https://api.example.com/v1", 2024020001);
/// assert_eq!(url, "https://api.example.com/v1/gamecenter/2024020001/landing");
/// ```
pub fn build_gamecenter_url(api_domain: &str, game_id: i64) -> String {
    format!("{api_domain}/gamecenter/{game_id}/landing")
}

/// Builds the franchise directory URL. The directory lists every franchise
/// with its teams; filtering by team id happens client-side.
pub fn build_franchise_url(records_api_domain: &str) -> String {
    format!("{records_api_domain}/franchise?{FRANCHISE_INCLUDES}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_franchise_url_carries_includes() {
        let url = build_franchise_url("https://records.example.com/site/api");
        assert!(url.starts_with("https://records.example.com/site/api/franchise?"));
        assert!(url.contains("include=teams.id"));
        assert!(url.contains("include=teams.division.name"));
    }
}
