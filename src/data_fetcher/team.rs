//! Team Descriptor: display attributes for one team id
//!
//! Backed by the franchise directory, which is fetched whole and filtered
//! client-side. A failed fetch leaves the backing record empty and every
//! accessor degrades to the "Unknown" sentinel rather than erroring.

use reqwest::Client;
use tracing::warn;

use crate::config::Config;
use crate::constants::UNKNOWN;
use crate::data_fetcher::client::fetch;
use crate::data_fetcher::models::{DirectoryTeam, FranchiseResponse};
use crate::data_fetcher::urls::build_franchise_url;

/// Read-only projection of one directory team record. Constructed with one
/// fetch and immutable thereafter; there is no in-place refresh.
#[derive(Debug, Clone)]
pub struct Team {
    team_id: i64,
    record: Option<DirectoryTeam>,
}

impl Team {
    /// Fetches the franchise directory and picks the first team record
    /// matching `team_id`. Transport and parse failures are logged and
    /// swallowed; the returned descriptor then answers every accessor with
    /// its sentinel value.
    pub async fn fetch(client: &Client, config: &Config, team_id: i64) -> Team {
        let url = build_franchise_url(&config.records_api_domain);
        let record = match fetch::<FranchiseResponse>(client, &url).await {
            Ok(response) => Self::find_in_directory(&response, team_id),
            Err(e) => {
                warn!("Failed to fetch team data for id {team_id}: {e}");
                None
            }
        };
        Team { team_id, record }
    }

    /// Builds a descriptor directly from an already-parsed directory
    /// response. Used by [`Team::fetch`] and by tests.
    pub fn from_directory(response: &FranchiseResponse, team_id: i64) -> Team {
        Team {
            team_id,
            record: Self::find_in_directory(response, team_id),
        }
    }

    fn find_in_directory(response: &FranchiseResponse, team_id: i64) -> Option<DirectoryTeam> {
        response
            .data
            .iter()
            .flat_map(|franchise| franchise.teams.iter())
            .find(|team| team.id == team_id)
            .cloned()
    }

    /// Upstream team identifier, or 0 when the lookup found nothing.
    pub fn id(&self) -> i64 {
        self.record.as_ref().map(|r| r.id).unwrap_or(0)
    }

    /// Three-letter team code.
    pub fn abbreviation(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|r| r.tri_code.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn city(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|r| r.place_name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn full_name(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|r| r.full_name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn division(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|r| r.division.as_ref())
            .and_then(|d| d.name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn conference(&self) -> &str {
        self.record
            .as_ref()
            .and_then(|r| r.conference.as_ref())
            .and_then(|c| c.name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Identifier the descriptor was constructed with, regardless of
    /// whether the lookup succeeded.
    pub fn requested_id(&self) -> i64 {
        self.team_id
    }
}
