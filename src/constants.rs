//! Application-wide constants and default configuration values
//!
//! This module centralizes API endpoints, sentinel values and magic numbers
//! so the rest of the codebase stays free of inline literals.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Base domain for the schedule and gamecenter endpoints
pub const DEFAULT_API_DOMAIN: &str = "https://api-web.nhle.com/v1";

/// Base domain for the franchise/team directory endpoint
pub const DEFAULT_RECORDS_API_DOMAIN: &str = "https://records.nhl.com/site/api";

/// Query string for the franchise directory. The directory is fetched whole
/// and filtered client-side by team id.
pub const FRANCHISE_INCLUDES: &str = "include=teams.id&include=teams.active&include=teams.triCode&include=teams.placeName&include=teams.commonName&include=teams.fullName&include=teams.logos&include=teams.conference.name&include=teams.division.name";

/// Sentinel returned by descriptor accessors when upstream data is absent
pub const UNKNOWN: &str = "Unknown";

/// Franchise id whose display name the upstream feed gets wrong
pub const UTAH_TEAM_ID: i64 = 59;

/// Fixed display name for franchise 59, overriding the upstream
/// placeName + name concatenation
pub const UTAH_FULL_NAME: &str = "Utah Hockey Club";

/// Format of the `startTimeUTC` field on gamecenter responses
pub const START_TIME_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Game day thread defaults
pub mod gdt {
    /// Minutes before puck drop at which a thread becomes postable
    pub const DEFAULT_LEAD_TIME_MINUTES: i64 = 30;

    /// How many of the newest subreddit posts to scan for duplicates
    pub const DEFAULT_RECENT_THREAD_LIMIT: u32 = 10;

    /// Seconds between decision cycles
    pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 60;

    /// Self-text body of every game day thread
    pub const THREAD_BODY: &str = "Discuss the game here!";
}

/// Reddit endpoints
pub mod reddit {
    /// Token endpoint for the OAuth2 password grant
    pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

    /// Base URL for authenticated API calls
    pub const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

    /// Default user agent sent with every Reddit request
    pub const DEFAULT_USER_AGENT: &str = "rdevilsgdt";
}
