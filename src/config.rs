use crate::constants;
use crate::error::AppError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Configuration structure for the bot.
/// Handles loading, saving, and managing process-wide settings. The config
/// is loaded once at startup and treated as immutable for the process
/// lifetime.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base domain for the schedule and gamecenter endpoints.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Base domain for the franchise directory endpoint.
    #[serde(default = "default_records_api_domain")]
    pub records_api_domain: String,
    /// Subreddit the game day thread is posted to (without the /r/ prefix).
    pub subreddit: String,
    /// Tri-code of the followed team, e.g. "njd".
    #[serde(default = "default_team_tri_code")]
    pub team_tri_code: String,
    /// Reddit OAuth application client id.
    pub reddit_client_id: String,
    /// Reddit OAuth application client secret.
    pub reddit_client_secret: String,
    /// Reddit account username used for posting.
    pub reddit_username: String,
    /// Reddit account password.
    pub reddit_password: String,
    /// User agent sent with every Reddit request.
    #[serde(default = "default_user_agent")]
    pub reddit_user_agent: String,
    /// IANA timezone name used for displayed kickoff times.
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
    /// Minutes before puck drop at which the thread becomes postable.
    #[serde(default = "default_lead_time_minutes")]
    pub lead_time_minutes: i64,
    /// Seconds between decision cycles.
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
    /// How many of the newest subreddit posts to scan for duplicates.
    #[serde(default = "default_recent_thread_limit")]
    pub recent_thread_limit: u32,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs go to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_records_api_domain() -> String {
    constants::DEFAULT_RECORDS_API_DOMAIN.to_string()
}

fn default_team_tri_code() -> String {
    "njd".to_string()
}

fn default_user_agent() -> String {
    constants::reddit::DEFAULT_USER_AGENT.to_string()
}

fn default_display_timezone() -> String {
    "US/Eastern".to_string()
}

fn default_lead_time_minutes() -> i64 {
    constants::gdt::DEFAULT_LEAD_TIME_MINUTES
}

fn default_poll_interval_seconds() -> u64 {
    constants::gdt::DEFAULT_POLL_INTERVAL_SECONDS
}

fn default_recent_thread_limit() -> u32 {
    constants::gdt::DEFAULT_RECENT_THREAD_LIMIT
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            records_api_domain: default_records_api_domain(),
            subreddit: String::new(),
            team_tri_code: default_team_tri_code(),
            reddit_client_id: String::new(),
            reddit_client_secret: String::new(),
            reddit_username: String::new(),
            reddit_password: String::new(),
            reddit_user_agent: default_user_agent(),
            display_timezone: default_display_timezone(),
            lead_time_minutes: default_lead_time_minutes(),
            poll_interval_seconds: default_poll_interval_seconds(),
            recent_thread_limit: default_recent_thread_limit(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values, and a config
    /// file is not required when all mandatory values come from the
    /// environment (the usual deployment mode for this bot).
    ///
    /// # Environment Variables
    /// - `GDT_SUBREDDIT` - Target subreddit
    /// - `GDT_TEAM` - Followed team tri-code
    /// - `GDT_CLIENT_ID` / `GDT_CLIENT_SECRET` - Reddit OAuth application
    /// - `GDT_USERNAME` / `GDT_PASSWORD` - Reddit account credentials
    /// - `GDT_USER_AGENT` - Reddit user agent
    /// - `GDT_API_DOMAIN` / `GDT_RECORDS_API_DOMAIN` - Override API domains
    /// - `GDT_TIMEZONE` - Display timezone (IANA name)
    /// - `GDT_LEAD_TIME_MINUTES` - Posting lead time
    /// - `GDT_POLL_INTERVAL_SECONDS` - Cycle interval
    /// - `GDT_LOG_FILE` - Override log file path
    /// - `GDT_HTTP_TIMEOUT` - HTTP timeout in seconds
    pub async fn load() -> Result<Self, AppError> {
        let config_path = Self::get_config_path();
        Self::load_from_path(&config_path).await
    }

    /// Loads configuration from a specific file path, applying environment
    /// overrides afterwards. A missing file falls back to defaults so that
    /// env-only deployments work without any file on disk.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            let content = fs::read_to_string(path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GDT_API_DOMAIN") {
            self.api_domain = v;
        }
        if let Ok(v) = std::env::var("GDT_RECORDS_API_DOMAIN") {
            self.records_api_domain = v;
        }
        if let Ok(v) = std::env::var("GDT_SUBREDDIT") {
            self.subreddit = v;
        }
        if let Ok(v) = std::env::var("GDT_TEAM") {
            self.team_tri_code = v;
        }
        if let Ok(v) = std::env::var("GDT_CLIENT_ID") {
            self.reddit_client_id = v;
        }
        if let Ok(v) = std::env::var("GDT_CLIENT_SECRET") {
            self.reddit_client_secret = v;
        }
        if let Ok(v) = std::env::var("GDT_USERNAME") {
            self.reddit_username = v;
        }
        if let Ok(v) = std::env::var("GDT_PASSWORD") {
            self.reddit_password = v;
        }
        if let Ok(v) = std::env::var("GDT_USER_AGENT") {
            self.reddit_user_agent = v;
        }
        if let Ok(v) = std::env::var("GDT_TIMEZONE") {
            self.display_timezone = v;
        }
        if let Some(v) = parse_env::<i64>("GDT_LEAD_TIME_MINUTES") {
            self.lead_time_minutes = v;
        }
        if let Some(v) = parse_env::<u64>("GDT_POLL_INTERVAL_SECONDS") {
            self.poll_interval_seconds = v;
        }
        if let Some(v) = parse_env::<u32>("GDT_RECENT_THREAD_LIMIT") {
            self.recent_thread_limit = v;
        }
        if let Some(v) = parse_env::<u64>("GDT_HTTP_TIMEOUT") {
            self.http_timeout_seconds = v;
        }
        if let Ok(v) = std::env::var("GDT_LOG_FILE") {
            self.log_file_path = Some(v);
        }
    }

    /// Validates the configuration settings.
    ///
    /// # Validation Rules
    /// - API domains must look like URLs
    /// - Subreddit and all Reddit credentials must be non-empty
    /// - Display timezone must be a valid IANA name
    /// - Lead time must be non-negative
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, domain) in [
            ("api_domain", &self.api_domain),
            ("records_api_domain", &self.records_api_domain),
        ] {
            if !domain.starts_with("http://") && !domain.starts_with("https://") {
                return Err(AppError::config_error(format!(
                    "{name} must start with http:// or https:// (got '{domain}')"
                )));
            }
        }

        for (name, value) in [
            ("subreddit", &self.subreddit),
            ("team_tri_code", &self.team_tri_code),
            ("reddit_client_id", &self.reddit_client_id),
            ("reddit_client_secret", &self.reddit_client_secret),
            ("reddit_username", &self.reddit_username),
            ("reddit_password", &self.reddit_password),
        ] {
            if value.is_empty() {
                return Err(AppError::config_error(format!("{name} cannot be empty")));
            }
        }

        self.display_timezone.parse::<Tz>().map_err(|_| {
            AppError::config_error(format!(
                "display_timezone '{}' is not a valid IANA timezone",
                self.display_timezone
            ))
        })?;

        if self.lead_time_minutes < 0 {
            return Err(AppError::config_error("lead_time_minutes cannot be negative"));
        }

        Ok(())
    }

    /// Returns the configured display timezone, already validated by
    /// [`Config::validate`].
    pub fn display_tz(&self) -> Tz {
        self.display_timezone
            .parse::<Tz>()
            .unwrap_or(chrono_tz::US::Eastern)
    }

    /// Returns the platform-specific path for the config file.
    ///
    /// # Notes
    /// - Uses platform-specific config directory (e.g., ~/.config on Linux)
    /// - Falls back to current directory if config directory is unavailable
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("nhl_gdt")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("nhl_gdt")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if needed. Mainly used by tests and first-time setup.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}
