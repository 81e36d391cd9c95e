//! NHL Game Day Thread Bot Library
//!
//! This library provides the data-normalization and decision layer behind
//! the GDT bot: it maps the NHL schedule, gamecenter and franchise feeds
//! into stable descriptor types, derives temporal facts (season, pregame
//! offset, localized kickoff time), and decides when a game day thread
//! should be posted, deduplicating against existing subreddit posts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nhl_gdt::config::Config;
//! use nhl_gdt::data_fetcher::{Schedule, create_http_client};
//! use nhl_gdt::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client(config.http_timeout_seconds)?;
//!
//!     let mut schedule = Schedule::new(None)?;
//!     schedule.fetch_for_team(&client, &config, "njd").await;
//!
//!     if let Some(game) = schedule.next_upcoming(&client, &config).await {
//!         println!("Next game: {game}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod gdt;
pub mod logging;
pub mod reddit;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::{Game, GameState, GameType, Schedule, ScheduleState, Team};
pub use error::AppError;
pub use reddit::RedditClient;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
