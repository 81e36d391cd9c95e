//! Upstream data retrieval and normalization
//!
//! Maps the loosely-typed NHL JSON feeds into stable descriptor types:
//! [`Team`](team::Team) for display attributes, [`Game`](game::Game) for a
//! single game's derived facts, and [`Schedule`](schedule::Schedule) for a
//! date- or team-scoped window of game summaries.

pub mod client;
pub mod game;
pub mod models;
pub mod schedule;
pub mod team;
pub mod urls;

pub use client::create_http_client;
pub use game::{Game, GameState, GameType, ScheduleState};
pub use schedule::Schedule;
pub use team::Team;
