pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod formatter;
pub mod leaderboard;
pub mod retry;
pub mod store;

pub use shared::{models::*, validation::*};
pub use api::LeaderboardApi;
pub use leaderboard::{Leaderboard, UnvoteOutcome, VoteOutcome};
