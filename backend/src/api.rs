use shared::models::{RankResponse, TopSongsResponse, VoteResponse};

use crate::error::StoreError;
use crate::leaderboard::{Leaderboard, UnvoteOutcome, VoteOutcome};

pub const DEFAULT_TOP_N: i64 = 10;

/// Wire-facing facade over the engine for the HTTP layer. Logical
/// rejections become `success: false` with a descriptive message; store
/// failures stay `Err` so the caller can report them separately.
pub struct LeaderboardApi {
    board: Leaderboard,
}

impl LeaderboardApi {
    pub fn new(board: Leaderboard) -> Self {
        Self { board }
    }

    pub fn engine(&self) -> &Leaderboard {
        &self.board
    }

    pub async fn vote(&self, user_id: &str, song_id: &str) -> Result<VoteResponse, StoreError> {
        let (success, message) = match self.board.vote(user_id, song_id).await? {
            VoteOutcome::Applied => (true, "Vote recorded."),
            VoteOutcome::AlreadyVoted => (false, "Already voted for this song."),
            VoteOutcome::UnknownUser => (false, "User not registered."),
            VoteOutcome::InvalidId => (false, "Invalid user or song id."),
        };
        Ok(VoteResponse {
            success,
            message: message.into(),
        })
    }

    pub async fn unvote(&self, user_id: &str, song_id: &str) -> Result<VoteResponse, StoreError> {
        let (success, message) = match self.board.unvote(user_id, song_id).await? {
            UnvoteOutcome::Applied => (true, "Vote removed."),
            UnvoteOutcome::NotVoted => (false, "You have not voted for this song."),
            UnvoteOutcome::InvalidId => (false, "Invalid user or song id."),
        };
        Ok(VoteResponse {
            success,
            message: message.into(),
        })
    }

    pub async fn top_songs(&self, n: Option<i64>) -> Result<TopSongsResponse, StoreError> {
        let data = self.board.top_songs(n.unwrap_or(DEFAULT_TOP_N)).await?;
        Ok(TopSongsResponse {
            success: true,
            data,
        })
    }

    pub async fn song_rank(&self, song_id: &str) -> Result<RankResponse, StoreError> {
        Ok(match self.board.song_rank(song_id).await? {
            Some(rank) => RankResponse {
                success: true,
                rank: Some(rank),
                message: None,
            },
            None => RankResponse {
                success: false,
                rank: None,
                message: Some("Song not ranked.".into()),
            },
        })
    }
}
