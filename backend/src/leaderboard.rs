use std::sync::Arc;

use shared::models::TopSong;
use shared::validation::validate_id;
use tracing::{debug, instrument, warn};

use crate::directory::{SongCatalog, UserDirectory};
use crate::error::StoreError;
use crate::formatter;
use crate::retry::RetryPolicy;
use crate::store::ScoreStore;

/// The single ordered score collection all songs are ranked in.
pub const LEADERBOARD_KEY: &str = "songs:leaderboard";

/// Outcome of a vote call. Rejections are typed, not errors: a caller can
/// always tell "your vote didn't count" from "the store failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Applied,
    AlreadyVoted,
    UnknownUser,
    InvalidId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnvoteOutcome {
    Applied,
    NotVoted,
    InvalidId,
}

impl VoteOutcome {
    pub fn applied(self) -> bool {
        self == VoteOutcome::Applied
    }
}

impl UnvoteOutcome {
    pub fn applied(self) -> bool {
        self == UnvoteOutcome::Applied
    }
}

/// The leaderboard engine: sole writer of the score set and the per-user
/// vote ledgers. Holds no locks of its own; cross-request consistency is
/// delegated to the store's atomic mutations.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn ScoreStore>,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn SongCatalog>,
    retry: RetryPolicy,
}

impl Leaderboard {
    pub fn new(
        store: Arc<dyn ScoreStore>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn SongCatalog>,
    ) -> Self {
        Self::with_retry(store, users, catalog, RetryPolicy::default())
    }

    pub fn with_retry(
        store: Arc<dyn ScoreStore>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn SongCatalog>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            users,
            catalog,
            retry,
        }
    }

    fn user_votes_key(user_id: &str) -> String {
        format!("user:{user_id}:voted_songs")
    }

    /// Casts a vote. Idempotent: a second vote by the same user for the
    /// same song is a no-op reported as [`VoteOutcome::AlreadyVoted`].
    /// Fails closed on unknown users before any mutation.
    #[instrument(skip(self))]
    pub async fn vote(&self, user_id: &str, song_id: &str) -> Result<VoteOutcome, StoreError> {
        if validate_id(user_id).is_err() || validate_id(song_id).is_err() {
            warn!("Rejecting vote with malformed id");
            return Ok(VoteOutcome::InvalidId);
        }
        if !self.users.user_exists(user_id).await? {
            debug!("Rejecting vote from unknown user");
            return Ok(VoteOutcome::UnknownUser);
        }

        let applied = self
            .store
            .apply_vote(&Self::user_votes_key(user_id), song_id, LEADERBOARD_KEY)
            .await?;
        Ok(if applied {
            VoteOutcome::Applied
        } else {
            VoteOutcome::AlreadyVoted
        })
    }

    /// Retracts a vote. The song is unranked entirely when its last voter
    /// leaves; no zero-score entries persist on the board.
    #[instrument(skip(self))]
    pub async fn unvote(&self, user_id: &str, song_id: &str) -> Result<UnvoteOutcome, StoreError> {
        if validate_id(user_id).is_err() || validate_id(song_id).is_err() {
            warn!("Rejecting unvote with malformed id");
            return Ok(UnvoteOutcome::InvalidId);
        }

        let retracted = self
            .store
            .retract_vote(&Self::user_votes_key(user_id), song_id, LEADERBOARD_KEY)
            .await?;
        Ok(if retracted {
            UnvoteOutcome::Applied
        } else {
            UnvoteOutcome::NotVoted
        })
    }

    /// Up to `n` songs by descending score, joined with their metadata.
    /// `n <= 0` yields an empty list; `n` past the board size returns the
    /// whole board.
    #[instrument(skip(self))]
    pub async fn top_songs(&self, n: i64) -> Result<Vec<TopSong>, StoreError> {
        if n <= 0 {
            return Ok(Vec::new());
        }

        let entries = self
            .retry
            .run(|| self.store.top_range(LEADERBOARD_KEY, n as usize))
            .await?;

        let song_ids: Vec<String> = entries.iter().map(|entry| entry.song_id.clone()).collect();
        let metas = self
            .retry
            .run(|| self.catalog.get_fields(&song_ids))
            .await?;

        Ok(formatter::join_metadata(entries, metas))
    }

    /// 1-based rank by descending score, None when the song is unranked.
    #[instrument(skip(self))]
    pub async fn song_rank(&self, song_id: &str) -> Result<Option<u64>, StoreError> {
        let rank = self
            .retry
            .run(|| self.store.rank(LEADERBOARD_KEY, song_id))
            .await?;
        Ok(rank.map(|zero_based| zero_based + 1))
    }

    /// Current vote count, 0 when the song is unranked.
    #[instrument(skip(self))]
    pub async fn song_score(&self, song_id: &str) -> Result<i64, StoreError> {
        let score = self
            .retry
            .run(|| self.store.score(LEADERBOARD_KEY, song_id))
            .await?;
        Ok(score.unwrap_or(0))
    }

    /// Whether `user_id` currently has a vote on `song_id`.
    pub async fn has_voted(&self, user_id: &str, song_id: &str) -> Result<bool, StoreError> {
        let key = Self::user_votes_key(user_id);
        self.retry
            .run(|| self.store.is_member(&key, song_id))
            .await
    }

    /// Drops a song from the board after an external deletion event.
    /// Per-user ledger entries referencing it are left in place; they are
    /// cleaned up lazily by the next unvote for that song.
    #[instrument(skip(self))]
    pub async fn purge_song(&self, song_id: &str) -> Result<bool, StoreError> {
        self.store.remove_entry(LEADERBOARD_KEY, song_id).await
    }
}
