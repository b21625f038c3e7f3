use std::time::Duration;

use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client, Script,
};

use shared::models::RankedEntry;

use crate::error::StoreError;

/// Records a vote: no-op if the song is already in the voter's ledger,
/// otherwise ledger add and score increment as one indivisible unit. Runs
/// server-side so two racing votes from the same user can never both apply.
const APPLY_VOTE_SCRIPT: &str = r#"
if redis.call('SISMEMBER', KEYS[1], ARGV[1]) == 1 then
    return 0
end
redis.call('SADD', KEYS[1], ARGV[1])
redis.call('ZINCRBY', KEYS[2], 1, ARGV[1])
return 1
"#;

/// Retracts a vote. Decrement-to-zero unranks the song entirely; the board
/// never carries zero-score entries. Tolerates a board entry that is already
/// gone (purged song), so stale ledger membership self-heals here.
const RETRACT_VOTE_SCRIPT: &str = r#"
if redis.call('SISMEMBER', KEYS[1], ARGV[1]) == 0 then
    return 0
end
redis.call('SREM', KEYS[1], ARGV[1])
local score = redis.call('ZSCORE', KEYS[2], ARGV[1])
if not score or tonumber(score) <= 1 then
    redis.call('ZREM', KEYS[2], ARGV[1])
else
    redis.call('ZINCRBY', KEYS[2], -1, ARGV[1])
end
return 1
"#;

/// Contract over the ordered key-value store backing the leaderboard:
/// atomic vote/unvote mutation, set membership, and descending range, rank
/// and score reads.
///
/// Ordering: `top_range` sorts by score descending; ties follow the store's
/// ZREVRANGE order (lexicographically descending member), which is stable
/// from call to call.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Atomically add `song_id` to the ledger set and increment its board
    /// score by 1. Returns false (and changes nothing) if already present.
    async fn apply_vote(
        &self,
        ledger_key: &str,
        song_id: &str,
        board_key: &str,
    ) -> Result<bool, StoreError>;

    /// Atomically remove `song_id` from the ledger set and decrement its
    /// board score, dropping the board entry when the score would reach
    /// zero. Returns false (and changes nothing) if not present.
    async fn retract_vote(
        &self,
        ledger_key: &str,
        song_id: &str,
        board_key: &str,
    ) -> Result<bool, StoreError>;

    async fn is_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError>;

    /// Up to `limit` entries, highest score first.
    async fn top_range(&self, board_key: &str, limit: usize)
        -> Result<Vec<RankedEntry>, StoreError>;

    /// Zero-based descending rank, None when the member carries no score.
    async fn rank(&self, board_key: &str, member: &str) -> Result<Option<u64>, StoreError>;

    async fn score(&self, board_key: &str, member: &str) -> Result<Option<i64>, StoreError>;

    /// Removes a board entry outright. Returns whether it existed.
    async fn remove_entry(&self, board_key: &str, member: &str) -> Result<bool, StoreError>;
}

/// Builds the shared connection manager once at process start. Adapters
/// clone the handle; all clones multiplex over the same managed connection.
pub async fn connect(redis_url: &str) -> Result<ConnectionManager, StoreError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(500));

    let client = Client::open(redis_url).map_err(StoreError::from)?;
    client
        .get_connection_manager_with_config(config)
        .await
        .map_err(StoreError::from)
}

pub struct RedisScoreStore {
    connection: ConnectionManager,
    apply_script: Script,
    retract_script: Script,
}

impl RedisScoreStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            apply_script: Script::new(APPLY_VOTE_SCRIPT),
            retract_script: Script::new(RETRACT_VOTE_SCRIPT),
        }
    }
}

#[async_trait]
impl ScoreStore for RedisScoreStore {
    async fn apply_vote(
        &self,
        ledger_key: &str,
        song_id: &str,
        board_key: &str,
    ) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let applied: i64 = self
            .apply_script
            .key(ledger_key)
            .key(board_key)
            .arg(song_id)
            .invoke_async(&mut conn)
            .await?;
        Ok(applied == 1)
    }

    async fn retract_vote(
        &self,
        ledger_key: &str,
        song_id: &str,
        board_key: &str,
    ) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let retracted: i64 = self
            .retract_script
            .key(ledger_key)
            .key(board_key)
            .arg(song_id)
            .invoke_async(&mut conn)
            .await?;
        Ok(retracted == 1)
    }

    async fn is_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        Ok(conn.sismember(set_key, member).await?)
    }

    async fn top_range(
        &self,
        board_key: &str,
        limit: usize,
    ) -> Result<Vec<RankedEntry>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.connection.clone();
        let stop = limit as isize - 1;
        let entries: Vec<(String, i64)> = conn.zrevrange_withscores(board_key, 0, stop).await?;
        Ok(entries
            .into_iter()
            .map(|(song_id, score)| RankedEntry { song_id, score })
            .collect())
    }

    async fn rank(&self, board_key: &str, member: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.connection.clone();
        Ok(conn.zrevrank(board_key, member).await?)
    }

    async fn score(&self, board_key: &str, member: &str) -> Result<Option<i64>, StoreError> {
        let mut conn = self.connection.clone();
        Ok(conn.zscore(board_key, member).await?)
    }

    async fn remove_entry(&self, board_key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.zrem(board_key, member).await?;
        Ok(removed == 1)
    }
}

#[cfg(test)]
pub use memory::MemoryScoreStore;
