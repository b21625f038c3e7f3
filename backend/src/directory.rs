//! Consumed collaborator interfaces: the user existence predicate and the
//! batched song metadata lookup. User and song records themselves are
//! owned elsewhere; the engine only reads them.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shared::models::SongMeta;

use crate::error::StoreError;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, user_id: &str) -> Result<bool, StoreError>;
}

/// Metadata lookup for a batch of song ids, one round trip regardless of
/// batch size. Each id resolves independently; a missing or partial record
/// yields `None` fields rather than failing the batch.
#[async_trait]
pub trait SongCatalog: Send + Sync {
    async fn get_fields(&self, song_ids: &[String]) -> Result<Vec<SongMeta>, StoreError>;
}

pub struct RedisUserDirectory {
    connection: ConnectionManager,
}

impl RedisUserDirectory {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn user_key(user_id: &str) -> String {
        format!("user:{user_id}")
    }
}

#[async_trait]
impl UserDirectory for RedisUserDirectory {
    async fn user_exists(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        Ok(conn.exists(Self::user_key(user_id)).await?)
    }
}

pub struct RedisSongCatalog {
    connection: ConnectionManager,
}

impl RedisSongCatalog {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn metadata_key(song_id: &str) -> String {
        format!("song:{song_id}:metadata")
    }
}

#[async_trait]
impl SongCatalog for RedisSongCatalog {
    async fn get_fields(&self, song_ids: &[String]) -> Result<Vec<SongMeta>, StoreError> {
        if song_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for song_id in song_ids {
            let key = Self::metadata_key(song_id);
            pipe.hget(&key, "title");
            pipe.hget(&key, "artist");
        }

        let mut conn = self.connection.clone();
        let fields: Vec<Option<String>> = pipe.query_async(&mut conn).await?;

        Ok(fields
            .chunks(2)
            .map(|pair| SongMeta {
                title: pair.first().cloned().flatten(),
                artist: pair.get(1).cloned().flatten(),
            })
            .collect())
    }
}

#[cfg(test)]
pub use memory::{MemorySongCatalog, MemoryUserDirectory};

#[cfg(test)]
mod memory {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use shared::models::SongMeta;

    use super::{SongCatalog, UserDirectory};
    use crate::error::StoreError;

    #[derive(Default)]
    pub struct MemoryUserDirectory {
        users: Mutex<HashSet<String>>,
    }

    impl MemoryUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn register(&self, user_id: &str) {
            self.users.lock().unwrap().insert(user_id.to_string());
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryUserDirectory {
        async fn user_exists(&self, user_id: &str) -> Result<bool, StoreError> {
            Ok(self.users.lock().unwrap().contains(user_id))
        }
    }

    #[derive(Default)]
    pub struct MemorySongCatalog {
        songs: Mutex<HashMap<String, SongMeta>>,
    }

    impl MemorySongCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, song_id: &str, meta: SongMeta) {
            self.songs.lock().unwrap().insert(song_id.to_string(), meta);
        }

        pub fn remove(&self, song_id: &str) {
            self.songs.lock().unwrap().remove(song_id);
        }
    }

    #[async_trait]
    impl SongCatalog for MemorySongCatalog {
        async fn get_fields(&self, song_ids: &[String]) -> Result<Vec<SongMeta>, StoreError> {
            let songs = self.songs.lock().unwrap();
            Ok(song_ids
                .iter()
                .map(|id| songs.get(id).cloned().unwrap_or_default())
                .collect())
        }
    }
}
