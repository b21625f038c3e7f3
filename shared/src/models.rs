use serde::{Serialize, Deserialize};

/// One row of the raw ranked board, before the metadata join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    pub song_id: String,
    pub score: i64,
}

/// Denormalized song fields. Either field may be missing when the song
/// record was deleted externally or only partially written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SongMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopSong {
    pub song_id: String,
    pub score: i64,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopSongsResponse {
    pub success: bool,
    pub data: Vec<TopSong>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SongMeta {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            artist: Some(artist.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.artist.is_some()
    }
}
