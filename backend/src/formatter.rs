use shared::models::{RankedEntry, SongMeta, TopSong};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Joins ranked board entries with their metadata, preserving order.
/// `metas` is positionally aligned with `entries`; absent fields resolve to
/// placeholders so one deleted song never breaks the rest of the response.
pub fn join_metadata(entries: Vec<RankedEntry>, metas: Vec<SongMeta>) -> Vec<TopSong> {
    let mut metas = metas.into_iter();
    entries
        .into_iter()
        .map(|entry| {
            let meta = metas.next().unwrap_or_default();
            TopSong {
                song_id: entry.song_id,
                score: entry.score,
                title: meta.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
                artist: meta.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            }
        })
        .collect()
}
