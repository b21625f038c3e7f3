use crate::models::{RankResponse, SongMeta, TopSong, VoteResponse};
use crate::validation::{validate_id, ValidationError, MAX_ID_LENGTH};

#[test]
fn test_accepts_uuid_style_ids() {
    assert!(validate_id("7d70364a-ad81-45cd-a50b-51ec0d467ca5").is_ok());
    assert!(validate_id("song_42").is_ok());
    assert!(validate_id("a").is_ok());
}

#[test]
fn test_rejects_empty_id() {
    assert!(matches!(validate_id(""), Err(ValidationError::EmptyId)));
}

#[test]
fn test_rejects_oversized_id() {
    let id = "a".repeat(MAX_ID_LENGTH + 1);
    assert!(matches!(validate_id(&id), Err(ValidationError::IdTooLong)));

    let id = "a".repeat(MAX_ID_LENGTH);
    assert!(validate_id(&id).is_ok());
}

#[test]
fn test_rejects_key_breaking_characters() {
    // Colons would collide with the store's key layout.
    assert!(matches!(
        validate_id("user:1:voted_songs"),
        Err(ValidationError::InvalidCharacter(':'))
    ));
    assert!(matches!(
        validate_id("song 1"),
        Err(ValidationError::InvalidCharacter(' '))
    ));
    assert!(validate_id("naïve").is_err());
}

#[test]
fn test_vote_response_wire_shape() {
    let response = VoteResponse {
        success: false,
        message: "Already voted for this song.".into(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "success": false,
            "message": "Already voted for this song."
        })
    );
}

#[test]
fn test_top_song_wire_shape() {
    let song = TopSong {
        song_id: "s1".into(),
        score: 3,
        title: "song1".into(),
        artist: "artist1".into(),
    };
    let json = serde_json::to_value(&song).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "song_id": "s1",
            "score": 3,
            "title": "song1",
            "artist": "artist1"
        })
    );
}

#[test]
fn test_rank_response_omits_absent_fields() {
    let ranked = RankResponse {
        success: true,
        rank: Some(1),
        message: None,
    };
    let json = serde_json::to_value(&ranked).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true, "rank": 1 }));

    let unranked = RankResponse {
        success: false,
        rank: None,
        message: Some("Song not ranked.".into()),
    };
    let json = serde_json::to_value(&unranked).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": "Song not ranked." })
    );
}

#[test]
fn test_song_meta_completeness() {
    assert!(SongMeta::new("song1", "artist1").is_complete());
    assert!(!SongMeta::default().is_complete());
    assert!(!SongMeta {
        title: Some("song1".into()),
        artist: None,
    }
    .is_complete());
}
