use chrono::Utc;
use genrecli::{
    management::TokenManager,
    types::{ArtistCsvRow, ArtistRecord, Genre, TimeRange, Token},
};

// Helper function to create a token obtained `age` seconds ago
fn token(age: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-top-read".to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64 - age,
    }
}

#[test]
fn test_fresh_token_is_not_expired() {
    let manager = TokenManager::new(token(0, 3600));
    assert!(!manager.is_expired());
    assert_eq!(manager.current_token().access_token, "access");
}

#[test]
fn test_old_token_is_expired() {
    let manager = TokenManager::new(token(7200, 3600));
    assert!(manager.is_expired());
}

#[test]
fn test_token_expiring_soon_counts_as_expired() {
    // Two minutes left, refreshed ahead of time
    let manager = TokenManager::new(token(3480, 3600));
    assert!(manager.is_expired());
}

#[test]
fn test_time_range_query_values() {
    assert_eq!(TimeRange::Short.as_query(), "short_term");
    assert_eq!(TimeRange::Medium.as_query(), "medium_term");
    assert_eq!(TimeRange::Long.as_query(), "long_term");
}

#[test]
fn test_artist_csv_row_joins_tags() {
    let record = ArtistRecord {
        artist_id: "id1".to_string(),
        artist_name: "Nujabes".to_string(),
        genre: Genre::new("jazz hop").unwrap(),
        popularity: 64,
        followers: 1_500_000,
        tags: vec!["jazz hop".to_string(), "japanese chillhop".to_string()],
        spotify_url: String::new(),
    };

    let row = ArtistCsvRow::from(&record);
    assert_eq!(row.genre, "jazz hop");
    assert_eq!(row.genres, "jazz hop,japanese chillhop");
    assert_eq!(row.followers, 1_500_000);
    assert_eq!(row.spotify_url, "");
}
