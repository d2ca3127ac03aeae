use genrecli::harvest::rank;
use genrecli::types::{ArtistRecord, Genre};

// Helper function to create a test record
fn record(id: &str, popularity: u32) -> ArtistRecord {
    ArtistRecord {
        artist_id: id.to_string(),
        artist_name: format!("Artist {}", id),
        genre: Genre::new("lofi").unwrap(),
        popularity,
        followers: 0,
        tags: Vec::new(),
        spotify_url: String::new(),
    }
}

fn ids(records: &[ArtistRecord]) -> Vec<&str> {
    records.iter().map(|r| r.artist_id.as_str()).collect()
}

fn popularities(records: &[ArtistRecord]) -> Vec<u32> {
    records.iter().map(|r| r.popularity).collect()
}

#[test]
fn test_rank_orders_by_popularity_descending() {
    let ranked = rank(vec![record("a", 10), record("b", 50), record("c", 30)], 2);

    assert_eq!(ids(&ranked), vec!["b", "c"]);
    assert_eq!(popularities(&ranked), vec![50, 30]);
}

#[test]
fn test_rank_keeps_everything_below_limit() {
    let ranked = rank(vec![record("a", 1), record("b", 2)], 10);
    assert_eq!(ids(&ranked), vec!["b", "a"]);
}

#[test]
fn test_rank_zero_limit_and_empty_input() {
    assert!(rank(vec![record("a", 1)], 0).is_empty());
    assert!(rank(Vec::new(), 5).is_empty());
}

#[test]
fn test_rank_ties_keep_input_order() {
    let input = vec![
        record("first", 40),
        record("top", 90),
        record("second", 40),
        record("third", 40),
        record("low", 5),
    ];

    let ranked = rank(input, 4);
    assert_eq!(ids(&ranked), vec!["top", "first", "second", "third"]);
}

#[test]
fn test_rank_is_idempotent() {
    let input = vec![
        record("a", 3),
        record("b", 70),
        record("c", 70),
        record("d", 12),
        record("e", 99),
    ];

    let once = rank(input, 4);
    let twice = rank(once.clone(), 4);
    assert_eq!(once, twice);
}

#[test]
fn test_rank_popularity_independent_of_input_order() {
    let forward = vec![
        record("a", 15),
        record("b", 80),
        record("c", 42),
        record("d", 80),
        record("e", 7),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    // Ids of tied artists may differ, the popularity sequence may not
    assert_eq!(
        popularities(&rank(forward, 3)),
        popularities(&rank(backward, 3))
    );
}
