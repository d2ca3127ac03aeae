mod common;

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use common::{api_error, genre};
use genrecli::{
    error::HarvestError,
    harvest::{GenreCheck, validate_genres},
    types::Genre,
};

/// Check answering from a fixed table; genres missing from it fail.
struct StubCheck {
    answers: HashMap<String, bool>,
}

impl StubCheck {
    fn new(answers: &[(&str, bool)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(g, found)| (g.to_string(), *found))
                .collect(),
        }
    }
}

#[async_trait]
impl GenreCheck for StubCheck {
    async fn has_tracks(&self, genre: &Genre) -> Result<bool, HarvestError> {
        self.answers
            .get(genre.as_str())
            .copied()
            .ok_or_else(api_error)
    }
}

#[tokio::test]
async fn test_validate_keeps_genres_with_tracks() {
    let checker = StubCheck::new(&[("jazz", true), ("made up", false), ("ambient", true)]);
    let genres = vec![genre("jazz"), genre("made up"), genre("ambient")];

    let valid = validate_genres(&checker, &genres, Duration::ZERO, |_| {}).await;
    assert_eq!(valid, vec![genre("jazz"), genre("ambient")]);
}

#[tokio::test]
async fn test_validate_skips_failing_check() {
    let checker = StubCheck::new(&[("jazz", true), ("ambient", true)]);
    let genres = vec![genre("jazz"), genre("broken"), genre("ambient")];
    let mut outcomes = Vec::new();

    let valid = validate_genres(&checker, &genres, Duration::ZERO, |p| {
        outcomes.push((p.index, p.total, p.genre.to_string(), p.valid));
    })
    .await;

    assert_eq!(valid, vec![genre("jazz"), genre("ambient")]);
    assert_eq!(
        outcomes,
        vec![
            (1, 3, "jazz".to_string(), Some(true)),
            (2, 3, "broken".to_string(), None),
            (3, 3, "ambient".to_string(), Some(true)),
        ]
    );
}

#[tokio::test]
async fn test_validate_empty_list() {
    let checker = StubCheck::new(&[]);
    let valid = validate_genres(&checker, &[], Duration::ZERO, |_| {}).await;
    assert!(valid.is_empty());
}
