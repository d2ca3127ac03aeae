use std::time::Duration;

use tokio::time::sleep;

use crate::{types::Genre, warning};

use super::GenreCheck;

#[derive(Debug)]
pub struct ValidationProgress<'a> {
    pub index: usize,
    pub total: usize,
    pub genre: &'a Genre,
    /// `None` when the check failed for this genre.
    pub valid: Option<bool>,
}

/// Keeps the genres for which the catalog returns at least one track.
///
/// Genres are checked in order with `throttle` between checks. A failing
/// check is reported and the genre dropped; it never stops the pass.
pub async fn validate_genres<P, F>(
    checker: &P,
    genres: &[Genre],
    throttle: Duration,
    mut observer: F,
) -> Vec<Genre>
where
    P: GenreCheck + ?Sized,
    F: FnMut(&ValidationProgress<'_>),
{
    let total = genres.len();
    let mut valid = Vec::new();

    for (i, genre) in genres.iter().enumerate() {
        if i > 0 && !throttle.is_zero() {
            sleep(throttle).await;
        }

        let outcome = match checker.has_tracks(genre).await {
            Ok(found) => Some(found),
            Err(e) => {
                warning!("Error validating genre '{}': {}", genre, e);
                None
            }
        };

        if outcome == Some(true) {
            valid.push(genre.clone());
        }

        observer(&ValidationProgress {
            index: i + 1,
            total,
            genre,
            valid: outcome,
        });
    }

    valid
}
