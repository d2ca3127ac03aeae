use std::{collections::HashSet, time::Duration};

use tokio::time::sleep;

use crate::{
    error::HarvestError,
    types::{ArtistRecord, Genre},
    utils, warning,
};

use super::ArtistSearch;

/// Hard maximum of results per search request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Pause between two page requests.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Outcome of collecting one genre.
///
/// `records` keeps the catalog's page order. When a page request failed,
/// `error` holds a [`HarvestError::SearchRequestFailed`] and `records` holds
/// whatever the earlier pages delivered.
#[derive(Debug)]
pub struct Collection {
    pub records: Vec<ArtistRecord>,
    pub error: Option<HarvestError>,
    pub requests: usize,
}

/// Pages through the artist search for a single genre.
pub struct Collector<'a, S: ArtistSearch + ?Sized> {
    search: &'a S,
    page_size: u32,
    throttle: Duration,
}

impl<'a, S: ArtistSearch + ?Sized> Collector<'a, S> {
    pub fn new(search: &'a S) -> Self {
        Self {
            search,
            page_size: MAX_PAGE_SIZE,
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Collects up to `limit` artists for `genre`.
    ///
    /// # Arguments
    ///
    /// * `genre` - Genre to search; the query is built with
    ///   [`utils::genre_query`] and every record is tagged with this genre
    /// * `limit` - Maximum number of records to collect; `0` sends no request
    ///
    /// # Paging
    ///
    /// Each request asks for `min(page_size, limit - collected)` artists at the
    /// running offset, which starts at 0 and advances by the size of each
    /// returned page. The configured throttle is awaited between two requests,
    /// never before the first one.
    ///
    /// Collection stops when:
    /// - the quota is met
    /// - a page comes back empty (the catalog is exhausted)
    /// - a page holds only artists already collected (duplicates are skipped
    ///   with a warning)
    /// - a request fails
    ///
    /// # Failures
    ///
    /// A failed request is not retried. It is logged with the genre and the
    /// offset, and stored in [`Collection::error`] as
    /// [`HarvestError::SearchRequestFailed`]. The records from earlier pages are
    /// kept, so the caller gets a partial result instead of nothing.
    pub async fn collect(&self, genre: &Genre, limit: usize) -> Collection {
        let query = utils::genre_query(genre);
        let mut records: Vec<ArtistRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut offset: u32 = 0;
        let mut requests = 0;
        let mut error = None;

        while records.len() < limit {
            if requests > 0 && !self.throttle.is_zero() {
                sleep(self.throttle).await;
            }

            let remaining = limit - records.len();
            let want = remaining.min(self.page_size as usize) as u32;
            requests += 1;

            let page = match self.search.search_artists(&query, want, offset).await {
                Ok(page) => page,
                Err(e) => {
                    let failure = HarvestError::SearchRequestFailed {
                        genre: genre.to_string(),
                        offset,
                        reason: e.to_string(),
                    };
                    warning!("{}", failure);
                    error = Some(failure);
                    break;
                }
            };

            if page.is_empty() {
                break;
            }

            let returned = page.len() as u32;
            let before = records.len();
            for artist in page {
                if records.len() >= limit {
                    break;
                }
                if !seen.insert(artist.id.clone()) {
                    warning!(
                        "Artist {} repeated for genre '{}' at offset {}, skipping",
                        artist.id,
                        genre,
                        offset
                    );
                    continue;
                }
                records.push(ArtistRecord::from_artist(artist, genre));
            }

            if records.len() == before {
                warning!(
                    "Page at offset {} for genre '{}' held no new artists, stopping",
                    offset,
                    genre
                );
                break;
            }

            offset += returned;
        }

        Collection {
            records,
            error,
            requests,
        }
    }
}
