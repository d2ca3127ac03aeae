use async_trait::async_trait;

use crate::{
    error::HarvestError,
    types::{Artist, ArtistRecord, Genre},
};

/// Catalog search for artists.
///
/// `query` is a genre-filtered query string, `limit` the page size (at most
/// [`super::MAX_PAGE_SIZE`]) and `offset` the number of results to skip. An
/// empty page means the catalog is exhausted.
#[async_trait]
pub trait ArtistSearch: Send + Sync {
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Artist>, HarvestError>;
}

/// Answers whether the catalog knows any track for a genre.
#[async_trait]
pub trait GenreCheck: Send + Sync {
    async fn has_tracks(&self, genre: &Genre) -> Result<bool, HarvestError>;
}

/// Destination for ranked artists, written once per finished genre.
///
/// Called with an empty slice for genres that legitimately had no artists so
/// checkpointing sinks can mark them done.
#[async_trait]
pub trait RecordSink: Send {
    async fn write_genre(
        &mut self,
        genre: &Genre,
        records: &[ArtistRecord],
    ) -> Result<(), HarvestError>;
}

#[async_trait]
impl RecordSink for Vec<ArtistRecord> {
    async fn write_genre(
        &mut self,
        _genre: &Genre,
        records: &[ArtistRecord],
    ) -> Result<(), HarvestError> {
        self.extend_from_slice(records);
        Ok(())
    }
}
