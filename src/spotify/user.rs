use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::HarvestError,
    types::{
        Artist, Paging, PlaylistEntry, PlaylistSummary, TimeRange, Track, TrackEntry,
    },
};

use super::ensure_success;

/// Spotify Web API client acting for the logged-in user.
///
/// Wraps a user access token obtained through [`super::auth::auth`] and kept
/// fresh by [`crate::management::TokenManager`]. Every call is a single
/// request; list endpoints return their first page only, with `limit` clamped
/// to what the endpoint accepts.
///
/// # Scopes
///
/// - `user-top-read` for [`top_artists`](Self::top_artists) and
///   [`top_tracks`](Self::top_tracks)
/// - `user-read-recently-played` for [`recently_played`](Self::recently_played)
/// - `user-library-read` for [`saved_tracks`](Self::saved_tracks)
/// - `playlist-read-private` for [`playlists`](Self::playlists)
///
/// # Errors
///
/// Network failures are returned as `HarvestError::Http`, rejected requests
/// (expired token, missing scope) as `HarvestError::Api`.
pub struct SpotifyUserClient {
    client: Client,
    api_url: String,
    token: String,
}

impl SpotifyUserClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(config::spotify_apiurl(), token)
    }

    pub fn with_api_url(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HarvestError> {
        let response = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// The user's most listened artists over `time_range` (limit 1-50).
    pub async fn top_artists(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Vec<Artist>, HarvestError> {
        let limit = limit.clamp(1, 50).to_string();
        let page: Paging<Artist> = self
            .get(
                "/me/top/artists",
                &[("limit", limit.as_str()), ("time_range", time_range.as_query())],
            )
            .await?;
        Ok(page.items)
    }

    /// The user's most listened tracks over `time_range` (limit 1-50).
    pub async fn top_tracks(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Vec<Track>, HarvestError> {
        let limit = limit.clamp(1, 50).to_string();
        let page: Paging<Track> = self
            .get(
                "/me/top/tracks",
                &[("limit", limit.as_str()), ("time_range", time_range.as_query())],
            )
            .await?;
        Ok(page.items)
    }

    /// Latest plays, newest first (limit 1-50).
    pub async fn recently_played(&self, limit: u32) -> Result<Vec<Track>, HarvestError> {
        let limit = limit.clamp(1, 50).to_string();
        let page: Paging<TrackEntry> = self
            .get("/me/player/recently-played", &[("limit", limit.as_str())])
            .await?;
        Ok(page.items.into_iter().map(|e| e.track).collect())
    }

    /// Tracks in the user's library, most recently saved first (limit 1-50).
    pub async fn saved_tracks(&self, limit: u32) -> Result<Vec<Track>, HarvestError> {
        let limit = limit.clamp(1, 50).to_string();
        let page: Paging<TrackEntry> = self
            .get("/me/tracks", &[("limit", limit.as_str())])
            .await?;
        Ok(page.items.into_iter().map(|e| e.track).collect())
    }

    /// Playlists owned or followed by the user (limit 1-50).
    pub async fn playlists(&self, limit: u32) -> Result<Vec<PlaylistSummary>, HarvestError> {
        let limit = limit.clamp(1, 50).to_string();
        let page: Paging<PlaylistSummary> = self
            .get("/me/playlists", &[("limit", limit.as_str())])
            .await?;
        Ok(page.items)
    }

    /// First tracks of a playlist (limit 1-100). Removed or unavailable
    /// entries are dropped.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
    ) -> Result<Vec<Track>, HarvestError> {
        let limit = limit.clamp(1, 100).to_string();
        let page: Paging<PlaylistEntry> = self
            .get(
                &format!("/playlists/{}/tracks", playlist_id),
                &[("limit", limit.as_str())],
            )
            .await?;
        Ok(page.items.into_iter().filter_map(|e| e.track).collect())
    }
}
