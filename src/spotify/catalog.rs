use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    config,
    error::HarvestError,
    harvest::{ArtistSearch, GenreCheck, MAX_PAGE_SIZE},
    types::{Artist, Genre, SearchArtistsResponse, SearchTracksResponse},
    utils,
};

use super::ensure_success;

/// App tokens are dropped this long before Spotify would expire them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, HarvestError> {
        Ok(Self {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
        })
    }
}

/// App-level access token with the instant it stops being used.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    access_token: String,
    expires_at: Instant,
}

impl CatalogSession {
    pub fn new(access_token: String, expires_in: Duration) -> Self {
        Self {
            access_token,
            expires_at: Instant::now() + expires_in.saturating_sub(EXPIRY_MARGIN),
        }
    }

    pub fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Deserialize)]
struct ClientTokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Catalog client authenticated with the client-credentials grant.
///
/// Built once per process and shared by reference; the session inside is the
/// only mutable state and is refreshed lazily when it expires.
pub struct SpotifyCatalogClient {
    client: Client,
    api_url: String,
    token_url: String,
    credentials: Credentials,
    session: Mutex<Option<CatalogSession>>,
}

impl SpotifyCatalogClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoints(
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
            credentials,
        )
    }

    pub fn with_endpoints(
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            credentials,
            session: Mutex::new(None),
        }
    }

    /// Returns a valid app token, requesting a new one when the cached
    /// session is missing or expired.
    pub async fn access_token(&self) -> Result<String, HarvestError> {
        let mut session = self.session.lock().await;
        if let Some(current) = session.as_ref() {
            if current.is_valid() {
                return Ok(current.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.access_token.clone();
        *session = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self) -> Result<CatalogSession, HarvestError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let response = ensure_success(response)
            .await
            .map_err(|e| HarvestError::Auth(e.to_string()))?;
        let body: ClientTokenResponse = response.json().await?;

        Ok(CatalogSession::new(
            body.access_token,
            Duration::from_secs(body.expires_in),
        ))
    }

    async fn search<T: DeserializeOwned>(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
        offset: u32,
    ) -> Result<T, HarvestError> {
        let token = self.access_token().await?;
        let limit = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        let offset = offset.to_string();

        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", kind),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ArtistSearch for SpotifyCatalogClient {
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Artist>, HarvestError> {
        let res: SearchArtistsResponse = self.search(query, "artist", limit, offset).await?;
        Ok(res.artists.items)
    }
}

#[async_trait]
impl GenreCheck for SpotifyCatalogClient {
    async fn has_tracks(&self, genre: &Genre) -> Result<bool, HarvestError> {
        let query = utils::genre_query(genre);
        let res: SearchTracksResponse = self.search(&query, "track", 1, 0).await?;
        Ok(!res.tracks.items.is_empty())
    }
}
