use std::{fmt, sync::Arc};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// State of one interactive login: the PKCE verifier created before the
/// browser redirect and the token once the callback exchanged the code.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Login session handed to the callback server as an explicit extension.
pub type SharedLoginSession = Arc<Mutex<Option<LoginSession>>>;

/// A genre label: trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Genre(String);

impl Genre {
    pub fn new(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Genre(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Genre {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Genre::new(&value).ok_or_else(|| "genre label is empty".to_string())
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        genre.0
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Artist object as returned by the catalog search and the top-items endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Artist reference embedded in track objects. Local files carry no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

/// Envelope shared by the paged user-library endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

/// Entry of the recently played and saved tracks lists.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub track: Track,
}

/// Playlist entry; `track` is null for removed or unavailable items.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEntry {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    pub items: Vec<Artist>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub offset: u32,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TracksPage,
}

/// One artist attributed to the genre it was searched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    pub artist_id: String,
    pub artist_name: String,
    pub genre: Genre,
    pub popularity: u32,
    pub followers: u64,
    pub tags: Vec<String>,
    pub spotify_url: String,
}

impl ArtistRecord {
    pub fn from_artist(artist: Artist, genre: &Genre) -> Self {
        Self {
            artist_id: artist.id,
            artist_name: artist.name,
            genre: genre.clone(),
            popularity: artist.popularity,
            followers: artist.followers.total,
            tags: artist.genres,
            spotify_url: artist.external_urls.spotify.unwrap_or_default(),
        }
    }
}

/// Row layout of the artists output file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtistCsvRow {
    pub artist_id: String,
    pub artist_name: String,
    pub genre: String,
    pub popularity: u32,
    pub followers: u64,
    pub genres: String,
    pub spotify_url: String,
}

impl From<&ArtistRecord> for ArtistCsvRow {
    fn from(record: &ArtistRecord) -> Self {
        Self {
            artist_id: record.artist_id.clone(),
            artist_name: record.artist_name.clone(),
            genre: record.genre.to_string(),
            popularity: record.popularity,
            followers: record.followers,
            genres: record.tags.join(","),
            spotify_url: record.spotify_url.clone(),
        }
    }
}

/// JSON document written by the scraper and read by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreCatalog {
    pub total_genres: usize,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn as_query(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

#[derive(Tabled)]
pub struct TopArtistTableRow {
    pub rank: usize,
    pub name: String,
    pub popularity: u32,
    pub genres: String,
}

#[derive(Tabled)]
pub struct ProfileSummaryRow {
    pub range: String,
    pub artists: usize,
    pub top_genres: String,
}

#[derive(Tabled)]
pub struct GenreSummaryRow {
    pub genre: String,
    pub artists: usize,
    pub status: String,
}
