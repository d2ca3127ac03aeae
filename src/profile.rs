//! Listening profile of the logged-in user.
//!
//! For each time range (short, medium, long term) the profile lists the
//! user's top artists. Each artist carries statistics computed from the
//! user's playlists, recent plays and saved tracks, plus how many of that
//! range's top tracks feature the artist. Each range also carries the genre
//! frequencies of its artists, most common first.
//!
//! ```json
//! {
//!   "short_term": {
//!     "artists": [
//!       { "id": "..", "name": "..", "popularity": 71, "followers": 120034,
//!         "genres": ["lo-fi"], "spotify_url": "..", "images": [],
//!         "statistics": { "playlist_appearances": 3, "recent_plays": 5,
//!                         "saved_tracks": 1, "total_listening_time": 912000,
//!                         "appears_in_top_tracks": 2 } }
//!     ],
//!     "metadata": { "total_artists": 1, "collection_date": "2025-01-01T00:00:00Z",
//!                   "most_common_genres": { "lo-fi": 1 } }
//!   },
//!   "medium_term": { .. },
//!   "long_term": { .. }
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::{
    error::HarvestError,
    spotify::user::SpotifyUserClient,
    types::{Artist, Image, TimeRange, Track},
    warning,
};

/// Items requested from every list endpoint.
const PAGE_LIMIT: u32 = 50;

/// Tracks read from each playlist.
const PLAYLIST_TRACK_LIMIT: u32 = 100;

pub const TIME_RANGES: [TimeRange; 3] = [TimeRange::Short, TimeRange::Medium, TimeRange::Long];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistStatistics {
    /// Playlist tracks featuring the artist.
    pub playlist_appearances: u32,
    pub recent_plays: u32,
    pub saved_tracks: u32,
    /// Milliseconds of the artist's recent plays.
    pub total_listening_time: u64,
    /// Top tracks of the same range featuring the artist.
    pub appears_in_top_tracks: u32,
}

/// The user's library data the statistics are computed from.
#[derive(Debug, Clone, Default)]
pub struct ListeningActivity {
    pub playlist_tracks: Vec<Track>,
    pub recently_played: Vec<Track>,
    pub saved_tracks: Vec<Track>,
}

impl ListeningActivity {
    /// Statistics per artist id. `appears_in_top_tracks` is left at zero; it
    /// depends on the time range.
    pub fn artist_statistics(&self) -> HashMap<String, ArtistStatistics> {
        let mut stats: HashMap<String, ArtistStatistics> = HashMap::new();

        for id in self.playlist_tracks.iter().flat_map(artist_ids) {
            stats.entry(id.to_string()).or_default().playlist_appearances += 1;
        }

        for track in &self.recently_played {
            for id in artist_ids(track) {
                let entry = stats.entry(id.to_string()).or_default();
                entry.recent_plays += 1;
                entry.total_listening_time += track.duration_ms;
            }
        }

        for id in self.saved_tracks.iter().flat_map(artist_ids) {
            stats.entry(id.to_string()).or_default().saved_tracks += 1;
        }

        stats
    }
}

fn artist_ids(track: &Track) -> impl Iterator<Item = &str> {
    track.artists.iter().filter_map(|a| a.id.as_deref())
}

/// Top artists and tracks of one time range.
#[derive(Debug, Clone)]
pub struct RangeTop {
    pub range: TimeRange,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileArtist {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub followers: u64,
    pub genres: Vec<String>,
    pub spotify_url: Option<String>,
    pub images: Vec<Image>,
    pub statistics: ArtistStatistics,
}

/// Genre frequencies, most common first. Serialized as a JSON object whose
/// keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCounts(pub Vec<(String, usize)>);

impl Serialize for GenreCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(genre, count)| (genre, count)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeMetadata {
    pub total_artists: usize,
    pub collection_date: String,
    pub most_common_genres: GenreCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeProfile {
    pub artists: Vec<ProfileArtist>,
    pub metadata: RangeMetadata,
}

/// Profile per time range, in the order the ranges were collected.
#[derive(Debug, Clone, Default)]
pub struct ListeningProfile {
    pub ranges: Vec<(TimeRange, RangeProfile)>,
}

impl ListeningProfile {
    pub fn range(&self, range: TimeRange) -> Option<&RangeProfile> {
        self.ranges.iter().find(|(r, _)| *r == range).map(|(_, p)| p)
    }
}

impl Serialize for ListeningProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.ranges
                .iter()
                .map(|(range, profile)| (range.as_query(), profile)),
        )
    }
}

/// Counts how many artists carry each genre. Ties keep the order in which
/// the genres first appear.
pub fn most_common_genres(artists: &[Artist]) -> GenreCounts {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        match counts.iter_mut().find(|(g, _)| g == genre) {
            Some((_, n)) => *n += 1,
            None => counts.push((genre.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    GenreCounts(counts)
}

/// Combines library activity and per-range top items into the profile.
pub fn build_profile(
    activity: &ListeningActivity,
    tops: Vec<RangeTop>,
    collected_at: DateTime<Utc>,
) -> ListeningProfile {
    let stats = activity.artist_statistics();
    let collection_date = collected_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let ranges = tops
        .into_iter()
        .map(|top| {
            let most_common_genres = most_common_genres(&top.artists);
            let artists: Vec<ProfileArtist> = top
                .artists
                .into_iter()
                .map(|artist| {
                    let mut statistics = stats.get(&artist.id).cloned().unwrap_or_default();
                    statistics.appears_in_top_tracks = top
                        .tracks
                        .iter()
                        .filter(|t| artist_ids(t).any(|id| id == artist.id))
                        .count() as u32;

                    ProfileArtist {
                        id: artist.id,
                        name: artist.name,
                        popularity: artist.popularity,
                        followers: artist.followers.total,
                        genres: artist.genres,
                        spotify_url: artist.external_urls.spotify,
                        images: artist.images,
                        statistics,
                    }
                })
                .collect();

            let profile = RangeProfile {
                metadata: RangeMetadata {
                    total_artists: artists.len(),
                    collection_date: collection_date.clone(),
                    most_common_genres,
                },
                artists,
            };
            (top.range, profile)
        })
        .collect();

    ListeningProfile { ranges }
}

/// Reads the user's playlists, recent plays and saved tracks.
///
/// A playlist whose tracks cannot be read (deleted, not accessible) is
/// skipped with a warning; any other failure is returned.
pub async fn fetch_activity(client: &SpotifyUserClient) -> Result<ListeningActivity, HarvestError> {
    let (playlists, recently_played, saved_tracks) = tokio::try_join!(
        client.playlists(PAGE_LIMIT),
        client.recently_played(PAGE_LIMIT),
        client.saved_tracks(PAGE_LIMIT),
    )?;

    let mut playlist_tracks = Vec::new();
    for playlist in &playlists {
        if playlist.tracks.as_ref().is_some_and(|t| t.total == 0) {
            continue;
        }
        match client
            .playlist_tracks(&playlist.id, PLAYLIST_TRACK_LIMIT)
            .await
        {
            Ok(tracks) => playlist_tracks.extend(tracks),
            Err(e) => warning!("Skipping playlist '{}': {}", playlist.name, e),
        }
    }

    Ok(ListeningActivity {
        playlist_tracks,
        recently_played,
        saved_tracks,
    })
}

/// Reads top artists and top tracks for every time range.
pub async fn fetch_top_items(client: &SpotifyUserClient) -> Result<Vec<RangeTop>, HarvestError> {
    let mut tops = Vec::with_capacity(TIME_RANGES.len());
    for range in TIME_RANGES {
        let (artists, tracks) = tokio::try_join!(
            client.top_artists(PAGE_LIMIT, range),
            client.top_tracks(PAGE_LIMIT, range),
        )?;
        tops.push(RangeTop {
            range,
            artists,
            tracks,
        });
    }
    Ok(tops)
}

/// Collects everything and builds the profile, timestamped now.
pub async fn collect_profile(client: &SpotifyUserClient) -> Result<ListeningProfile, HarvestError> {
    let activity = fetch_activity(client).await?;
    let tops = fetch_top_items(client).await?;
    Ok(build_profile(&activity, tops, Utc::now()))
}
