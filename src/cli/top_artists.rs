use tabled::Table;

use crate::{
    error,
    spotify::user::SpotifyUserClient,
    success,
    types::{TimeRange, TopArtistTableRow},
    utils, warning,
};

use super::{spinner, user_token};

pub async fn top_artists(limit: u32, time_range: TimeRange) {
    let client = SpotifyUserClient::new(user_token().await);

    let pb = spinner("Fetching your top artists...");
    let artists = client.top_artists(limit, time_range).await;
    pb.finish_and_clear();

    let artists = match artists {
        Ok(a) => a,
        Err(e) => error!("Failed to fetch top artists: {}", e),
    };

    if artists.is_empty() {
        warning!("Spotify has no top artists for you in this time range yet.");
        return;
    }

    let rows: Vec<TopArtistTableRow> = artists
        .into_iter()
        .enumerate()
        .map(|(i, a)| TopArtistTableRow {
            rank: i + 1,
            name: a.name,
            popularity: a.popularity,
            genres: utils::preview_tags(&a.genres, 3),
        })
        .collect();

    success!("Your top {} artists:", rows.len());
    println!("{}", Table::new(rows));
}
