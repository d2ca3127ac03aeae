use std::path::Path;

use tabled::Table;

use crate::{
    error, info,
    management::save_profile,
    profile,
    spotify::user::SpotifyUserClient,
    success,
    types::ProfileSummaryRow,
};

use super::{spinner, user_token};

pub async fn profile(output: &Path) {
    let client = SpotifyUserClient::new(user_token().await);

    let pb = spinner("Collecting your listening data...");
    let result = profile::collect_profile(&client).await;
    pb.finish_and_clear();

    let profile = match result {
        Ok(p) => p,
        Err(e) => error!("Failed to collect listening data: {}", e),
    };

    if let Err(e) = save_profile(output, &profile).await {
        error!("Failed to save listening profile. Err: {}", e);
    }

    let rows: Vec<ProfileSummaryRow> = profile
        .ranges
        .iter()
        .map(|(range, p)| ProfileSummaryRow {
            range: range.as_query().to_string(),
            artists: p.metadata.total_artists,
            top_genres: p
                .metadata
                .most_common_genres
                .0
                .iter()
                .take(3)
                .map(|(genre, _)| genre.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    info!("Top artists per time range:");
    println!("{}", Table::new(rows));
    success!("Listening profile saved to {}", output.display());
}
