use std::{path::Path, time::Duration};

use crate::{
    config, error,
    harvest::validate_genres,
    info,
    management::{GenreSource, JsonGenreSource, save_genre_catalog, save_validated_genres},
    scrape,
    spotify::catalog::{Credentials, SpotifyCatalogClient},
    success, warning,
};

use super::{progress_bar, spinner};

pub async fn scrape_genres(output: &Path) {
    let url = config::everynoise_url();

    let pb = spinner("Scraping genres from Every Noise at Once...");
    let genres = scrape::scrape_genres(&url).await;
    pb.finish_and_clear();

    let genres = match genres {
        Ok(g) => g,
        Err(e) => error!("Cannot scrape {}. Err: {}", url, e),
    };

    if genres.is_empty() {
        error!("No genres were found. Please check your internet connection.");
    }

    success!("Found {} unique genres!", genres.len());
    let preview = genres.iter().take(10).cloned().collect::<Vec<_>>().join(", ");

    let catalog = scrape::catalog(genres, &url);
    if let Err(e) = save_genre_catalog(output, &catalog).await {
        error!("Failed to save genres. Err: {}", e);
    }

    success!("Genres saved to {}", output.display());
    info!("Example genres (first 10): {}", preview);
}

pub async fn validate(input: &Path, output: &Path, throttle: Duration) {
    info!("Loading genres from {}...", input.display());
    let genres = match JsonGenreSource::new(input).load().await {
        Ok(g) => g,
        Err(e) => error!("{}\nRun genrecli genres scrape first.", e),
    };

    if genres.is_empty() {
        error!("No genres were loaded from {}", input.display());
    }
    info!("Validating {} genres...", genres.len());

    let client = match Credentials::from_env() {
        Ok(c) => SpotifyCatalogClient::new(c),
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let pb = progress_bar(genres.len(), "Validating genres...");
    let valid = validate_genres(&client, &genres, throttle, |progress| {
        pb.inc(1);
        match progress.valid {
            Some(true) => pb.set_message(format!("valid: {}", progress.genre)),
            Some(false) => pb.set_message(format!("invalid: {}", progress.genre)),
            None => {}
        }
    })
    .await;
    pb.finish_and_clear();

    if valid.is_empty() {
        warning!("No valid genres found or every validation request failed.");
        return;
    }

    if let Err(e) = save_validated_genres(output, &valid).await {
        error!("Failed to save validated genres. Err: {}", e);
    }

    success!(
        "Found {} valid Spotify genres, saved to {}",
        valid.len(),
        output.display()
    );

    let mut preview: Vec<&str> = valid.iter().map(|g| g.as_str()).collect();
    preview.sort_unstable();
    preview.truncate(10);
    info!("Example valid genres (first 10): {}", preview.join(", "));
}
