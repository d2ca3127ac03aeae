//! Genre list scraping from Every Noise at Once.
//!
//! The one-dimensional page lists every genre as a link whose `title`
//! attribute reads "Re-sort the list starting from here."; the link text is
//! the genre label.

use std::collections::BTreeSet;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::{error::HarvestError, types::GenreCatalog};

/// Marker inside the `title` attribute of genre links.
const GENRE_LINK_TITLE: &str = "Re-sort";

/// Downloads the page at `url` and extracts its genres.
pub async fn scrape_genres(url: &str) -> Result<Vec<String>, HarvestError> {
    let response = Client::new().get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    parse_genres(&html)
}

/// Extracts genre labels from the page: trimmed, non-empty, unique, sorted.
pub fn parse_genres(html: &str) -> Result<Vec<String>, HarvestError> {
    let document = Html::parse_document(html);
    let links = Selector::parse("a[title]").map_err(|e| HarvestError::Scrape(format!("{:?}", e)))?;

    let genres: BTreeSet<String> = document
        .select(&links)
        .filter(|link| {
            link.value()
                .attr("title")
                .is_some_and(|title| title.contains(GENRE_LINK_TITLE))
        })
        .map(|link| link.text().collect::<String>().trim().to_string())
        .filter(|genre| !genre.is_empty())
        .collect();

    Ok(genres.into_iter().collect())
}

/// Wraps scraped genres into the catalog document, recording where they came from.
pub fn catalog(genres: Vec<String>, url: &str) -> GenreCatalog {
    GenreCatalog {
        total_genres: genres.len(),
        genres,
        source: Some(format!("Every Noise at Once ({})", url)),
    }
}
