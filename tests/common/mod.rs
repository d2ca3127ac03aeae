#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use genrecli::{
    error::HarvestError,
    harvest::ArtistSearch,
    types::{Artist, ExternalUrls, Followers, Genre},
    utils,
};
use reqwest::StatusCode;

// Helper function to create a test artist
pub fn artist(id: &str, popularity: u32) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        popularity,
        followers: Followers {
            total: popularity as u64 * 1000,
        },
        genres: vec!["indie".to_string(), "lo-fi".to_string()],
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/artist/{}", id)),
        },
        images: Vec::new(),
    }
}

pub fn genre(label: &str) -> Genre {
    Genre::new(label).unwrap()
}

pub fn api_error() -> HarvestError {
    HarvestError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "upstream unavailable".to_string(),
    }
}

/// Search stub backed by a fixed artist list per genre, sliced by offset
/// and limit like the real catalog.
#[derive(Default)]
pub struct StubSearch {
    catalog: HashMap<String, Vec<Artist>>,
    fail_on_request: HashMap<String, usize>,
    calls: Mutex<Vec<(String, u32, u32)>>,
}

impl StubSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, label: &str, artists: Vec<Artist>) -> Self {
        self.catalog
            .insert(utils::genre_query(&genre(label)), artists);
        self
    }

    /// Makes the n-th request (1-based) for `label` fail.
    pub fn failing_on(mut self, label: &str, request: usize) -> Self {
        self.fail_on_request
            .insert(utils::genre_query(&genre(label)), request);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, label: &str) -> Vec<(u32, u32)> {
        let query = utils::genre_query(&genre(label));
        self.calls()
            .into_iter()
            .filter(|(q, _, _)| *q == query)
            .map(|(_, limit, offset)| (limit, offset))
            .collect()
    }
}

#[async_trait]
impl ArtistSearch for StubSearch {
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Artist>, HarvestError> {
        let nth = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((query.to_string(), limit, offset));
            calls.iter().filter(|(q, _, _)| q == query).count()
        };

        if self.fail_on_request.get(query) == Some(&nth) {
            return Err(api_error());
        }

        Ok(self
            .catalog
            .get(query)
            .map(|artists| {
                artists
                    .iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Catalog that never runs dry: every request gets a full page of new artists.
#[derive(Default)]
pub struct EndlessSearch {
    requests: Mutex<usize>,
}

impl EndlessSearch {
    pub fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl ArtistSearch for EndlessSearch {
    async fn search_artists(
        &self,
        _query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Artist>, HarvestError> {
        *self.requests.lock().unwrap() += 1;
        Ok((offset..offset + limit)
            .map(|i| artist(&format!("endless{}", i), i % 100))
            .collect())
    }
}
